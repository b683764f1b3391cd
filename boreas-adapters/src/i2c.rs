//! Raspberry Pi I2C Transport
//!
//! Implements [`RegisterTransport`] on the kernel's `/dev/i2c` device through
//! `rppal`. The kernel interface latches one slave address per handle, while
//! the core addresses the device on every call; the adapter bridges the two
//! by re-latching only when the address actually changes.
//!
//! Register reads use a single write-then-read transfer (repeated start), so
//! a 24-byte calibration block costs one bus transaction rather than 24.
//!
//! The core's errors are compact and `Copy`, so they cannot carry the
//! driver's error value. The underlying cause is logged here at `warn` level
//! before the mapped error propagates.

use boreas_core::{BusOperation, RegisterTransport, SensorError, SensorResult};
use rppal::i2c::I2c;
use thiserror::Error;

/// Errors raised while opening the bus device
#[derive(Debug, Error)]
pub enum I2cError {
    /// The kernel bus device could not be opened
    #[error("Failed to open I2C bus: {0}")]
    Open(#[from] rppal::i2c::Error),
}

/// Register transport over a Raspberry Pi I2C bus
pub struct I2cTransport {
    bus: I2c,
    /// Address currently latched on the kernel handle
    latched: Option<u8>,
}

impl I2cTransport {
    /// Open the default bus (`/dev/i2c-1` on recent boards)
    pub fn new() -> Result<Self, I2cError> {
        Ok(Self {
            bus: I2c::new()?,
            latched: None,
        })
    }

    /// Open a specific bus, e.g. bus 0 on early Raspberry Pi revisions
    pub fn with_bus(bus: u8) -> Result<Self, I2cError> {
        Ok(Self {
            bus: I2c::with_bus(bus)?,
            latched: None,
        })
    }

    fn select(&mut self, device: u8) -> Result<(), rppal::i2c::Error> {
        if self.latched != Some(device) {
            self.bus.set_slave_address(u16::from(device))?;
            self.latched = Some(device);
        }
        Ok(())
    }
}

impl RegisterTransport for I2cTransport {
    fn read_block(&mut self, device: u8, register: u8, buf: &mut [u8]) -> SensorResult<()> {
        let outcome = self
            .select(device)
            .and_then(|_| self.bus.write_read(&[register], buf));
        outcome.map_err(|cause| {
            log::warn!(
                "I2C read of register {:#04x} on {:#04x} failed: {}",
                register,
                device,
                cause
            );
            SensorError::Transport {
                operation: BusOperation::Read,
                register,
            }
        })
    }

    fn write_byte(&mut self, device: u8, register: u8, value: u8) -> SensorResult<()> {
        let outcome = self
            .select(device)
            .and_then(|_| self.bus.write(&[register, value]).map(|_| ()));
        outcome.map_err(|cause| {
            log::warn!(
                "I2C write of register {:#04x} on {:#04x} failed: {}",
                register,
                device,
                cause
            );
            SensorError::Transport {
                operation: BusOperation::Write,
                register,
            }
        })
    }
}
