//! Register transport seam
//!
//! The decoder core never opens a bus itself. Everything it needs from the
//! outside world is two operations on [`RegisterTransport`]: a block read
//! and a single-byte write, both addressed by device and register. Hardware
//! adapters implement the trait over their bus library; tests implement it
//! with [`MockTransport`], a scripted double that replays canned register
//! traffic and fails the test on any deviation.

use crate::errors::{BusOperation, SensorError, SensorResult};

/// Byte-level access to sensor registers
///
/// Implementations map their library's failures into
/// [`SensorError::Transport`] and should log the underlying cause before
/// discarding it. No retry happens at this level.
pub trait RegisterTransport {
    /// Fill `buf` from consecutive registers starting at `register`
    fn read_block(&mut self, device: u8, register: u8, buf: &mut [u8]) -> SensorResult<()>;

    /// Write one byte to `register`
    fn write_byte(&mut self, device: u8, register: u8, value: u8) -> SensorResult<()>;
}

#[cfg(feature = "std")]
use std::collections::VecDeque;

/// One scripted bus interaction
#[cfg(feature = "std")]
#[derive(Debug, Clone, PartialEq, Eq)]
enum Expected {
    Read { register: u8, response: Vec<u8> },
    Write { register: u8, value: u8 },
    ReadError { register: u8 },
    WriteError { register: u8 },
}

/// Scripted transport double
///
/// Expectations are consumed in order; a call that does not match the next
/// expectation panics, which surfaces as an ordinary test failure. Finish
/// tests with [`MockTransport::done`] to prove the whole script ran.
///
/// ```rust
/// use boreas_core::transport::{MockTransport, RegisterTransport};
///
/// let mut bus = MockTransport::new(0x76)
///     .expect_write(0xF2, 0x02)
///     .expect_read(0xD0, &[0x60, 0x00]);
///
/// bus.write_byte(0x76, 0xF2, 0x02).unwrap();
/// let mut id = [0u8; 2];
/// bus.read_block(0x76, 0xD0, &mut id).unwrap();
/// assert_eq!(id, [0x60, 0x00]);
/// bus.done();
/// ```
#[cfg(feature = "std")]
#[derive(Debug, Clone)]
pub struct MockTransport {
    device: u8,
    script: VecDeque<Expected>,
}

#[cfg(feature = "std")]
impl MockTransport {
    /// Mock bound to one expected device address
    pub fn new(device: u8) -> Self {
        Self {
            device,
            script: VecDeque::new(),
        }
    }

    /// Append an expected block read and the bytes it returns
    pub fn expect_read(mut self, register: u8, response: &[u8]) -> Self {
        self.script.push_back(Expected::Read {
            register,
            response: response.to_vec(),
        });
        self
    }

    /// Append an expected single-byte write
    pub fn expect_write(mut self, register: u8, value: u8) -> Self {
        self.script.push_back(Expected::Write { register, value });
        self
    }

    /// Append a block read that fails on the bus
    pub fn expect_read_error(mut self, register: u8) -> Self {
        self.script.push_back(Expected::ReadError { register });
        self
    }

    /// Append a write that fails on the bus
    pub fn expect_write_error(mut self, register: u8) -> Self {
        self.script.push_back(Expected::WriteError { register });
        self
    }

    /// Assert the whole script was consumed
    pub fn done(&self) {
        assert!(
            self.script.is_empty(),
            "transport script has {} unconsumed expectations",
            self.script.len()
        );
    }

    fn next(&mut self, call: &str, register: u8) -> Expected {
        match self.script.pop_front() {
            Some(expected) => expected,
            None => panic!("unexpected {} of {:#04x}: script exhausted", call, register),
        }
    }
}

#[cfg(feature = "std")]
impl RegisterTransport for MockTransport {
    fn read_block(&mut self, device: u8, register: u8, buf: &mut [u8]) -> SensorResult<()> {
        assert_eq!(device, self.device, "read addressed the wrong device");
        match self.next("read", register) {
            Expected::Read {
                register: expected,
                response,
            } => {
                assert_eq!(register, expected, "read of the wrong register");
                assert_eq!(
                    buf.len(),
                    response.len(),
                    "read length does not match the scripted response"
                );
                buf.copy_from_slice(&response);
                Ok(())
            }
            Expected::ReadError { register: expected } => {
                assert_eq!(register, expected, "failing read of the wrong register");
                Err(SensorError::Transport {
                    operation: BusOperation::Read,
                    register,
                })
            }
            other => panic!("expected {:?}, got read of {:#04x}", other, register),
        }
    }

    fn write_byte(&mut self, device: u8, register: u8, value: u8) -> SensorResult<()> {
        assert_eq!(device, self.device, "write addressed the wrong device");
        match self.next("write", register) {
            Expected::Write {
                register: expected,
                value: expected_value,
            } => {
                assert_eq!(register, expected, "write to the wrong register");
                assert_eq!(value, expected_value, "wrong value written");
                Ok(())
            }
            Expected::WriteError { register: expected } => {
                assert_eq!(register, expected, "failing write to the wrong register");
                Err(SensorError::Transport {
                    operation: BusOperation::Write,
                    register,
                })
            }
            other => panic!("expected {:?}, got write of {:#04x}", other, register),
        }
    }
}
