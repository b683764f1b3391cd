//! Station-Side Adapters for Boreas
//!
//! ## Overview
//!
//! This crate connects the hardware-agnostic decoding core to the concrete
//! peripherals of a Raspberry Pi weather station. Each adapter lives behind
//! its own feature gate so a deployment only compiles what it wires up.
//!
//! ## Adapter Guide
//!
//! ### I2C Bus Transport (`i2c`)
//!
//! **Role:** implements the core's [`boreas_core::RegisterTransport`] trait
//! on top of the kernel's `/dev/i2c` device via `rppal`.
//!
//! **Characteristics:**
//! - One open bus handle, slave address latched lazily per transaction
//! - Block reads as a single write-then-read transfer (no per-byte loops)
//! - Bus failures map into the core's compact error taxonomy; the underlying
//!   driver error is logged here, where allocation is cheap
//!
//! ### Character Display (`display`)
//!
//! **Role:** renders readings on a 16x2 HD44780 panel behind a PCF8574 I2C
//! backpack, the wiring most hobbyist LCD modules ship with.
//!
//! **Characteristics:**
//! - 4-bit mode, each byte sent as two strobed nibble writes
//! - Backlight held on, 500 us settle delays around the enable pulse
//! - Renders exactly the caller's text; no layout logic
//!
//! ### ThingSpeak Publisher (`thingspeak`)
//!
//! **Role:** delivers compensated readings to a ThingSpeak channel over the
//! platform's HTTP update endpoint.
//!
//! **Characteristics:**
//! - Sync `ureq` agent with a bounded timeout
//! - One attempt per reading; the polling loop owns any retry policy
//! - Field numbering follows the sensor profile (see [`thingspeak`])
//!
//! ## Example Usage
//!
//! ```no_run
//! use boreas_adapters::{I2cTransport, Publisher, ThingSpeakClient, ThingSpeakConfig};
//! use boreas_core::{Sampler, SensorKind, SystemDelay};
//!
//! # fn main() -> Result<(), Box<dyn std::error::Error>> {
//! let transport = I2cTransport::new()?;
//! let mut sampler = Sampler::new(transport, SystemDelay, SensorKind::Bme280)
//!     .expect("sensor did not answer");
//! let reading = sampler.sample().expect("measurement failed");
//!
//! let mut channel = ThingSpeakClient::new(ThingSpeakConfig::new("WRITE-KEY"))?;
//! channel.publish(&reading)?;
//! # Ok(())
//! # }
//! ```

#[cfg(feature = "i2c")]
pub mod i2c;

#[cfg(feature = "display")]
pub mod display;

#[cfg(feature = "thingspeak")]
pub mod thingspeak;

// Re-export common types
#[cfg(feature = "i2c")]
pub use i2c::{I2cError, I2cTransport};

#[cfg(feature = "display")]
pub use display::{CharacterDisplay, DisplayError, Line};

#[cfg(feature = "thingspeak")]
pub use thingspeak::{ThingSpeakClient, ThingSpeakConfig, ThingSpeakError};

use boreas_core::CompensatedReading;

/// Trait for sinks that deliver readings off the station
pub trait Publisher {
    type Error;

    /// Deliver one compensated reading
    fn publish(&mut self, reading: &CompensatedReading) -> Result<(), Self::Error>;
}

/// Delivery counters kept by publisher implementations
#[derive(Debug, Default, Clone)]
pub struct PublishStats {
    /// Updates the service accepted
    pub sent: u64,
    /// Updates that failed to deliver
    pub failed: u64,
    /// Most recent failure, if any
    pub last_error: Option<String>,
}
