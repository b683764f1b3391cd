//! BMP280/BME280 decoding core for Boreas
//!
//! Turns raw register bytes plus factory calibration into calibrated
//! temperature, pressure and humidity. Bus access and the conversion wait
//! sit behind injected traits, so the same sequencing runs on a Raspberry
//! Pi, in firmware, or against scripted test doubles.
//!
//! Key constraints:
//! - no_std capable; the decode path allocates nothing
//! - compensation is pure arithmetic, deterministic and total
//! - one register sequence for both profiles; BMP280 merely skips the
//!   humidity decode
//!
//! ```
//! use boreas_core::{MockTransport, RecordingDelay, Sampler, SensorKind};
//!
//! # fn main() -> boreas_core::SensorResult<()> {
//! let bus = MockTransport::new(0x76)
//!     .expect_read(0xD0, &[0x60, 0x00])
//!     .expect_read(0x88, &[0u8; 24])
//!     .expect_read(0xA1, &[0u8; 1])
//!     .expect_read(0xE1, &[0u8; 7])
//!     .expect_write(0xF2, 0x02)
//!     .expect_write(0xF4, 0x49)
//!     .expect_read(0xF7, &[0u8; 8]);
//!
//! let mut sampler = Sampler::new(bus, RecordingDelay::new(), SensorKind::Bme280)?;
//! let reading = sampler.sample()?;
//! assert!(reading.humidity_percent.is_some());
//! # Ok(())
//! # }
//! ```

#![cfg_attr(not(feature = "std"), no_std)]
#![deny(unsafe_code)]
#![warn(missing_docs)]

pub mod calibration;
pub mod compensation;
pub mod delay;
pub mod errors;
pub mod registers;
pub mod sample;
pub mod sampler;
pub mod transport;

// Public API
pub use calibration::CalibrationSet;
pub use compensation::compensate;
pub use delay::{Delay, NoopDelay};
#[cfg(feature = "std")]
pub use delay::{RecordingDelay, SystemDelay};
pub use errors::{BusOperation, SensorError, SensorResult};
pub use registers::{DeviceIdentity, SensorKind, DEFAULT_DEVICE_ADDRESS};
pub use sample::{CompensatedReading, Mode, Oversampling, RawSample, SamplingConfig};
pub use sampler::Sampler;
#[cfg(feature = "std")]
pub use transport::MockTransport;
pub use transport::RegisterTransport;

pub const VERSION: &str = env!("CARGO_PKG_VERSION");
