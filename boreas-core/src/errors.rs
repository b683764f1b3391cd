//! Error Types for Sensor Decoding Failures
//!
//! ## Design Philosophy
//!
//! The error system is built for the smallest deployment target:
//!
//! 1. **Small Size**: every variant is a few plain scalars, so errors return
//!    cheaply from hot acquisition paths.
//!
//! 2. **No Heap Allocation**: no String, no boxed sources. Bus adapters that
//!    wrap richer library errors log the underlying cause themselves before
//!    mapping into this taxonomy.
//!
//! 3. **Copy Semantics**: errors implement Copy so they can be returned and
//!    stored without move bookkeeping.
//!
//! ## Error Categories
//!
//! - `CalibrationTruncated`: malformed calibration input (wrong block length).
//!   The only failure the decoder itself can produce.
//! - `Transport`: a bus read or write failed; carries the operation and the
//!   register so the caller knows where the cycle died.
//! - `OutOfRange`: reserved for future bounds checking on physical values.
//!   Nothing raises it today; the humidity clamp is a correction, not an
//!   error.
//!
//! ## Handling
//!
//! ```rust
//! use boreas_core::{SensorError, SensorResult};
//!
//! fn report(result: SensorResult<()>) {
//!     match result {
//!         Ok(()) => {}
//!         Err(SensorError::Transport { register, .. }) => {
//!             // Bus fault: the caller decides whether to retry the cycle
//!             let _ = register;
//!         }
//!         Err(other) => {
//!             let _ = other;
//!         }
//!     }
//! }
//! ```

use thiserror_no_std::Error;

/// Result type for decoder and sequencer operations
pub type SensorResult<T> = Result<T, SensorError>;

/// Bus direction recorded in transport errors
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum BusOperation {
    /// Block or byte read from a register
    Read,
    /// Single byte write to a register
    Write,
}

/// Sensor decoding errors - kept small and Copy for embedded use
#[derive(Error, Debug, Clone, Copy, PartialEq)]
pub enum SensorError {
    /// Calibration block shorter than the datasheet layout requires
    #[error("Calibration block at {register:#04x} has {actual} bytes, need {expected}")]
    CalibrationTruncated {
        /// Start register of the offending block (0x88, 0xA1 or 0xE1)
        register: u8,
        /// Length the datasheet layout requires
        expected: u8,
        /// Length actually supplied
        actual: u8,
    },

    /// Bus I/O failed during an acquisition or identification step
    #[error("Bus {operation:?} failed at register {register:#04x}")]
    Transport {
        /// Direction of the failed transfer
        operation: BusOperation,
        /// Register the transfer addressed
        register: u8,
    },

    /// Value outside permitted bounds (reserved; not raised by this crate)
    #[error("Value {value} outside range [{min}, {max}]")]
    OutOfRange {
        /// The offending value
        value: f32,
        /// Minimum acceptable value
        min: f32,
        /// Maximum acceptable value
        max: f32,
    },
}

#[cfg(feature = "defmt")]
impl defmt::Format for SensorError {
    fn format(&self, fmt: defmt::Formatter) {
        match self {
            Self::CalibrationTruncated { register, expected, actual } =>
                defmt::write!(fmt, "Calibration block {:#04x}: {} of {} bytes", register, actual, expected),
            Self::Transport { operation, register } =>
                defmt::write!(
                    fmt,
                    "Bus {} failed at {:#04x}",
                    match operation {
                        BusOperation::Read => "read",
                        BusOperation::Write => "write",
                    },
                    register
                ),
            Self::OutOfRange { value, min, max } =>
                defmt::write!(fmt, "Value {} outside [{}, {}]", value, min, max),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn errors_are_copy() {
        let err = SensorError::Transport {
            operation: BusOperation::Read,
            register: 0xF7,
        };
        let copy = err;
        assert_eq!(err, copy);
    }

    #[cfg(feature = "std")]
    #[test]
    fn truncation_display_names_block() {
        let err = SensorError::CalibrationTruncated {
            register: 0xA1,
            expected: 1,
            actual: 0,
        };
        let text = format!("{}", err);
        assert!(text.contains("0xa1"));
        assert!(text.contains("need 1"));
    }
}
