//! Register map and device identification for the BMP280/BME280 family
//!
//! Addresses and block lengths follow the Bosch datasheet memory map. The
//! acquisition sequencer is the only writer; everything here is shared so
//! adapters and tests can talk about registers by name instead of magic
//! numbers.

/// Default I2C device address (SDO pulled low)
pub const DEFAULT_DEVICE_ADDRESS: u8 = 0x76;

/// Chip identity register: id byte followed by version byte
pub const ID: u8 = 0xD0;
/// Humidity oversampling control; must be written before `CTRL_MEAS` to latch
pub const CTRL_HUM: u8 = 0xF2;
/// Temperature/pressure oversampling plus power mode control
pub const CTRL_MEAS: u8 = 0xF4;
/// Standby time and IIR filter configuration; never written by this crate
pub const CONFIG: u8 = 0xF5;
/// Start of the 8-byte pressure/temperature/humidity burst read
pub const DATA: u8 = 0xF7;

/// Temperature and pressure calibration block (T1..T3, P1..P9)
pub const CALIB_TEMP_PRESS: u8 = 0x88;
/// Lone humidity calibration byte (H1)
pub const CALIB_HUM_BYTE: u8 = 0xA1;
/// Remaining humidity calibration block (H2..H6)
pub const CALIB_HUM_BLOCK: u8 = 0xE1;

/// Length of the identity read
pub const ID_LEN: usize = 2;
/// Length of the temperature/pressure calibration block
pub const CALIB_TEMP_PRESS_LEN: usize = 24;
/// Length of the lone humidity calibration read
pub const CALIB_HUM_BYTE_LEN: usize = 1;
/// Length of the remaining humidity calibration block
pub const CALIB_HUM_BLOCK_LEN: usize = 7;
/// Length of the measurement data burst
pub const DATA_LEN: usize = 8;

/// Chip id reported by BMP280 parts
pub const CHIP_ID_BMP280: u8 = 0x58;
/// Chip id reported by BME280 parts
pub const CHIP_ID_BME280: u8 = 0x60;

/// Measurement profile: which physical channels the decode produces
///
/// Both profiles run the identical register sequence; the profile only
/// decides whether the humidity bytes are decoded. Pressure/temperature-only
/// deployments therefore get structurally absent humidity, never a zero.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SensorKind {
    /// Pressure and temperature only
    Bmp280,
    /// Pressure, temperature and humidity
    Bme280,
}

impl SensorKind {
    /// Whether this profile decodes the humidity channel
    pub fn has_humidity(self) -> bool {
        matches!(self, SensorKind::Bme280)
    }
}

/// Chip identity as read from the `ID` register
///
/// Informational only: nothing in this crate compares the id against the
/// chosen profile. The station reports it at startup and moves on.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct DeviceIdentity {
    /// Model id (0x58 BMP280, 0x60 BME280)
    pub chip_id: u8,
    /// Mask revision
    pub version: u8,
}

impl DeviceIdentity {
    /// Build an identity from the two-byte `ID` register read
    pub fn from_bytes(bytes: [u8; 2]) -> Self {
        Self {
            chip_id: bytes[0],
            version: bytes[1],
        }
    }

    /// Classify the chip id, if it is one this crate knows
    pub fn kind(self) -> Option<SensorKind> {
        match self.chip_id {
            CHIP_ID_BMP280 => Some(SensorKind::Bmp280),
            CHIP_ID_BME280 => Some(SensorKind::Bme280),
            _ => None,
        }
    }
}
