//! Sampling configuration and measurement data types
//!
//! Covers both ends of one acquisition cycle: `SamplingConfig` assembles the
//! control bytes and the mandatory conversion wait, `RawSample` carries the
//! ADC counts unpacked from the burst read, and `CompensatedReading` is the
//! finished physical result handed to displays and publishers.

use core::time::Duration;

use crate::registers::{SensorKind, DATA_LEN, DEFAULT_DEVICE_ADDRESS};

/// Per-channel oversampling setting
///
/// The register field carries the log2 of the sampling factor: ×4 is encoded
/// as 2. `bits` is what goes on the wire, `factor` is what the sensor does.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Oversampling {
    /// Single sample
    X1,
    /// 2x oversampling
    X2,
    /// 4x oversampling
    X4,
    /// 8x oversampling
    X8,
    /// 16x oversampling
    X16,
}

impl Oversampling {
    /// Register encoding for this setting
    pub const fn bits(self) -> u8 {
        match self {
            Oversampling::X1 => 0,
            Oversampling::X2 => 1,
            Oversampling::X4 => 2,
            Oversampling::X8 => 3,
            Oversampling::X16 => 4,
        }
    }

    /// Number of internal samples the sensor averages
    pub const fn factor(self) -> u8 {
        1 << self.bits()
    }
}

/// Sensor power mode, low two bits of `CTRL_MEAS`
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Mode {
    /// No measurements, minimal current
    Sleep,
    /// One conversion, then back to sleep
    Forced,
    /// Free-running conversions at the configured standby interval
    Normal,
}

impl Mode {
    /// Register encoding for this mode
    pub const fn bits(self) -> u8 {
        match self {
            Mode::Sleep => 0,
            Mode::Forced => 1,
            Mode::Normal => 3,
        }
    }
}

/// Session configuration for the acquisition sequencer
///
/// Fields are public so tests and callers can build exact configurations;
/// the builder methods cover the common adjustments.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct SamplingConfig {
    /// I2C device address the session talks to
    pub device_address: u8,
    /// Temperature oversampling
    pub temperature: Oversampling,
    /// Pressure oversampling
    pub pressure: Oversampling,
    /// Humidity oversampling (still configured on humidity-less profiles;
    /// the sensor ignores it and the wait formula keeps its term)
    pub humidity: Oversampling,
}

impl Default for SamplingConfig {
    fn default() -> Self {
        Self {
            device_address: DEFAULT_DEVICE_ADDRESS,
            temperature: Oversampling::X4,
            pressure: Oversampling::X4,
            humidity: Oversampling::X4,
        }
    }
}

impl SamplingConfig {
    /// Default configuration: address 0x76, ×4 on every channel
    pub fn new() -> Self {
        Self::default()
    }

    /// Use a non-default device address
    pub fn address(mut self, device_address: u8) -> Self {
        self.device_address = device_address;
        self
    }

    /// Apply one oversampling setting to all three channels
    pub fn oversampling(mut self, os: Oversampling) -> Self {
        self.temperature = os;
        self.pressure = os;
        self.humidity = os;
        self
    }

    /// Value for the humidity control register (`CTRL_HUM`)
    pub fn ctrl_hum(&self) -> u8 {
        self.humidity.bits()
    }

    /// Value for the measure control register (`CTRL_MEAS`)
    pub fn ctrl_meas(&self, mode: Mode) -> u8 {
        self.temperature.bits() << 5 | self.pressure.bits() << 2 | mode.bits()
    }

    /// Conversion time for one forced cycle
    ///
    /// Datasheet Appendix B measurement-time formula, evaluated over the
    /// register encodings in integer microseconds:
    /// `1.25 + 2.3·osT + (2.3·osP + 0.575) + (2.3·osH + 0.575)` ms.
    /// The default ×4/×4/×4 configuration comes to exactly 16 200 µs.
    pub fn conversion_delay(&self) -> Duration {
        let micros = 1250
            + 2300 * self.temperature.bits() as u64
            + (2300 * self.pressure.bits() as u64 + 575)
            + (2300 * self.humidity.bits() as u64 + 575);
        Duration::from_micros(micros)
    }
}

/// Raw ADC counts from one burst read
///
/// Pressure and temperature are 20-bit values, humidity 16-bit. Humidity is
/// `None` on pressure/temperature-only profiles, not zero.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct RawSample {
    /// 20-bit pressure count
    pub pressure: u32,
    /// 20-bit temperature count
    pub temperature: u32,
    /// 16-bit humidity count, absent on BMP280 profiles
    pub humidity: Option<u16>,
}

impl RawSample {
    /// Unpack the 8-byte data burst starting at register 0xF7
    ///
    /// Layout: pressure MSB/LSB/XLSB, temperature MSB/LSB/XLSB, humidity
    /// MSB/LSB. The XLSB registers carry their 4 significant bits in the
    /// high nibble.
    pub fn unpack(data: &[u8; DATA_LEN], kind: SensorKind) -> Self {
        let pressure =
            (data[0] as u32) << 12 | (data[1] as u32) << 4 | (data[2] as u32) >> 4;
        let temperature =
            (data[3] as u32) << 12 | (data[4] as u32) << 4 | (data[5] as u32) >> 4;
        let humidity = if kind.has_humidity() {
            Some((data[6] as u16) << 8 | data[7] as u16)
        } else {
            None
        };

        Self {
            pressure,
            temperature,
            humidity,
        }
    }
}

/// Calibrated physical values for one cycle
#[derive(Debug, Clone, Copy, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct CompensatedReading {
    /// Temperature in °C
    pub temperature_c: f64,
    /// Pressure in hPa
    pub pressure_hpa: f64,
    /// Relative humidity in whole percent, clamped to 0..=100; absent on
    /// BMP280 profiles
    pub humidity_percent: Option<u8>,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn encoding_is_log2_of_factor() {
        let all = [
            Oversampling::X1,
            Oversampling::X2,
            Oversampling::X4,
            Oversampling::X8,
            Oversampling::X16,
        ];
        for os in all {
            assert_eq!(1u8 << os.bits(), os.factor());
        }
        // The register value 2 is the x4 setting
        assert_eq!(Oversampling::X4.bits(), 2);
    }

    #[test]
    fn control_bytes_for_default_forced_cycle() {
        let config = SamplingConfig::new();
        assert_eq!(config.ctrl_hum(), 0x02);
        // osT=2 << 5 | osP=2 << 2 | forced=1
        assert_eq!(config.ctrl_meas(Mode::Forced), 0x49);
    }

    #[test]
    fn conversion_delay_default_is_16200_us() {
        let config = SamplingConfig::new();
        assert_eq!(config.conversion_delay(), Duration::from_micros(16_200));
    }

    #[test]
    fn conversion_delay_minimal_is_2400_us() {
        let config = SamplingConfig::new().oversampling(Oversampling::X1);
        assert_eq!(config.conversion_delay(), Duration::from_micros(2_400));
    }

    #[test]
    fn unpack_splits_twenty_bit_fields() {
        let data = [0x12, 0x34, 0x56, 0x78, 0x9A, 0xBC, 0xDE, 0xF0];
        let raw = RawSample::unpack(&data, SensorKind::Bme280);
        assert_eq!(raw.pressure, 0x12345);
        assert_eq!(raw.temperature, 0x789AB);
        assert_eq!(raw.humidity, Some(0xDEF0));
    }

    #[test]
    fn unpack_bmp280_omits_humidity() {
        let data = [0x12, 0x34, 0x56, 0x78, 0x9A, 0xBC, 0xDE, 0xF0];
        let raw = RawSample::unpack(&data, SensorKind::Bmp280);
        assert_eq!(raw.humidity, None);
    }
}
