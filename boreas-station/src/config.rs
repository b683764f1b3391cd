//! Environment-driven station settings
//!
//! Everything is read once at startup from `BOREAS_*` variables:
//!
//! - `BOREAS_API_KEY` - ThingSpeak write key; publishing is off when unset
//! - `BOREAS_INTERVAL_SECS` - pause between cycles, default 2
//! - `BOREAS_I2C_ADDR` - sensor address, hex with `0x` prefix or decimal,
//!   default 0x76
//! - `BOREAS_SENSOR` - `bme280` (default) or `bmp280`
//! - `BOREAS_DISPLAY` - `1` or `true` drives the character LCD

use std::env;
use std::time::Duration;

use boreas_core::{SensorKind, DEFAULT_DEVICE_ADDRESS};
use thiserror::Error;

/// A variable that did not parse
#[derive(Debug, Error)]
#[error("{variable}: {detail}")]
pub struct ConfigError {
    variable: &'static str,
    detail: String,
}

/// Station settings, read once at startup
#[derive(Debug, Clone)]
pub struct StationConfig {
    /// ThingSpeak write key; publishing is off when unset
    pub api_key: Option<String>,
    /// Pause between measurement cycles
    pub interval: Duration,
    /// Sensor bus address
    pub device_address: u8,
    /// Decoding profile of the attached sensor
    pub kind: SensorKind,
    /// Drive the character LCD
    pub display: bool,
}

impl StationConfig {
    /// Read every `BOREAS_*` variable, applying defaults for absent ones
    pub fn from_env() -> Result<Self, ConfigError> {
        let api_key = env::var("BOREAS_API_KEY")
            .ok()
            .filter(|key| !key.is_empty());

        let interval = match env::var("BOREAS_INTERVAL_SECS") {
            Ok(raw) => Duration::from_secs(parse_seconds(&raw)?),
            Err(_) => Duration::from_secs(2),
        };

        let device_address = match env::var("BOREAS_I2C_ADDR") {
            Ok(raw) => parse_address(&raw)?,
            Err(_) => DEFAULT_DEVICE_ADDRESS,
        };

        let kind = match env::var("BOREAS_SENSOR") {
            Ok(raw) => parse_kind(&raw)?,
            Err(_) => SensorKind::Bme280,
        };

        let display = env::var("BOREAS_DISPLAY")
            .map(|raw| matches!(raw.trim().to_ascii_lowercase().as_str(), "1" | "true"))
            .unwrap_or(false);

        Ok(Self {
            api_key,
            interval,
            device_address,
            kind,
            display,
        })
    }
}

fn parse_seconds(raw: &str) -> Result<u64, ConfigError> {
    raw.trim().parse().map_err(|_| ConfigError {
        variable: "BOREAS_INTERVAL_SECS",
        detail: format!("could not parse {:?} as seconds", raw),
    })
}

fn parse_address(raw: &str) -> Result<u8, ConfigError> {
    let trimmed = raw.trim();
    let parsed = match trimmed
        .strip_prefix("0x")
        .or_else(|| trimmed.strip_prefix("0X"))
    {
        Some(hex) => u8::from_str_radix(hex, 16),
        None => trimmed.parse(),
    };
    parsed.map_err(|_| ConfigError {
        variable: "BOREAS_I2C_ADDR",
        detail: format!("could not parse {:?} as a bus address", raw),
    })
}

fn parse_kind(raw: &str) -> Result<SensorKind, ConfigError> {
    match raw.trim().to_ascii_lowercase().as_str() {
        "bme280" => Ok(SensorKind::Bme280),
        "bmp280" => Ok(SensorKind::Bmp280),
        _ => Err(ConfigError {
            variable: "BOREAS_SENSOR",
            detail: format!("expected bme280 or bmp280, got {:?}", raw),
        }),
    }
}
