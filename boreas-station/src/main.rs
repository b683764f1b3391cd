//! Boreas weather station
//!
//! Polls a BMP280/BME280 over the Pi's I2C bus, prints each reading,
//! optionally renders it on a 16x2 character LCD and forwards it to a
//! ThingSpeak channel. Settings come from `BOREAS_*` environment variables;
//! see [`config`].
//!
//! Sensor failures stop the station with a nonzero exit. Display and
//! publisher failures only cost the current cycle.

use std::process::ExitCode;
use std::thread;

use boreas_adapters::{
    CharacterDisplay, DisplayError, I2cTransport, Line, Publisher, ThingSpeakClient,
    ThingSpeakConfig,
};
use boreas_core::{CompensatedReading, Sampler, SamplingConfig, SensorError, SystemDelay};
use thiserror::Error;

mod config;

use config::StationConfig;

#[derive(Debug, Error)]
enum StationError {
    #[error("configuration: {0}")]
    Config(#[from] config::ConfigError),

    #[error("bus: {0}")]
    Bus(#[from] boreas_adapters::I2cError),

    #[error("sensor: {0}")]
    Sensor(SensorError),

    #[error("publisher: {0}")]
    Publisher(#[from] boreas_adapters::ThingSpeakError),
}

fn main() -> ExitCode {
    env_logger::init();

    match run() {
        Ok(()) => ExitCode::SUCCESS,
        Err(err) => {
            log::error!("station stopped: {}", err);
            ExitCode::FAILURE
        }
    }
}

fn run() -> Result<(), StationError> {
    let settings = StationConfig::from_env()?;

    let transport = I2cTransport::new()?;
    let sampling = SamplingConfig::new().address(settings.device_address);
    let mut sampler = Sampler::with_config(transport, SystemDelay, settings.kind, sampling)
        .map_err(StationError::Sensor)?;

    let identity = sampler.identity();
    println!("Chip ID     : {}", identity.chip_id);
    println!("Version     : {}", identity.version);

    let mut panel = if settings.display {
        match open_panel() {
            Ok(panel) => Some(panel),
            Err(err) => {
                log::warn!("display unavailable: {}", err);
                None
            }
        }
    } else {
        None
    };

    let mut channel = match settings.api_key.as_deref() {
        Some(key) => Some(ThingSpeakClient::new(ThingSpeakConfig::new(key))?),
        None => {
            log::info!("BOREAS_API_KEY unset, publishing disabled");
            None
        }
    };

    loop {
        let reading = sampler.sample().map_err(StationError::Sensor)?;

        println!("Temperature : {:.2} C", reading.temperature_c);
        println!("Pressure    : {:.2} hPa", reading.pressure_hpa);
        if let Some(humidity) = reading.humidity_percent {
            println!("Humidity    : {} %", humidity);
        }

        if let Some(panel) = panel.as_mut() {
            if let Err(err) = render(panel, &reading) {
                log::warn!("display write failed: {}", err);
            }
        }

        if let Some(channel) = channel.as_mut() {
            if let Err(err) = channel.publish(&reading) {
                log::warn!("publish failed: {}", err);
            }
        }

        thread::sleep(settings.interval);
    }
}

fn open_panel() -> Result<CharacterDisplay, DisplayError> {
    let mut panel = CharacterDisplay::new()?;
    panel.init()?;
    panel.write_line("Boreas", Line::One)?;
    panel.write_line("Weather Station", Line::Two)?;
    Ok(panel)
}

fn render(panel: &mut CharacterDisplay, reading: &CompensatedReading) -> Result<(), DisplayError> {
    let (header, values) = display_rows(reading);
    panel.write_line(&header, Line::One)?;
    panel.write_line(&values, Line::Two)
}

/// Lay out the two panel rows, value order matching the channel fields
fn display_rows(reading: &CompensatedReading) -> (String, String) {
    match reading.humidity_percent {
        Some(humidity) => (
            "HUM TEMP PRESS".to_string(),
            format!(
                "{} {:.1} {:.1}",
                humidity, reading.temperature_c, reading.pressure_hpa
            ),
        ),
        None => (
            "TEMP PRESS".to_string(),
            format!("{:.1} {:.1}", reading.temperature_c, reading.pressure_hpa),
        ),
    }
}
