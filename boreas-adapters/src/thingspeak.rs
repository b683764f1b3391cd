//! ThingSpeak Channel Publisher
//!
//! ThingSpeak ingests one reading per HTTP request: a GET against the
//! `/update` endpoint carrying the channel's write API key and a numbered
//! `fieldN` parameter per value.
//!
//! Field numbering follows the sensor profile so existing channel layouts
//! keep working:
//!
//! | Profile          | field1      | field2      | field3   |
//! |------------------|-------------|-------------|----------|
//! | With humidity    | humidity    | temperature | pressure |
//! | Without humidity | temperature | pressure    | -        |
//!
//! One attempt per reading; the polling loop owns any retry policy. The
//! free rate plan allows one update every 15 seconds, which the loop's
//! interval should respect.

use std::time::Duration;

use boreas_core::CompensatedReading;
use thiserror::Error;

use crate::{PublishStats, Publisher};

/// ThingSpeak-specific errors
#[derive(Debug, Error)]
pub enum ThingSpeakError {
    /// Bad endpoint or key configuration
    #[error("Configuration error: {0}")]
    Config(String),

    /// Server rejected the update
    #[error("ThingSpeak returned status {0}")]
    Status(u16),

    /// Network-level failure
    #[error("Request failed: {0}")]
    Transport(String),
}

/// Publisher configuration
#[derive(Clone)]
pub struct ThingSpeakConfig {
    /// Channel write API key
    pub api_key: String,
    /// Update endpoint, overridable for self-hosted instances
    pub endpoint: String,
    /// Request timeout
    pub timeout: Duration,
    /// User agent string
    pub user_agent: String,
}

impl ThingSpeakConfig {
    /// Create a configuration for the public ThingSpeak service
    pub fn new(api_key: impl Into<String>) -> Self {
        Self {
            api_key: api_key.into(),
            endpoint: "https://api.thingspeak.com/update".into(),
            timeout: Duration::from_secs(10),
            user_agent: format!("boreas/{}", env!("CARGO_PKG_VERSION")),
        }
    }

    /// Point at a different update endpoint
    pub fn endpoint(mut self, url: impl Into<String>) -> Self {
        self.endpoint = url.into();
        self
    }

    /// Set the request timeout in seconds
    pub fn timeout_secs(mut self, secs: u64) -> Self {
        self.timeout = Duration::from_secs(secs);
        self
    }
}

/// Publisher for one ThingSpeak channel using the lightweight ureq client
pub struct ThingSpeakClient {
    config: ThingSpeakConfig,
    agent: ureq::Agent,
    stats: PublishStats,
}

impl ThingSpeakClient {
    /// Create a new client, validating the configuration
    pub fn new(config: ThingSpeakConfig) -> Result<Self, ThingSpeakError> {
        if config.api_key.is_empty() {
            return Err(ThingSpeakError::Config("write API key is empty".into()));
        }
        if !config.endpoint.starts_with("http://") && !config.endpoint.starts_with("https://") {
            return Err(ThingSpeakError::Config(
                "endpoint must start with http:// or https://".into(),
            ));
        }

        let agent = ureq::AgentBuilder::new()
            .timeout(config.timeout)
            .user_agent(&config.user_agent)
            .build();

        Ok(Self {
            config,
            agent,
            stats: PublishStats::default(),
        })
    }

    /// Delivery counters since construction
    pub fn stats(&self) -> PublishStats {
        self.stats.clone()
    }

    fn send_update(&mut self, reading: &CompensatedReading) -> Result<(), ThingSpeakError> {
        let mut request = self
            .agent
            .get(&self.config.endpoint)
            .query("api_key", &self.config.api_key);
        for (field, value) in channel_fields(reading) {
            request = request.query(field, &value);
        }

        match request.call() {
            Ok(_) => {
                self.stats.sent += 1;
                log::debug!("update accepted by {}", self.config.endpoint);
                Ok(())
            }
            Err(ureq::Error::Status(code, _)) => {
                self.stats.failed += 1;
                self.stats.last_error = Some(format!("status {}", code));
                Err(ThingSpeakError::Status(code))
            }
            Err(ureq::Error::Transport(cause)) => {
                self.stats.failed += 1;
                self.stats.last_error = Some(cause.to_string());
                Err(ThingSpeakError::Transport(cause.to_string()))
            }
        }
    }
}

/// Order a reading into the channel's numbered fields
fn channel_fields(reading: &CompensatedReading) -> Vec<(&'static str, String)> {
    match reading.humidity_percent {
        Some(humidity) => vec![
            ("field1", humidity.to_string()),
            ("field2", format!("{:.2}", reading.temperature_c)),
            ("field3", format!("{:.2}", reading.pressure_hpa)),
        ],
        None => vec![
            ("field1", format!("{:.2}", reading.temperature_c)),
            ("field2", format!("{:.2}", reading.pressure_hpa)),
        ],
    }
}

impl Publisher for ThingSpeakClient {
    type Error = ThingSpeakError;

    fn publish(&mut self, reading: &CompensatedReading) -> Result<(), Self::Error> {
        self.send_update(reading)
    }
}
