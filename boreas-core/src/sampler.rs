//! Acquisition sequencing
//!
//! [`Sampler`] owns one sensor session: it reads the chip identity and the
//! three calibration blocks once at construction, then produces readings on
//! demand. Each forced cycle is the same register traffic regardless of
//! profile:
//!
//! 1. write humidity oversampling to `CTRL_HUM` (latched by the next step)
//! 2. write oversampling plus forced mode to `CTRL_MEAS`
//! 3. suspend for the computed conversion time
//! 4. burst-read the 8 data bytes at `DATA`
//!
//! There is no retry at this level. A transport failure aborts the cycle
//! and the caller decides whether to run another one.

use crate::calibration::CalibrationSet;
use crate::compensation::compensate;
use crate::delay::Delay;
use crate::errors::SensorResult;
use crate::registers::{self, DeviceIdentity, SensorKind};
use crate::sample::{CompensatedReading, Mode, RawSample, SamplingConfig};
use crate::transport::RegisterTransport;

/// One sensor session: transport, delay, profile and calibration
///
/// The transport and delay are injected so the same sequencing runs against
/// real hardware and scripted test doubles.
#[derive(Debug)]
pub struct Sampler<T, D> {
    transport: T,
    delay: D,
    kind: SensorKind,
    config: SamplingConfig,
    identity: DeviceIdentity,
    calibration: CalibrationSet,
}

impl<T: RegisterTransport, D: Delay> Sampler<T, D> {
    /// Open a session with the default configuration (address 0x76, ×4
    /// oversampling on every channel)
    pub fn new(transport: T, delay: D, kind: SensorKind) -> SensorResult<Self> {
        Self::with_config(transport, delay, kind, SamplingConfig::default())
    }

    /// Open a session with an explicit configuration
    ///
    /// Reads the identity register and all three calibration blocks up
    /// front; the coefficients are fixed for the life of the chip, so this
    /// is the only time they cross the bus.
    pub fn with_config(
        mut transport: T,
        delay: D,
        kind: SensorKind,
        config: SamplingConfig,
    ) -> SensorResult<Self> {
        let device = config.device_address;

        let mut id = [0u8; registers::ID_LEN];
        transport.read_block(device, registers::ID, &mut id)?;
        let identity = DeviceIdentity::from_bytes(id);

        let mut cal1 = [0u8; registers::CALIB_TEMP_PRESS_LEN];
        let mut cal2 = [0u8; registers::CALIB_HUM_BYTE_LEN];
        let mut cal3 = [0u8; registers::CALIB_HUM_BLOCK_LEN];
        transport.read_block(device, registers::CALIB_TEMP_PRESS, &mut cal1)?;
        transport.read_block(device, registers::CALIB_HUM_BYTE, &mut cal2)?;
        transport.read_block(device, registers::CALIB_HUM_BLOCK, &mut cal3)?;
        let calibration = CalibrationSet::decode(&cal1, &cal2, &cal3)?;

        #[cfg(feature = "log")]
        log::debug!(
            "session open: chip {:#04x} rev {:#04x}, {:?} profile at {:#04x}",
            identity.chip_id,
            identity.version,
            kind,
            device
        );

        Ok(Self {
            transport,
            delay,
            kind,
            config,
            identity,
            calibration,
        })
    }

    /// Identity read at session start; informational, never verified
    pub fn identity(&self) -> DeviceIdentity {
        self.identity
    }

    /// Calibration coefficients for this chip
    pub fn calibration(&self) -> &CalibrationSet {
        &self.calibration
    }

    /// Profile this session decodes
    pub fn kind(&self) -> SensorKind {
        self.kind
    }

    /// Session configuration
    pub fn config(&self) -> &SamplingConfig {
        &self.config
    }

    /// Run one forced conversion and return the raw ADC counts
    pub fn acquire_raw(&mut self) -> SensorResult<RawSample> {
        let device = self.config.device_address;

        self.transport
            .write_byte(device, registers::CTRL_HUM, self.config.ctrl_hum())?;
        self.transport
            .write_byte(device, registers::CTRL_MEAS, self.config.ctrl_meas(Mode::Forced))?;
        self.delay.sleep(self.config.conversion_delay());

        let mut data = [0u8; registers::DATA_LEN];
        self.transport
            .read_block(device, registers::DATA, &mut data)?;

        Ok(RawSample::unpack(&data, self.kind))
    }

    /// Run one forced conversion and compensate it
    pub fn sample(&mut self) -> SensorResult<CompensatedReading> {
        let raw = self.acquire_raw()?;
        let reading = compensate(&raw, &self.calibration);

        #[cfg(feature = "log")]
        log::debug!(
            "cycle: raw p={} t={} h={:?} -> {:.2} C {:.2} hPa {:?} %",
            raw.pressure,
            raw.temperature,
            raw.humidity,
            reading.temperature_c,
            reading.pressure_hpa,
            reading.humidity_percent
        );

        Ok(reading)
    }

    /// Tear down the session, handing back the transport and delay
    pub fn release(self) -> (T, D) {
        (self.transport, self.delay)
    }
}
