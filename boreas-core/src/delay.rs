//! Conversion-wait primitives
//!
//! The sensor needs a datasheet-mandated settling time between the forced
//! mode trigger and the data read. That wait goes through this trait so the
//! sequencer never hard-codes a sleep: production uses the blocking
//! [`SystemDelay`], tests swap in [`RecordingDelay`] and assert on the
//! requested durations instead of actually waiting.

use core::time::Duration;

/// A blocking suspension point
pub trait Delay {
    /// Suspend the caller for at least `duration`
    fn sleep(&mut self, duration: Duration);
}

/// Thread-blocking delay for hosted targets
#[cfg(feature = "std")]
#[derive(Debug, Clone, Copy, Default)]
pub struct SystemDelay;

#[cfg(feature = "std")]
impl Delay for SystemDelay {
    fn sleep(&mut self, duration: Duration) {
        std::thread::sleep(duration);
    }
}

/// Delay that does nothing
///
/// For callers that schedule the conversion wait externally, such as
/// firmware that parks the MCU in a timer interrupt.
#[derive(Debug, Clone, Copy, Default)]
pub struct NoopDelay;

impl Delay for NoopDelay {
    fn sleep(&mut self, _duration: Duration) {}
}

/// Test double that records every requested duration
#[cfg(feature = "std")]
#[derive(Debug, Clone, Default)]
pub struct RecordingDelay {
    requests: Vec<Duration>,
}

#[cfg(feature = "std")]
impl RecordingDelay {
    /// Empty recorder
    pub fn new() -> Self {
        Self::default()
    }

    /// Durations requested so far, in call order
    pub fn requests(&self) -> &[Duration] {
        &self.requests
    }

    /// Sum of all requested durations
    pub fn total(&self) -> Duration {
        self.requests.iter().sum()
    }
}

#[cfg(feature = "std")]
impl Delay for RecordingDelay {
    fn sleep(&mut self, duration: Duration) {
        self.requests.push(duration);
    }
}
