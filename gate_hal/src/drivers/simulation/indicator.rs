//! No-op indicator.

use gate_common::hal::config::IndicatorConfig;
use gate_common::hal::driver::{HalError, IndicatorDriver};
use tracing::trace;

/// Indicator that only remembers its last state.
#[derive(Debug, Default)]
pub struct SimulatedIndicator {
    on: bool,
    switches: u64,
}

impl SimulatedIndicator {
    /// Create an indicator in the off state.
    pub fn new() -> Self {
        Self::default()
    }

    /// Last commanded state.
    pub fn is_on(&self) -> bool {
        self.on
    }

    /// Number of on/off changes so far.
    pub fn switches(&self) -> u64 {
        self.switches
    }
}

impl IndicatorDriver for SimulatedIndicator {
    fn name(&self) -> &'static str {
        "none"
    }

    fn init(&mut self, _config: &IndicatorConfig) -> Result<(), HalError> {
        Ok(())
    }

    fn set(&mut self, on: bool) -> Result<(), HalError> {
        if on != self.on {
            self.switches += 1;
            trace!("Indicator {}", if on { "on" } else { "off" });
        }
        self.on = on;
        Ok(())
    }
}
