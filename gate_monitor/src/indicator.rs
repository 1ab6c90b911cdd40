//! Progress indicator wrapper.
//!
//! The indicator is advisory: driver errors are logged once per burst and
//! never interrupt sampling or alerting.

use crate::clock::Clock;
use gate::consts::FLASH_HALF_PERIOD;
use gate::hal::driver::IndicatorDriver;
use tracing::warn;

/// Indicator output with progress-flash support.
pub struct Indicator {
    driver: Box<dyn IndicatorDriver>,
    /// Suppresses repeated warnings while the driver keeps failing.
    failing: bool,
}

impl Indicator {
    pub fn new(driver: Box<dyn IndicatorDriver>) -> Self {
        Self {
            driver,
            failing: false,
        }
    }

    /// Switch the indicator, logging (once) on failure.
    pub fn set(&mut self, on: bool) {
        match self.driver.set(on) {
            Ok(()) => self.failing = false,
            Err(e) => {
                if !self.failing {
                    warn!("Indicator '{}' failed: {}", self.driver.name(), e);
                }
                self.failing = true;
            }
        }
    }

    /// Flash `count` times: off for one half period, on for the next,
    /// ending off.
    pub fn flash(&mut self, count: u32, clock: &dyn Clock) {
        for _ in 0..count {
            clock.sleep(FLASH_HALF_PERIOD);
            self.set(true);
            clock.sleep(FLASH_HALF_PERIOD);
            self.set(false);
        }
    }

    /// Release the output.
    pub fn shutdown(&mut self) {
        if let Err(e) = self.driver.shutdown() {
            warn!("Indicator shutdown failed: {}", e);
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::clock::ManualClock;
    use gate::hal::config::IndicatorConfig;
    use gate::hal::driver::HalError;
    use std::sync::{Arc, Mutex};
    use std::time::Duration;

    #[derive(Default, Clone)]
    struct Recorder {
        states: Arc<Mutex<Vec<bool>>>,
        fail: bool,
    }

    impl IndicatorDriver for Recorder {
        fn name(&self) -> &'static str {
            "recorder"
        }

        fn init(&mut self, _config: &IndicatorConfig) -> Result<(), HalError> {
            Ok(())
        }

        fn set(&mut self, on: bool) -> Result<(), HalError> {
            if self.fail {
                return Err(HalError::CommunicationError("stuck".to_string()));
            }
            self.states.lock().unwrap().push(on);
            Ok(())
        }
    }

    #[test]
    fn flash_pulses_and_takes_time() {
        let recorder = Recorder::default();
        let mut indicator = Indicator::new(Box::new(recorder.clone()));
        let clock = ManualClock::new();

        indicator.flash(3, &clock);

        assert_eq!(
            *recorder.states.lock().unwrap(),
            vec![true, false, true, false, true, false]
        );
        assert_eq!(clock.now(), Duration::from_millis(1200));
    }

    #[test]
    fn failures_do_not_propagate() {
        let recorder = Recorder {
            fail: true,
            ..Recorder::default()
        };
        let mut indicator = Indicator::new(Box::new(recorder));
        indicator.set(true);
        indicator.set(false);
        assert!(indicator.failing);
    }
}
