//! Linux sysfs GPIO drivers.
//!
//! The input line is biased by a hardware pull-down; sysfs has no bias
//! control, so none is configured here.

mod gpio;

pub use gpio::{Direction, SysfsLine};

use gate_common::hal::config::{IndicatorConfig, InputConfig};
use gate_common::hal::driver::{HalError, IndicatorDriver, InputDriver};
use tracing::info;

/// Factory function to create a sysfs input driver.
pub fn create_input() -> Box<dyn InputDriver> {
    Box::new(SysfsInput::default())
}

/// Factory function to create a sysfs indicator driver.
pub fn create_indicator() -> Box<dyn IndicatorDriver> {
    Box::new(SysfsIndicator::default())
}

/// Monitored input on a sysfs GPIO line.
#[derive(Debug, Default)]
pub struct SysfsInput {
    line: Option<SysfsLine>,
    active_low: bool,
}

impl InputDriver for SysfsInput {
    fn name(&self) -> &'static str {
        "sysfs"
    }

    fn init(&mut self, config: &InputConfig) -> Result<(), HalError> {
        let line = SysfsLine::claim(&config.sysfs_root, config.pin, Direction::In)?;
        info!(
            "Claimed GPIO {} as input (active_low={})",
            config.pin, config.active_low
        );
        self.line = Some(line);
        self.active_low = config.active_low;
        Ok(())
    }

    fn read(&mut self) -> Result<bool, HalError> {
        let line = self
            .line
            .as_ref()
            .ok_or_else(|| HalError::CommunicationError("input line not claimed".to_string()))?;
        Ok(line.level()? != self.active_low)
    }

    fn shutdown(&mut self) -> Result<(), HalError> {
        self.line = None;
        Ok(())
    }
}

/// Progress LED on a sysfs GPIO line.
#[derive(Debug, Default)]
pub struct SysfsIndicator {
    line: Option<SysfsLine>,
}

impl IndicatorDriver for SysfsIndicator {
    fn name(&self) -> &'static str {
        "sysfs"
    }

    fn init(&mut self, config: &IndicatorConfig) -> Result<(), HalError> {
        self.line = Some(SysfsLine::claim(&config.sysfs_root, config.pin, Direction::Out)?);
        info!("Claimed GPIO {} as indicator", config.pin);
        Ok(())
    }

    fn set(&mut self, on: bool) -> Result<(), HalError> {
        match &self.line {
            Some(line) => line.set_level(on),
            None => Err(HalError::CommunicationError(
                "indicator line not claimed".to_string(),
            )),
        }
    }

    fn shutdown(&mut self) -> Result<(), HalError> {
        if let Some(line) = self.line.take() {
            line.set_level(false)?;
        }
        Ok(())
    }
}
