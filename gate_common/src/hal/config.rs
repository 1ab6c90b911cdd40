//! HAL configuration types.
//!
//! - `InputConfig` - The `[input]` section: monitored line and its driver
//! - `IndicatorConfig` - The `[indicator]` section: progress LED and its driver
//! - `PatternSegment` - One step of a simulated input waveform

use crate::consts::{DEFAULT_INDICATOR_PIN, DEFAULT_INPUT_PIN, SYSFS_GPIO_ROOT};
use crate::hal::driver::HalError;
use serde::{Deserialize, Serialize};
use std::path::PathBuf;

fn default_input_driver() -> String {
    "sysfs".to_string()
}

fn default_indicator_driver() -> String {
    "none".to_string()
}

fn default_input_pin() -> u32 {
    DEFAULT_INPUT_PIN
}

fn default_indicator_pin() -> u32 {
    DEFAULT_INDICATOR_PIN
}

fn default_sysfs_root() -> PathBuf {
    PathBuf::from(SYSFS_GPIO_ROOT)
}

/// One segment of a simulated waveform: hold `level` for `ticks` samples.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct PatternSegment {
    pub level: bool,
    pub ticks: u32,
}

/// Monitored input line (`[input]`).
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct InputConfig {
    /// Driver name ("sysfs" or "simulation").
    #[serde(default = "default_input_driver")]
    pub driver: String,

    /// GPIO line number.
    #[serde(default = "default_input_pin")]
    pub pin: u32,

    /// Treat a low level as asserted.
    #[serde(default)]
    pub active_low: bool,

    /// Root of the sysfs GPIO tree.
    #[serde(default = "default_sysfs_root")]
    pub sysfs_root: PathBuf,

    /// Repeating waveform played back by the simulation driver.
    /// An empty pattern holds the line low.
    #[serde(default)]
    pub pattern: Vec<PatternSegment>,
}

impl InputConfig {
    /// Validate the input section.
    pub fn validate(&self) -> Result<(), HalError> {
        if self.driver.is_empty() {
            return Err(HalError::ConfigError("input driver cannot be empty".to_string()));
        }
        if let Some(idx) = self.pattern.iter().position(|seg| seg.ticks == 0) {
            return Err(HalError::ConfigError(format!(
                "input pattern segment {idx} has zero length"
            )));
        }
        Ok(())
    }
}

impl Default for InputConfig {
    fn default() -> Self {
        Self {
            driver: default_input_driver(),
            pin: DEFAULT_INPUT_PIN,
            active_low: false,
            sysfs_root: default_sysfs_root(),
            pattern: Vec::new(),
        }
    }
}

/// Progress indicator output (`[indicator]`).
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct IndicatorConfig {
    /// Driver name ("none" or "sysfs").
    #[serde(default = "default_indicator_driver")]
    pub driver: String,

    /// GPIO line number.
    #[serde(default = "default_indicator_pin")]
    pub pin: u32,

    /// Root of the sysfs GPIO tree.
    #[serde(default = "default_sysfs_root")]
    pub sysfs_root: PathBuf,
}

impl IndicatorConfig {
    /// Validate the indicator section.
    pub fn validate(&self) -> Result<(), HalError> {
        if self.driver.is_empty() {
            return Err(HalError::ConfigError(
                "indicator driver cannot be empty".to_string(),
            ));
        }
        Ok(())
    }
}

impl Default for IndicatorConfig {
    fn default() -> Self {
        Self {
            driver: default_indicator_driver(),
            pin: DEFAULT_INDICATOR_PIN,
            sysfs_root: default_sysfs_root(),
        }
    }
}
