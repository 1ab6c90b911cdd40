//! Driver registry for HAL drivers.
//!
//! Provides a `DriverRegistry` struct for registering and retrieving input
//! and indicator driver factories. This uses constructor-injection rather
//! than global state.

use gate_common::hal::config::{IndicatorConfig, InputConfig};
use gate_common::hal::driver::{
    HalError, IndicatorDriver, IndicatorFactory, InputDriver, InputFactory,
};
use std::collections::HashMap;
use tracing::info;

use crate::drivers::register_all_drivers;

/// Registry of available HAL drivers.
///
/// Constructed at startup, populated via `register_*()`, and consulted when
/// the monitor opens its lines. No global state, testable in isolation.
pub struct DriverRegistry {
    inputs: HashMap<&'static str, InputFactory>,
    indicators: HashMap<&'static str, IndicatorFactory>,
}

impl DriverRegistry {
    /// Create an empty registry.
    pub fn new() -> Self {
        Self {
            inputs: HashMap::new(),
            indicators: HashMap::new(),
        }
    }

    /// Create a registry holding every built-in driver.
    pub fn with_builtin_drivers() -> Self {
        let mut registry = Self::new();
        register_all_drivers(&mut registry);
        registry
    }

    /// Register an input driver factory.
    ///
    /// # Panics
    /// Panics if an input driver with the same name is already registered.
    pub fn register_input(&mut self, name: &'static str, factory: InputFactory) {
        if self.inputs.contains_key(name) {
            panic!("Input driver '{name}' is already registered");
        }
        self.inputs.insert(name, factory);
    }

    /// Register an indicator driver factory.
    ///
    /// # Panics
    /// Panics if an indicator driver with the same name is already registered.
    pub fn register_indicator(&mut self, name: &'static str, factory: IndicatorFactory) {
        if self.indicators.contains_key(name) {
            panic!("Indicator driver '{name}' is already registered");
        }
        self.indicators.insert(name, factory);
    }

    /// Create and initialize the input driver named in `config.driver`.
    ///
    /// # Errors
    /// Returns `HalError::DriverNotFound` if no such driver is registered, or
    /// the driver's own error if initialization fails.
    pub fn open_input(&self, config: &InputConfig) -> Result<Box<dyn InputDriver>, HalError> {
        let factory = self
            .inputs
            .get(config.driver.as_str())
            .copied()
            .ok_or_else(|| HalError::DriverNotFound(config.driver.clone()))?;
        let mut driver = factory();
        driver.init(config)?;
        info!("Input driver '{}' ready on line {}", driver.name(), config.pin);
        Ok(driver)
    }

    /// Create and initialize the indicator driver named in `config.driver`.
    ///
    /// # Errors
    /// Returns `HalError::DriverNotFound` if no such driver is registered, or
    /// the driver's own error if initialization fails.
    pub fn open_indicator(
        &self,
        config: &IndicatorConfig,
    ) -> Result<Box<dyn IndicatorDriver>, HalError> {
        let factory = self
            .indicators
            .get(config.driver.as_str())
            .copied()
            .ok_or_else(|| HalError::DriverNotFound(config.driver.clone()))?;
        let mut driver = factory();
        driver.init(config)?;
        info!("Indicator driver '{}' ready", driver.name());
        Ok(driver)
    }

    /// List registered input driver names.
    pub fn list_inputs(&self) -> Vec<&'static str> {
        self.inputs.keys().copied().collect()
    }

    /// List registered indicator driver names.
    pub fn list_indicators(&self) -> Vec<&'static str> {
        self.indicators.keys().copied().collect()
    }
}

impl Default for DriverRegistry {
    fn default() -> Self {
        Self::new()
    }
}
