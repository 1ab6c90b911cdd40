//! HAL driver traits and error types.
//!
//! This module defines:
//! - `InputDriver` trait - Interface for the monitored binary input line
//! - `IndicatorDriver` trait - Interface for the progress indicator output
//! - `HalError` enum - Error types for HAL operations
//! - `InputFactory` / `IndicatorFactory` type aliases - Factory function types

use crate::hal::config::{IndicatorConfig, InputConfig};
use thiserror::Error;

/// Error types for HAL operations.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum HalError {
    /// Driver initialization failed
    #[error("Initialization failed: {0}")]
    InitFailed(String),

    /// Configuration error
    #[error("Configuration error: {0}")]
    ConfigError(String),

    /// Hardware communication error
    #[error("Hardware communication error: {0}")]
    CommunicationError(String),

    /// Driver not found
    #[error("Driver not found: {0}")]
    DriverNotFound(String),
}

/// Factory function type for creating input driver instances.
pub type InputFactory = fn() -> Box<dyn InputDriver>;

/// Factory function type for creating indicator driver instances.
pub type IndicatorFactory = fn() -> Box<dyn IndicatorDriver>;

/// Trait defining the interface for the monitored input line.
///
/// # Lifecycle
///
/// 1. `init()` - Called once before sampling starts
/// 2. `read()` - Called every tick (10 Hz) by the sampler
/// 3. `shutdown()` - Called when the driver is dropped from service
pub trait InputDriver: Send {
    /// Returns the driver's unique identifier (e.g., "simulation", "sysfs").
    fn name(&self) -> &'static str;

    /// Initialize the driver from the `[input]` configuration section.
    ///
    /// # Errors
    /// Return `HalError::InitFailed` if the line cannot be claimed.
    fn init(&mut self, config: &InputConfig) -> Result<(), HalError>;

    /// Sample the line. `true` means asserted (status LED lit).
    ///
    /// # Errors
    /// Return `HalError::CommunicationError` if the line cannot be read.
    fn read(&mut self) -> Result<bool, HalError>;

    /// Release the line.
    /// Default: no-op.
    fn shutdown(&mut self) -> Result<(), HalError> {
        Ok(())
    }
}

/// Trait defining the interface for the progress indicator output.
///
/// The indicator is purely informational; callers log and ignore its errors.
pub trait IndicatorDriver: Send {
    /// Returns the driver's unique identifier (e.g., "none", "sysfs").
    fn name(&self) -> &'static str;

    /// Initialize the driver from the `[indicator]` configuration section.
    fn init(&mut self, config: &IndicatorConfig) -> Result<(), HalError>;

    /// Switch the indicator on or off.
    fn set(&mut self, on: bool) -> Result<(), HalError>;

    /// Release the output.
    /// Default: no-op.
    fn shutdown(&mut self) -> Result<(), HalError> {
        Ok(())
    }
}
