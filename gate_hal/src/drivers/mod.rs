//! HAL driver implementations.
//!
//! - [`simulation`] - Scripted input waveform and a no-op indicator
//! - [`sysfs`] - Linux sysfs GPIO lines
//!
//! # Adding New Drivers
//!
//! 1. Create a new submodule under `drivers/`
//! 2. Implement `InputDriver` and/or `IndicatorDriver` from `gate_common::hal::driver`
//! 3. Register the factories in [`register_all_drivers`]

pub mod simulation;
pub mod sysfs;

use crate::driver_registry::DriverRegistry;

/// Register all built-in drivers with `registry`.
pub fn register_all_drivers(registry: &mut DriverRegistry) {
    registry.register_input("simulation", simulation::create_input);
    registry.register_input("sysfs", sysfs::create_input);

    registry.register_indicator("none", simulation::create_indicator);
    registry.register_indicator("sysfs", sysfs::create_indicator);
}
