//! Simulation driver module.
//!
//! Software stand-ins for development and testing without a gate motor:
//! a scripted input waveform and an indicator that only tracks its state.

mod indicator;
mod input;

pub use indicator::SimulatedIndicator;
pub use input::SimulatedInput;

use gate_common::hal::driver::{IndicatorDriver, InputDriver};

/// Factory function to create a simulated input line.
pub fn create_input() -> Box<dyn InputDriver> {
    Box::new(SimulatedInput::new())
}

/// Factory function to create a no-op indicator.
pub fn create_indicator() -> Box<dyn IndicatorDriver> {
    Box::new(SimulatedIndicator::new())
}
