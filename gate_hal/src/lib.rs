//! # Gatewatch HAL Library
//!
//! Driver modules for the monitored input line and the progress indicator.
//! Drivers implement the `InputDriver` / `IndicatorDriver` traits defined in
//! `gate_common::hal::driver`.
//!
//! # Module Structure
//!
//! - [`driver_registry`] - Driver factory registration
//! - [`drivers`] - Built-in driver implementations
//!
//! # Architecture
//!
//! ```text
//! ┌───────────────────────────────────────────────────────────┐
//! │                     gate_hal                              │
//! │  ┌──────────────────┐        ┌─────────────────────────┐  │
//! │  │ DriverRegistry   │───────►│ InputDriver (trait obj) │  │
//! │  │  name → factory  │        ├─────────────────────────┤  │
//! │  │                  │───────►│ IndicatorDriver         │  │
//! │  └──────────────────┘        └─────────────────────────┘  │
//! │        "simulation"  "sysfs"  "none"                      │
//! └───────────────────────────────────────────────────────────┘
//! ```

#![deny(missing_docs)]

pub mod driver_registry;
pub mod drivers;

// Re-export key types for convenience
pub use crate::driver_registry::DriverRegistry;
