//! Hardware abstraction layer traits and configuration.
//!
//! This module contains the driver traits and configuration types for the
//! monitored input line and the progress indicator output.

pub mod config;
pub mod driver;
