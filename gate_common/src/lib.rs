//! Gatewatch Common Library
//!
//! This crate provides shared constants, the gate status table and
//! configuration loading utilities for all gatewatch workspace crates.
//!
//! # Module Structure
//!
//! - [`consts`] - Sampling cadence, window length and default paths
//! - [`status`] - `GateStatus`, duration bands and the status table
//! - [`hal`] - Driver traits and errors for input and indicator lines
//! - [`config`] - Configuration loading traits and types
//! - [`prelude`] - Common re-exports for convenience
//!
//! # Usage
//!
//! ```toml
//! [dependencies]
//! gate = { package = "gate_common", path = "../gate_common" }
//! ```
//!
//! ```rust
//! use gate_common::status::{GateStatus, StatusTable, Ticks};
//!
//! let table = StatusTable::default();
//! assert_eq!(table.classify(Ticks(30)), Some(GateStatus::Open));
//! ```

pub mod config;
pub mod consts;
pub mod hal;
pub mod prelude;
pub mod status;
