//! Prelude module for common re-exports.
//!
//! ```rust
//! use gate_common::prelude::*;
//! ```

// ─── Logging ────────────────────────────────────────────────────────
pub use crate::config::LogLevel;

// ─── Configuration ──────────────────────────────────────────────────
pub use crate::config::{
    AlertConfig, AlertKind, ConfigError, ConfigLoader, GateConfig, NetworkConfig, NetworkMode,
    SharedConfig,
};

// ─── System Constants ───────────────────────────────────────────────
pub use crate::consts::{TICK, TICKS_PER_WINDOW, WINDOW};

// ─── Classification ─────────────────────────────────────────────────
pub use crate::status::{Band, GateStatus, StatusRule, StatusTable, Ticks};

// ─── HAL ────────────────────────────────────────────────────────────
pub use crate::hal::config::{IndicatorConfig, InputConfig, PatternSegment};
pub use crate::hal::driver::{HalError, IndicatorDriver, InputDriver};
