//! # Gate Monitor
//!
//! Infers the state of a gate motor controller from the duty cycle of its
//! status LED and sends alerts when it changes.
//!
//! ```text
//! ┌────────────┐   Ticks   ┌────────────┐  Alert  ┌────────────┐
//! │  Sampler   │ ────────► │ Classifier │ ──────► │  Notifier  │
//! │ (5 s/50 t) │           │ confirm +  │         │ (pushover) │
//! └─────▲──────┘           │ cooldown   │         └────────────┘
//!       │ read()           └────────────┘
//! ┌─────┴──────┐
//! │InputDriver │   Monitor = one window at a time, forever
//! └────────────┘   Supervisor = connect, monitor, restart on fault
//! ```
//!
//! All waiting goes through a [`clock::Clock`], so the whole pipeline runs
//! instantly under a [`clock::ManualClock`] in tests.

pub mod classifier;
pub mod clock;
pub mod error;
pub mod indicator;
pub mod monitor;
pub mod network;
pub mod notifier;
pub mod sampler;
pub mod supervisor;

pub use classifier::{Alert, Classifier, Decision, MonitorState};
pub use error::{MonitorError, NetworkError, NotifyError};
pub use monitor::Monitor;
pub use supervisor::Supervisor;
