//! Error types for the monitor.
//!
//! Only [`MonitorError`] escapes the monitoring loop; the supervisor logs
//! it and restarts from network association. Alert failures never do.

use gate::hal::driver::HalError;
use thiserror::Error;

/// Alert delivery failure. Logged and dropped by the monitor.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum NotifyError {
    /// Request could not be built or sent.
    #[error("alert request failed: {0}")]
    Transport(String),

    /// Service answered with a non-success HTTP status.
    #[error("alert service returned HTTP {status}: {body}")]
    Http { status: u16, body: String },

    /// Service accepted the request but rejected the message.
    #[error("alert rejected: {0}")]
    Rejected(String),
}

/// Network association failure.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum NetworkError {
    /// The association tool could not be started.
    #[error("failed to run {program}: {reason}")]
    Spawn { program: String, reason: String },
}

/// Fault that unwinds out of the monitoring loop.
#[derive(Debug, Clone, Error)]
pub enum MonitorError {
    #[error("HAL error: {0}")]
    Hal(#[from] HalError),

    #[error("network error: {0}")]
    Network(#[from] NetworkError),
}
