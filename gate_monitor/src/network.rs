//! Network association.
//!
//! Called at the top of every outer-loop iteration. Implementations block,
//! retrying at the configured interval, until the link is up; only a failure
//! to even run the association tool is reported as an error.

use crate::clock::Clock;
use crate::error::NetworkError;
use gate::config::{NetworkConfig, NetworkMode};
use std::process::Command;
use std::time::Duration;
use tracing::{info, warn};

/// Connectivity precondition for alert delivery.
pub trait NetworkLink {
    fn name(&self) -> &'static str;

    /// Block until connected.
    fn ensure_connected(&mut self, clock: &dyn Clock) -> Result<(), NetworkError>;
}

/// Build the link selected by `[network] mode`.
pub fn from_config(config: &NetworkConfig) -> Box<dyn NetworkLink> {
    match config.mode {
        NetworkMode::Host => Box::new(HostLink),
        NetworkMode::Nmcli => Box::new(NmcliLink::new(config)),
    }
}

/// Connectivity managed by the host; nothing to do.
#[derive(Debug, Default, Clone, Copy)]
pub struct HostLink;

impl NetworkLink for HostLink {
    fn name(&self) -> &'static str {
        "host"
    }

    fn ensure_connected(&mut self, _clock: &dyn Clock) -> Result<(), NetworkError> {
        Ok(())
    }
}

/// Wireless association through `nmcli device wifi connect`.
#[derive(Debug, Clone)]
pub struct NmcliLink {
    program: String,
    args: Vec<String>,
    ssid: String,
    retry_interval: Duration,
}

impl NmcliLink {
    pub fn new(config: &NetworkConfig) -> Self {
        let mut args = vec![
            "device".to_string(),
            "wifi".to_string(),
            "connect".to_string(),
            config.ssid.clone(),
        ];
        if !config.password.is_empty() {
            args.push("password".to_string());
            args.push(config.password.clone());
        }
        Self {
            program: "nmcli".to_string(),
            args,
            ssid: config.ssid.clone(),
            retry_interval: config.retry_interval(),
        }
    }

    /// Replace the association command.
    pub fn with_command(mut self, program: impl Into<String>, args: Vec<String>) -> Self {
        self.program = program.into();
        self.args = args;
        self
    }
}

impl NetworkLink for NmcliLink {
    fn name(&self) -> &'static str {
        "nmcli"
    }

    fn ensure_connected(&mut self, clock: &dyn Clock) -> Result<(), NetworkError> {
        let mut attempt: u32 = 0;
        loop {
            attempt += 1;
            let output = Command::new(&self.program)
                .args(&self.args)
                .output()
                .map_err(|e| NetworkError::Spawn {
                    program: self.program.clone(),
                    reason: e.to_string(),
                })?;

            if output.status.success() {
                info!("Connected to '{}' (attempt {})", self.ssid, attempt);
                return Ok(());
            }

            warn!(
                "Connecting to '{}' failed ({}): {}",
                self.ssid,
                output.status,
                String::from_utf8_lossy(&output.stderr).trim()
            );
            clock.sleep(self.retry_interval);
        }
    }
}
