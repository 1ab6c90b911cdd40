//! Configuration loading traits and types.
//!
//! This module provides a standardized way to load the gatewatch TOML
//! configuration file. Every section is optional and falls back to the
//! stock Centurion D5 interpretation.
//!
//! # Usage
//!
//! ```rust,no_run
//! use gate_common::config::{ConfigLoader, GateConfig, ConfigError};
//! use std::path::Path;
//!
//! fn main() -> Result<(), ConfigError> {
//!     let config = GateConfig::load(Path::new("gatewatch.toml"))?;
//!     config.validate()?;
//!     println!("Service: {}", config.shared.service_name);
//!     Ok(())
//! }
//! ```

use crate::consts::{DEFAULT_SERVICE_NAME, DEFAULT_SOUND, PUSHOVER_URL};
use crate::hal::config::{IndicatorConfig, InputConfig};
use crate::status::{Band, GateStatus, StatusRule, StatusTable, Ticks, default_rules};
use serde::{Deserialize, Serialize};
use std::path::Path;
use std::time::Duration;
use thiserror::Error;
use tracing::warn;

/// Error type for configuration loading operations.
#[derive(Debug, Clone, Error)]
pub enum ConfigError {
    /// Configuration file not found at specified path.
    #[error("Configuration file not found")]
    FileNotFound,

    /// TOML parsing failed.
    #[error("Failed to parse configuration: {0}")]
    ParseError(String),

    /// Semantic validation failed.
    #[error("Configuration validation failed: {0}")]
    ValidationError(String),
}

/// Log level for application logging.
///
/// Uses lowercase serde values for TOML compatibility.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Default)]
#[serde(rename_all = "lowercase")]
pub enum LogLevel {
    /// Most verbose, detailed tracing information.
    Trace,
    /// Debug information useful during development.
    Debug,
    /// General information about application operation.
    #[default]
    Info,
    /// Warning messages for potentially problematic situations.
    Warn,
    /// Error messages for serious problems.
    Error,
}

fn default_service_name() -> String {
    DEFAULT_SERVICE_NAME.to_string()
}

/// Common configuration fields (`[shared]`).
///
/// # TOML Example
///
/// ```toml
/// [shared]
/// log_level = "debug"
/// service_name = "gatewatch-front-gate"
/// ```
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SharedConfig {
    /// Logging verbosity level.
    #[serde(default)]
    pub log_level: LogLevel,

    /// Instance identifier, used in log output.
    #[serde(default = "default_service_name")]
    pub service_name: String,
}

impl SharedConfig {
    /// Validate the configuration.
    ///
    /// # Errors
    ///
    /// Returns `ConfigError::ValidationError` if `service_name` is empty.
    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.service_name.is_empty() {
            return Err(ConfigError::ValidationError(
                "service_name cannot be empty".to_string(),
            ));
        }
        Ok(())
    }
}

impl Default for SharedConfig {
    fn default() -> Self {
        Self {
            log_level: LogLevel::default(),
            service_name: default_service_name(),
        }
    }
}

/// How network connectivity is established before monitoring starts.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Default)]
#[serde(rename_all = "lowercase")]
pub enum NetworkMode {
    /// The operating system owns connectivity.
    #[default]
    Host,
    /// Associate with a wireless access point through NetworkManager.
    Nmcli,
}

fn default_retry_interval_s() -> f64 {
    5.0
}

/// Network association (`[network]`).
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct NetworkConfig {
    #[serde(default)]
    pub mode: NetworkMode,

    #[serde(default)]
    pub ssid: String,

    #[serde(default)]
    pub password: String,

    /// Delay between association attempts.
    #[serde(default = "default_retry_interval_s")]
    pub retry_interval_s: f64,
}

impl NetworkConfig {
    pub fn retry_interval(&self) -> Duration {
        seconds(self.retry_interval_s)
    }

    pub fn validate(&self) -> Result<(), ConfigError> {
        validate_positive("network.retry_interval_s", self.retry_interval_s)?;
        if self.mode == NetworkMode::Nmcli && self.ssid.is_empty() {
            return Err(ConfigError::ValidationError(
                "network.ssid is required when mode = \"nmcli\"".to_string(),
            ));
        }
        Ok(())
    }
}

impl Default for NetworkConfig {
    fn default() -> Self {
        Self {
            mode: NetworkMode::default(),
            ssid: String::new(),
            password: String::new(),
            retry_interval_s: default_retry_interval_s(),
        }
    }
}

/// Alert delivery backend.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Default)]
#[serde(rename_all = "lowercase")]
pub enum AlertKind {
    /// Pushover push notification service.
    #[default]
    Pushover,
    /// Log the alert instead of delivering it.
    Log,
}

fn default_url() -> String {
    PUSHOVER_URL.to_string()
}

fn default_sound() -> String {
    DEFAULT_SOUND.to_string()
}

fn default_timeout_s() -> f64 {
    10.0
}

/// Alert delivery (`[alert]`).
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct AlertConfig {
    #[serde(default)]
    pub kind: AlertKind,

    #[serde(default = "default_url")]
    pub url: String,

    /// Pushover application token.
    #[serde(default)]
    pub token: String,

    /// Pushover user key.
    #[serde(default)]
    pub user: String,

    /// Message title. Empty lets the service use the application name.
    #[serde(default)]
    pub title: String,

    #[serde(default = "default_sound")]
    pub sound: String,

    /// Request timeout for one delivery attempt.
    #[serde(default = "default_timeout_s")]
    pub timeout_s: f64,
}

impl AlertConfig {
    pub fn timeout(&self) -> Duration {
        seconds(self.timeout_s)
    }

    pub fn validate(&self) -> Result<(), ConfigError> {
        validate_positive("alert.timeout_s", self.timeout_s)?;
        if self.kind == AlertKind::Pushover {
            if self.url.is_empty() {
                return Err(ConfigError::ValidationError(
                    "alert.url cannot be empty".to_string(),
                ));
            }
            if self.token.is_empty() || self.user.is_empty() {
                return Err(ConfigError::ValidationError(
                    "alert.token and alert.user are required when kind = \"pushover\""
                        .to_string(),
                ));
            }
        }
        Ok(())
    }
}

impl Default for AlertConfig {
    fn default() -> Self {
        Self {
            kind: AlertKind::default(),
            url: default_url(),
            token: String::new(),
            user: String::new(),
            title: String::new(),
            sound: default_sound(),
            timeout_s: default_timeout_s(),
        }
    }
}

fn default_restart_delay_s() -> f64 {
    5.0
}

/// Outer loop behaviour (`[supervisor]`).
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct SupervisorConfig {
    /// Pause before re-entering network association after a fault.
    #[serde(default = "default_restart_delay_s")]
    pub restart_delay_s: f64,
}

impl SupervisorConfig {
    pub fn restart_delay(&self) -> Duration {
        seconds(self.restart_delay_s)
    }
}

impl Default for SupervisorConfig {
    fn default() -> Self {
        Self {
            restart_delay_s: default_restart_delay_s(),
        }
    }
}

/// Classification policy (`[classifier]`).
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct ClassifierConfig {
    /// Reject status tables whose bands leave measurable durations uncovered.
    /// When false, gaps are logged at load time and an unmatched window
    /// keeps the previous classification.
    #[serde(default)]
    pub require_full_coverage: bool,
}

/// One `[[status]]` entry as written in TOML (seconds, optional repeat label).
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct StatusRuleConfig {
    pub status: GateStatus,
    /// Inclusive band `[min, max]` in seconds.
    pub band: [f64; 2],
    pub label: String,
    /// Defaults to `label`.
    #[serde(default)]
    pub repeat_label: Option<String>,
    #[serde(default)]
    pub alertable: bool,
    #[serde(default)]
    pub cooldown_s: f64,
    #[serde(default)]
    pub confirm: bool,
}

impl StatusRuleConfig {
    fn to_rule(&self) -> Result<StatusRule, ConfigError> {
        let to_ticks = |secs: f64| {
            Ticks::from_secs_f64(secs).ok_or_else(|| {
                ConfigError::ValidationError(format!(
                    "band bound {secs} of '{}' is not a non-negative number",
                    self.status
                ))
            })
        };
        let cooldown = Duration::try_from_secs_f64(self.cooldown_s).map_err(|_| {
            ConfigError::ValidationError(format!(
                "cooldown_s of '{}' must be a non-negative number of seconds (got {})",
                self.status, self.cooldown_s
            ))
        })?;
        Ok(StatusRule {
            status: self.status,
            band: Band::new(to_ticks(self.band[0])?, to_ticks(self.band[1])?),
            label: self.label.clone(),
            repeat_label: self.repeat_label.clone().unwrap_or_else(|| self.label.clone()),
            alertable: self.alertable,
            cooldown,
            confirm: self.confirm,
        })
    }
}

/// Complete gatewatch configuration file.
///
/// # TOML Example
///
/// ```toml
/// [input]
/// driver = "sysfs"
/// pin = 25
///
/// [alert]
/// token = "app-token"
/// user = "user-key"
/// ```
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct GateConfig {
    #[serde(default)]
    pub shared: SharedConfig,

    #[serde(default)]
    pub input: InputConfig,

    #[serde(default)]
    pub indicator: IndicatorConfig,

    #[serde(default)]
    pub network: NetworkConfig,

    #[serde(default)]
    pub alert: AlertConfig,

    #[serde(default)]
    pub supervisor: SupervisorConfig,

    #[serde(default)]
    pub classifier: ClassifierConfig,

    /// Status table override, in priority order. Empty uses the stock table.
    #[serde(default)]
    pub status: Vec<StatusRuleConfig>,
}

impl GateConfig {
    /// Validate every section.
    ///
    /// The status table is built as part of validation, so a configuration
    /// that passes here always yields a table from [`status_table`](Self::status_table).
    pub fn validate(&self) -> Result<(), ConfigError> {
        self.shared.validate()?;
        self.input
            .validate()
            .map_err(|e| ConfigError::ValidationError(e.to_string()))?;
        self.indicator
            .validate()
            .map_err(|e| ConfigError::ValidationError(e.to_string()))?;
        self.network.validate()?;
        self.alert.validate()?;
        validate_positive("supervisor.restart_delay_s", self.supervisor.restart_delay_s)?;
        self.build_status_table()?;
        Ok(())
    }

    /// Build the status table, applying the coverage policy. Gaps are
    /// logged unless `[classifier] require_full_coverage` rejects them.
    pub fn status_table(&self) -> Result<StatusTable, ConfigError> {
        let table = self.build_status_table()?;
        for (first, last) in table.coverage_gaps() {
            warn!(
                "No status band covers {}..={}; such windows keep the previous classification",
                first, last
            );
        }
        Ok(table)
    }

    fn build_status_table(&self) -> Result<StatusTable, ConfigError> {
        let rules = if self.status.is_empty() {
            default_rules()
        } else {
            self.status
                .iter()
                .map(StatusRuleConfig::to_rule)
                .collect::<Result<Vec<_>, _>>()?
        };

        let table =
            StatusTable::new(rules).map_err(|e| ConfigError::ValidationError(e.to_string()))?;

        if self.classifier.require_full_coverage {
            table
                .require_full_coverage()
                .map_err(|e| ConfigError::ValidationError(e.to_string()))?;
        }
        Ok(table)
    }
}

/// Seconds to `Duration`, saturating where the value does not fit.
/// Validated configurations always fit.
fn seconds(value: f64) -> Duration {
    Duration::try_from_secs_f64(value).unwrap_or(Duration::MAX)
}

fn validate_positive(name: &str, value: f64) -> Result<(), ConfigError> {
    if value <= 0.0 || Duration::try_from_secs_f64(value).is_err() {
        return Err(ConfigError::ValidationError(format!(
            "{name} must be a positive number (got {value})"
        )));
    }
    Ok(())
}

/// Trait for loading configuration from TOML files.
///
/// This trait provides a default implementation that works with any type
/// implementing `serde::de::DeserializeOwned`.
///
/// # Contract
///
/// - Returns `ConfigError::FileNotFound` if the file does not exist
/// - Returns `ConfigError::ParseError` if TOML syntax is invalid
pub trait ConfigLoader: Sized + serde::de::DeserializeOwned {
    /// Load configuration from a TOML file.
    fn load(path: &Path) -> Result<Self, ConfigError> {
        let content = std::fs::read_to_string(path).map_err(|e| {
            if e.kind() == std::io::ErrorKind::NotFound {
                ConfigError::FileNotFound
            } else {
                ConfigError::ParseError(e.to_string())
            }
        })?;

        toml::from_str(&content).map_err(|e| ConfigError::ParseError(e.to_string()))
    }
}

// Blanket implementation for all types that implement DeserializeOwned.
impl<T: serde::de::DeserializeOwned> ConfigLoader for T {}
