//! Alert delivery.
//!
//! - [`PushoverNotifier`] - HTTP POST to the Pushover message API
//! - [`LogNotifier`] - Dry run: log the alert and report success
//!
//! The monitor does not retry or otherwise act on a failed delivery.

use crate::classifier::Alert;
use crate::error::NotifyError;
use gate::config::{AlertConfig, AlertKind};
use gate::consts::USER_AGENT;
use reqwest::blocking::Client;
use serde::Deserialize;
use tracing::{debug, info};

/// Alert sink.
pub trait Notifier {
    /// Short backend name for logs.
    fn name(&self) -> &'static str;

    /// Deliver one alert.
    fn send(&mut self, alert: &Alert) -> Result<(), NotifyError>;
}

/// Build the notifier selected by `[alert] kind`.
pub fn from_config(config: &AlertConfig) -> Result<Box<dyn Notifier>, NotifyError> {
    let notifier: Box<dyn Notifier> = match config.kind {
        AlertKind::Pushover => Box::new(PushoverNotifier::new(config)?),
        AlertKind::Log => Box::new(LogNotifier::new(&config.title)),
    };
    Ok(notifier)
}

/// Body of a Pushover API response.
#[derive(Debug, Deserialize)]
struct PushoverResponse {
    status: i64,
    #[serde(default)]
    errors: Vec<String>,
    #[serde(default)]
    request: Option<String>,
}

/// Pushover message API client.
pub struct PushoverNotifier {
    client: Client,
    url: String,
    token: String,
    user: String,
    title: String,
    sound: String,
}

impl PushoverNotifier {
    pub fn new(config: &AlertConfig) -> Result<Self, NotifyError> {
        let client = Client::builder()
            .user_agent(USER_AGENT)
            .timeout(config.timeout())
            .build()
            .map_err(|e| NotifyError::Transport(e.to_string()))?;

        Ok(Self {
            client,
            url: config.url.clone(),
            token: config.token.clone(),
            user: config.user.clone(),
            title: config.title.clone(),
            sound: config.sound.clone(),
        })
    }

    fn form<'a>(&'a self, alert: &'a Alert) -> Vec<(&'static str, &'a str)> {
        let mut form = vec![
            ("message", alert.message.as_str()),
            ("token", self.token.as_str()),
            ("user", self.user.as_str()),
            ("title", self.title.as_str()),
        ];
        if !self.sound.is_empty() {
            form.push(("sound", self.sound.as_str()));
        }
        form
    }
}

impl Notifier for PushoverNotifier {
    fn name(&self) -> &'static str {
        "pushover"
    }

    fn send(&mut self, alert: &Alert) -> Result<(), NotifyError> {
        let response = self
            .client
            .post(&self.url)
            .form(&self.form(alert))
            .send()
            .map_err(|e| NotifyError::Transport(e.to_string()))?;

        let status = response.status();
        let body = response
            .text()
            .map_err(|e| NotifyError::Transport(e.to_string()))?;

        if !status.is_success() {
            return Err(NotifyError::Http {
                status: status.as_u16(),
                body,
            });
        }

        let parsed: PushoverResponse = serde_json::from_str(&body)
            .map_err(|e| NotifyError::Rejected(format!("unreadable response: {e}")))?;
        if parsed.status != 1 {
            return Err(NotifyError::Rejected(parsed.errors.join("; ")));
        }

        debug!(
            "Pushover accepted request {}",
            parsed.request.as_deref().unwrap_or("-")
        );
        Ok(())
    }
}

/// Dry-run notifier.
#[derive(Debug, Default)]
pub struct LogNotifier {
    title: String,
    sent: u64,
}

impl LogNotifier {
    pub fn new(title: &str) -> Self {
        Self {
            title: title.to_string(),
            sent: 0,
        }
    }

    /// Alerts logged so far.
    pub fn sent(&self) -> u64 {
        self.sent
    }
}

impl Notifier for LogNotifier {
    fn name(&self) -> &'static str {
        "log"
    }

    fn send(&mut self, alert: &Alert) -> Result<(), NotifyError> {
        self.sent += 1;
        info!(
            status = %alert.status,
            repeat = alert.repeat,
            title = %self.title,
            "ALERT: {}",
            alert.message
        );
        Ok(())
    }
}
