//! # gatewatch
//!
//! Gate motor status monitor. Samples the controller's status LED through
//! an optocoupler, classifies each 5 s window and pushes alerts.
//!
//! # Usage
//!
//! ```bash
//! # Production: config from /etc/gatewatch/gatewatch.toml
//! gatewatch
//!
//! # Bench run: scripted input, alerts only logged
//! gatewatch --config config/gatewatch.toml --simulate --dry-run -v
//! ```

#![deny(warnings)]

use clap::Parser;
use gate::config::{AlertKind, ConfigError, ConfigLoader, GateConfig, LogLevel};
use gate::consts::DEFAULT_CONFIG_PATH;
use gate_hal::DriverRegistry;
use gate_monitor::clock::SystemClock;
use gate_monitor::indicator::Indicator;
use gate_monitor::{Monitor, Supervisor, network, notifier};
use std::path::{Path, PathBuf};
use tracing::{Level, error, info, info_span, warn};
use tracing_subscriber::EnvFilter;

/// gatewatch - gate motor status LED monitor
#[derive(Parser, Debug)]
#[command(name = "gatewatch")]
#[command(version)]
#[command(about = "Infers gate motor status from its status LED and sends alerts")]
#[command(long_about = None)]
struct Args {
    /// Path to the configuration file. A missing file means built-in defaults.
    #[arg(short, long, default_value = DEFAULT_CONFIG_PATH)]
    config: PathBuf,

    /// Force the simulation input driver
    #[arg(short = 's', long)]
    simulate: bool,

    /// Log alerts instead of delivering them
    #[arg(long)]
    dry_run: bool,

    /// Enable verbose logging
    #[arg(short, long)]
    verbose: bool,

    /// Output logs in JSON format
    #[arg(long)]
    json: bool,
}

fn main() {
    if let Err(e) = run() {
        error!("gatewatch startup failed: {}", e);
        std::process::exit(1);
    }
}

fn run() -> Result<(), Box<dyn std::error::Error>> {
    let args = Args::parse();

    let loaded = load_config(&args.config);
    let level = loaded
        .as_ref()
        .map(|config| config.shared.log_level)
        .unwrap_or_default();
    setup_tracing(&args, level);

    let mut config = loaded?;
    apply_overrides(&args, &mut config);
    config.validate()?;

    let _span = info_span!("gatewatch", service = %config.shared.service_name).entered();
    info!("gatewatch v{} starting...", env!("CARGO_PKG_VERSION"));

    let table = config.status_table()?;

    let registry = DriverRegistry::with_builtin_drivers();
    let input = registry.open_input(&config.input)?;
    let indicator = registry.open_indicator(&config.indicator)?;
    let notifier = notifier::from_config(&config.alert)?;
    let link = network::from_config(&config.network);

    let monitor = Monitor::new(
        input,
        Indicator::new(indicator),
        notifier,
        table,
        SystemClock::new(),
    );
    let mut supervisor = Supervisor::new(monitor, link, config.supervisor.restart_delay());
    supervisor.run()
}

/// Load the configuration file, falling back to defaults if it is missing.
fn load_config(path: &Path) -> Result<GateConfig, ConfigError> {
    match GateConfig::load(path) {
        Err(ConfigError::FileNotFound) => {
            // Tracing is not up yet; reported once it is.
            Ok(GateConfig::default())
        }
        other => other,
    }
}

fn apply_overrides(args: &Args, config: &mut GateConfig) {
    if !args.config.exists() {
        warn!("{} not found, using built-in defaults", args.config.display());
    }
    if args.simulate {
        info!("Simulation mode enabled");
        config.input.driver = "simulation".to_string();
    }
    if args.dry_run {
        info!("Dry run: alerts are logged, not delivered");
        config.alert.kind = AlertKind::Log;
    }
}

fn to_level(level: LogLevel) -> Level {
    match level {
        LogLevel::Trace => Level::TRACE,
        LogLevel::Debug => Level::DEBUG,
        LogLevel::Info => Level::INFO,
        LogLevel::Warn => Level::WARN,
        LogLevel::Error => Level::ERROR,
    }
}

/// Setup tracing subscriber based on CLI arguments and `[shared] log_level`.
fn setup_tracing(args: &Args, level: LogLevel) {
    let level = if args.verbose {
        Level::DEBUG
    } else {
        to_level(level)
    };

    let filter = EnvFilter::from_default_env().add_directive(level.into());

    if args.json {
        tracing_subscriber::fmt()
            .with_env_filter(filter)
            .json()
            .init();
    } else {
        tracing_subscriber::fmt().with_env_filter(filter).init();
    }
}
