//! Registry-level driver tests.
//!
//! Opens the built-in drivers through `DriverRegistry` the same way the
//! monitor does, against a fake sysfs tree.

use gate_common::hal::config::{IndicatorConfig, InputConfig, PatternSegment};
use gate_common::hal::driver::HalError;
use gate_hal::DriverRegistry;
use std::fs;
use std::path::Path;
use tempfile::TempDir;

/// Create `gpio<pin>/{direction,value}` under `root`.
fn export_fake_line(root: &Path, pin: u32, value: &str) {
    let dir = root.join(format!("gpio{pin}"));
    fs::create_dir_all(&dir).unwrap();
    fs::write(dir.join("direction"), "in").unwrap();
    fs::write(dir.join("value"), value).unwrap();
}

#[test]
fn sysfs_input_reads_through_registry() {
    let root = TempDir::new().unwrap();
    export_fake_line(root.path(), 25, "1\n");

    let registry = DriverRegistry::with_builtin_drivers();
    let config = InputConfig {
        driver: "sysfs".to_string(),
        pin: 25,
        sysfs_root: root.path().to_path_buf(),
        ..InputConfig::default()
    };
    let mut input = registry.open_input(&config).unwrap();
    assert_eq!(input.name(), "sysfs");
    assert_eq!(input.read(), Ok(true));

    fs::write(root.path().join("gpio25/value"), "0\n").unwrap();
    assert_eq!(input.read(), Ok(false));
    assert!(input.shutdown().is_ok());
}

#[test]
fn sysfs_input_active_low_inverts() {
    let root = TempDir::new().unwrap();
    export_fake_line(root.path(), 17, "0\n");

    let registry = DriverRegistry::with_builtin_drivers();
    let config = InputConfig {
        driver: "sysfs".to_string(),
        pin: 17,
        active_low: true,
        sysfs_root: root.path().to_path_buf(),
        ..InputConfig::default()
    };
    let mut input = registry.open_input(&config).unwrap();
    assert_eq!(input.read(), Ok(true));
}

#[test]
fn sysfs_input_missing_line_fails_to_open() {
    let root = TempDir::new().unwrap();
    let registry = DriverRegistry::with_builtin_drivers();
    let config = InputConfig {
        driver: "sysfs".to_string(),
        pin: 25,
        sysfs_root: root.path().join("absent"),
        ..InputConfig::default()
    };
    assert!(matches!(
        registry.open_input(&config),
        Err(HalError::InitFailed(_))
    ));
}

#[test]
fn sysfs_indicator_drives_value_and_clears_on_shutdown() {
    let root = TempDir::new().unwrap();
    export_fake_line(root.path(), 2, "0\n");

    let registry = DriverRegistry::with_builtin_drivers();
    let config = IndicatorConfig {
        driver: "sysfs".to_string(),
        pin: 2,
        sysfs_root: root.path().to_path_buf(),
    };
    let mut led = registry.open_indicator(&config).unwrap();
    led.set(true).unwrap();
    assert!(fs::read_to_string(root.path().join("gpio2/value")).unwrap().starts_with('1'));

    led.shutdown().unwrap();
    assert!(fs::read_to_string(root.path().join("gpio2/value")).unwrap().starts_with('0'));
}

#[test]
fn simulation_input_plays_configured_pattern() {
    let registry = DriverRegistry::with_builtin_drivers();
    let config = InputConfig {
        driver: "simulation".to_string(),
        pattern: vec![
            PatternSegment { level: false, ticks: 2 },
            PatternSegment { level: true, ticks: 1 },
        ],
        ..InputConfig::default()
    };
    let mut input = registry.open_input(&config).unwrap();
    let levels: Vec<bool> = (0..6).map(|_| input.read().unwrap()).collect();
    assert_eq!(levels, vec![false, false, true, false, false, true]);
}

#[test]
fn none_indicator_accepts_everything() {
    let registry = DriverRegistry::with_builtin_drivers();
    let mut led = registry.open_indicator(&IndicatorConfig::default()).unwrap();
    assert_eq!(led.name(), "none");
    assert!(led.set(true).is_ok());
    assert!(led.set(false).is_ok());
}

#[test]
fn unknown_driver_name_is_reported() {
    let registry = DriverRegistry::with_builtin_drivers();
    let config = InputConfig {
        driver: "ethercat".to_string(),
        ..InputConfig::default()
    };
    match registry.open_input(&config) {
        Err(HalError::DriverNotFound(name)) => assert_eq!(name, "ethercat"),
        other => panic!("expected DriverNotFound, got {:?}", other.map(|d| d.name())),
    }
}
