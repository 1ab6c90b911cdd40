//! System-wide constants for the gatewatch workspace.
//!
//! Single source of truth for sampling cadence, window length and default
//! paths. Imported by all crates.

use static_assertions::const_assert_eq;
use std::time::Duration;

/// Sampling interval in milliseconds (10 Hz).
pub const TICK_MS: u64 = 100;

/// Sampling interval as Duration.
pub const TICK: Duration = Duration::from_millis(TICK_MS);

/// Observation window length in milliseconds.
pub const WINDOW_MS: u64 = 5_000;

/// Observation window length as Duration.
pub const WINDOW: Duration = Duration::from_millis(WINDOW_MS);

/// Number of ticks in one observation window.
pub const TICKS_PER_WINDOW: u32 = (WINDOW_MS / TICK_MS) as u32;

const_assert_eq!(WINDOW_MS % TICK_MS, 0);
const_assert_eq!(TICKS_PER_WINDOW, 50);

/// Indicator half-period of one progress flash (0.2 s off, 0.2 s on).
pub const FLASH_HALF_PERIOD: Duration = Duration::from_millis(200);

/// Progress flashes before network association starts.
pub const FLASHES_CONNECTING: u32 = 4;

/// Progress flashes after network association succeeded.
pub const FLASHES_CONNECTED: u32 = 2;

/// Progress flashes before an alert is dispatched.
pub const FLASHES_NOTIFYING: u32 = 3;

/// Default configuration file path.
pub const DEFAULT_CONFIG_PATH: &str = "/etc/gatewatch/gatewatch.toml";

/// Default service name.
pub const DEFAULT_SERVICE_NAME: &str = "gatewatch";

/// Default Pushover message endpoint.
pub const PUSHOVER_URL: &str = "https://api.pushover.net/1/messages.json";

/// Default Pushover notification sound.
pub const DEFAULT_SOUND: &str = "pushover";

/// User agent sent with alert requests.
pub const USER_AGENT: &str = "gatewatch";

/// Default sysfs GPIO root.
pub const SYSFS_GPIO_ROOT: &str = "/sys/class/gpio";

/// Default input pin (optocoupler on the gate motor status LED).
pub const DEFAULT_INPUT_PIN: u32 = 25;

/// Default indicator pin (on-board LED).
pub const DEFAULT_INDICATOR_PIN: u32 = 2;
