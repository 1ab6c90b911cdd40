//! Low-level sysfs GPIO line access.
//!
//! ```text
//! <root>/export          ← write "<pin>" to create gpio<pin>/
//! <root>/gpio<pin>/direction   "in" | "out"
//! <root>/gpio<pin>/value       "0" | "1"
//! ```

use gate_common::hal::driver::HalError;
use std::fs::{self, File, OpenOptions};
use std::os::unix::fs::FileExt;
use std::path::{Path, PathBuf};
use tracing::debug;

/// Line direction.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Direction {
    /// Input line.
    In,
    /// Output line, driven low on claim.
    Out,
}

impl Direction {
    fn as_str(self) -> &'static str {
        match self {
            Direction::In => "in",
            Direction::Out => "out",
        }
    }
}

/// A claimed sysfs GPIO line with its `value` file held open.
#[derive(Debug)]
pub struct SysfsLine {
    pin: u32,
    value: File,
}

impl SysfsLine {
    /// Export `pin` under `root` if needed, set its direction and open `value`.
    pub fn claim(root: &Path, pin: u32, direction: Direction) -> Result<Self, HalError> {
        let line_dir = line_dir(root, pin);
        if !line_dir.exists() {
            debug!("Exporting GPIO {} via {}", pin, root.display());
            fs::write(root.join("export"), pin.to_string()).map_err(|e| {
                HalError::InitFailed(format!("failed to export GPIO {pin}: {e}"))
            })?;
        }

        // "low" switches to output with the line already driven low.
        let dir_value = match direction {
            Direction::In => direction.as_str(),
            Direction::Out => "low",
        };
        fs::write(line_dir.join("direction"), dir_value).map_err(|e| {
            HalError::InitFailed(format!(
                "failed to set GPIO {pin} direction to {}: {e}",
                direction.as_str()
            ))
        })?;

        let value = OpenOptions::new()
            .read(true)
            .write(direction == Direction::Out)
            .open(line_dir.join("value"))
            .map_err(|e| HalError::InitFailed(format!("failed to open GPIO {pin} value: {e}")))?;

        Ok(Self { pin, value })
    }

    /// Line number.
    pub fn pin(&self) -> u32 {
        self.pin
    }

    /// Read the electrical level.
    pub fn level(&self) -> Result<bool, HalError> {
        let mut buf = [0u8; 1];
        let n = self.value.read_at(&mut buf, 0).map_err(|e| {
            HalError::CommunicationError(format!("failed to read GPIO {}: {e}", self.pin))
        })?;
        match (n, buf[0]) {
            (1, b'0') => Ok(false),
            (1, b'1') => Ok(true),
            _ => Err(HalError::CommunicationError(format!(
                "unexpected value on GPIO {}: {:?}",
                self.pin,
                &buf[..n]
            ))),
        }
    }

    /// Drive the electrical level.
    pub fn set_level(&self, high: bool) -> Result<(), HalError> {
        let byte: &[u8] = if high { b"1" } else { b"0" };
        self.value.write_at(byte, 0).map_err(|e| {
            HalError::CommunicationError(format!("failed to write GPIO {}: {e}", self.pin))
        })?;
        Ok(())
    }
}

fn line_dir(root: &Path, pin: u32) -> PathBuf {
    root.join(format!("gpio{pin}"))
}
