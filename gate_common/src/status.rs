//! Gate status classification.
//!
//! A window's asserted duration is classified against an ordered table of
//! duration bands. Bands may overlap: the **last** matching entry in table
//! order wins, so table order is part of the configuration.
//!
//! ```text
//!  ticks  0    5   10   15   20        ...        50
//!         │Closed
//!              ├─PowerFault─┤
//!                            ├────────── Open ───────────
//! ```

use crate::consts::{TICKS_PER_WINDOW, TICK_MS};
use serde::{Deserialize, Serialize};
use std::fmt;
use std::time::Duration;
use thiserror::Error;

/// Number of [`GateStatus`] variants.
pub const STATUS_COUNT: usize = 3;

/// Operational state of the gate motor, as inferred from its status LED.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
#[repr(u8)]
pub enum GateStatus {
    /// LED off for the whole window.
    #[default]
    Closed = 0,
    /// Opening, open or closing (LED on for most of the window).
    Open = 1,
    /// AC power or battery failure (short LED pulses).
    PowerFault = 2,
}

impl GateStatus {
    /// All variants, in discriminant order.
    pub const ALL: [GateStatus; STATUS_COUNT] =
        [GateStatus::Closed, GateStatus::Open, GateStatus::PowerFault];

    #[inline]
    const fn index(self) -> usize {
        self as usize
    }
}

impl fmt::Display for GateStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            GateStatus::Closed => "closed",
            GateStatus::Open => "open",
            GateStatus::PowerFault => "power_fault",
        };
        f.write_str(name)
    }
}

/// A duration counted in sampling ticks (1 tick = 100 ms).
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Default)]
pub struct Ticks(pub u32);

impl Ticks {
    /// Zero ticks.
    pub const ZERO: Ticks = Ticks(0);

    /// Convert seconds to ticks, rounding to the nearest tick.
    ///
    /// Negative and non-finite inputs map to `None`.
    pub fn from_secs_f64(secs: f64) -> Option<Self> {
        if !secs.is_finite() || secs < 0.0 {
            return None;
        }
        let ticks = (secs * 1000.0 / TICK_MS as f64).round();
        if ticks > u32::MAX as f64 {
            return None;
        }
        Some(Ticks(ticks as u32))
    }

    /// Duration in seconds.
    #[inline]
    pub fn as_secs_f64(self) -> f64 {
        self.0 as f64 * TICK_MS as f64 / 1000.0
    }
}

impl fmt::Display for Ticks {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{:.1}s", self.as_secs_f64())
    }
}

/// Inclusive duration band `[min, max]`.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Band {
    pub min: Ticks,
    pub max: Ticks,
}

impl Band {
    pub const fn new(min: Ticks, max: Ticks) -> Self {
        Self { min, max }
    }

    /// Whether `d` lies inside the band (both ends inclusive).
    #[inline]
    pub fn contains(&self, d: Ticks) -> bool {
        d >= self.min && d <= self.max
    }
}

/// Static per-status policy: band, labels, alerting and confirmation.
#[derive(Debug, Clone, PartialEq)]
pub struct StatusRule {
    pub status: GateStatus,
    pub band: Band,
    /// Label used when the status has just been committed.
    pub label: String,
    /// Label used for re-alerts while the status stays current.
    pub repeat_label: String,
    pub alertable: bool,
    /// Minimum time between repeated alerts.
    pub cooldown: Duration,
    /// Require two consecutive matching windows before committing.
    pub confirm: bool,
}

/// Errors detected while building a [`StatusTable`].
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum StatusTableError {
    #[error("status '{0}' has no entry in the status table")]
    MissingStatus(GateStatus),

    #[error("status '{0}' appears more than once in the status table")]
    DuplicateStatus(GateStatus),

    #[error("band of '{status}' is inverted ({min} > {max})")]
    InvertedBand {
        status: GateStatus,
        min: Ticks,
        max: Ticks,
    },

    #[error("no band covers asserted durations {0}..={1}")]
    CoverageGap(Ticks, Ticks),
}

/// Ordered status table.
///
/// Construction validates that every status appears exactly once and that no
/// band is inverted. Bands may extend past the window length. Whether the
/// bands cover every measurable duration is reported by
/// [`coverage_gaps`](Self::coverage_gaps); the stock table leaves two gaps,
/// and a duration that falls in one classifies as `None`.
#[derive(Debug, Clone, PartialEq)]
pub struct StatusTable {
    rules: Vec<StatusRule>,
    /// Position of each status in `rules`, indexed by discriminant.
    index: [usize; STATUS_COUNT],
}

impl StatusTable {
    /// Build and validate a table. Entry order is preserved.
    pub fn new(rules: Vec<StatusRule>) -> Result<Self, StatusTableError> {
        let mut index = [usize::MAX; STATUS_COUNT];

        for (pos, rule) in rules.iter().enumerate() {
            let slot = &mut index[rule.status.index()];
            if *slot != usize::MAX {
                return Err(StatusTableError::DuplicateStatus(rule.status));
            }
            *slot = pos;

            if rule.band.min > rule.band.max {
                return Err(StatusTableError::InvertedBand {
                    status: rule.status,
                    min: rule.band.min,
                    max: rule.band.max,
                });
            }
        }

        for status in GateStatus::ALL {
            if index[status.index()] == usize::MAX {
                return Err(StatusTableError::MissingStatus(status));
            }
        }

        Ok(Self { rules, index })
    }

    /// Uncovered ranges of measurable durations (`0..=TICKS_PER_WINDOW`),
    /// as inclusive `(first, last)` pairs.
    pub fn coverage_gaps(&self) -> Vec<(Ticks, Ticks)> {
        let mut gaps: Vec<(Ticks, Ticks)> = Vec::new();
        for d in (0..=TICKS_PER_WINDOW).map(Ticks) {
            if self.classify(d).is_some() {
                continue;
            }
            match gaps.last_mut() {
                Some((_, last)) if last.0 + 1 == d.0 => *last = d,
                _ => gaps.push((d, d)),
            }
        }
        gaps
    }

    /// Fail with [`StatusTableError::CoverageGap`] on the first uncovered range.
    pub fn require_full_coverage(&self) -> Result<(), StatusTableError> {
        match self.coverage_gaps().first() {
            Some(&(first, last)) => Err(StatusTableError::CoverageGap(first, last)),
            None => Ok(()),
        }
    }

    /// Classify an asserted duration. Last match in table order wins.
    pub fn classify(&self, d: Ticks) -> Option<GateStatus> {
        self.rules
            .iter()
            .rev()
            .find(|rule| rule.band.contains(d))
            .map(|rule| rule.status)
    }

    /// Policy for a status.
    #[inline]
    pub fn rule(&self, status: GateStatus) -> &StatusRule {
        &self.rules[self.index[status.index()]]
    }

    /// Entries in table order.
    pub fn rules(&self) -> &[StatusRule] {
        &self.rules
    }
}

impl Default for StatusTable {
    /// Centurion D5 status LED interpretation.
    fn default() -> Self {
        Self {
            rules: default_rules(),
            index: [0, 1, 2],
        }
    }
}

/// Default status table, in priority order.
pub fn default_rules() -> Vec<StatusRule> {
    vec![
        StatusRule {
            status: GateStatus::Closed,
            band: Band::new(Ticks(0), Ticks(0)),
            label: "Gate closed".to_string(),
            repeat_label: "Gate closed".to_string(),
            alertable: false,
            cooldown: Duration::ZERO,
            confirm: true,
        },
        StatusRule {
            status: GateStatus::Open,
            band: Band::new(Ticks(20), Ticks(60)),
            label: "Gate OPEN".to_string(),
            repeat_label: "Gate still OPEN".to_string(),
            alertable: true,
            cooldown: Duration::from_secs(300),
            confirm: false,
        },
        StatusRule {
            status: GateStatus::PowerFault,
            band: Band::new(Ticks(5), Ticks(15)),
            label: "Gate has an AC power or battery failure".to_string(),
            repeat_label: "Gate has an AC power or battery failure".to_string(),
            alertable: true,
            cooldown: Duration::from_secs(1800),
            confirm: true,
        },
    ]
}
