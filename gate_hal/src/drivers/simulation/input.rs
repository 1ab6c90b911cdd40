//! Scripted input waveform.
//!
//! Plays back `[[input.pattern]]` segments in a loop, one tick per `read()`.
//! Levels are logical (`true` = asserted); `active_low` does not apply.

use gate_common::hal::config::{InputConfig, PatternSegment};
use gate_common::hal::driver::{HalError, InputDriver};
use tracing::{debug, info};

/// Simulated input line replaying a repeating waveform.
#[derive(Debug, Default)]
pub struct SimulatedInput {
    pattern: Vec<PatternSegment>,
    /// Current segment.
    segment: usize,
    /// Ticks already played from the current segment.
    offset: u32,
}

impl SimulatedInput {
    /// Create an idle simulated line (held low until initialized).
    pub fn new() -> Self {
        Self::default()
    }

    /// Create a line playing `pattern` without going through configuration.
    pub fn with_pattern(pattern: Vec<PatternSegment>) -> Self {
        Self {
            pattern,
            segment: 0,
            offset: 0,
        }
    }

    /// Total ticks in one period of the waveform.
    pub fn period_ticks(&self) -> u32 {
        self.pattern.iter().map(|seg| seg.ticks).sum()
    }
}

impl InputDriver for SimulatedInput {
    fn name(&self) -> &'static str {
        "simulation"
    }

    fn init(&mut self, config: &InputConfig) -> Result<(), HalError> {
        config.validate()?;
        *self = Self::with_pattern(config.pattern.clone());
        info!(
            "Simulated input: {} segments, period {} ticks",
            self.pattern.len(),
            self.period_ticks()
        );
        Ok(())
    }

    fn read(&mut self) -> Result<bool, HalError> {
        let Some(current) = self.pattern.get(self.segment).copied() else {
            return Ok(false);
        };

        self.offset += 1;
        if self.offset >= current.ticks {
            self.offset = 0;
            self.segment = (self.segment + 1) % self.pattern.len();
            debug!("Simulated input advancing to segment {}", self.segment);
        }
        Ok(current.level)
    }
}
