//! Signal sampler.
//!
//! Polls the input once per tick for one window and reduces the samples to
//! a single asserted duration. A signal that comes on after the window has
//! started restarts the window, so a pulse straddling the window boundary
//! is measured whole in the next window instead of being partially credited.

use crate::clock::Clock;
use crate::indicator::Indicator;
use gate::consts::{TICK, TICKS_PER_WINDOW};
use gate::hal::driver::{HalError, InputDriver};
use gate::status::Ticks;
use std::time::Duration;
use tracing::debug;

/// Accumulator for one observation window.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct SampleWindow {
    /// Ticks counted since the window (re)started.
    pub elapsed: Ticks,
    /// Ticks during which the input was asserted. Never exceeds `elapsed`.
    pub asserted: Ticks,
    /// Number of glitch restarts.
    pub restarts: u32,
}

impl SampleWindow {
    /// Account for one sample. Returns `true` if the sample restarted the
    /// window.
    pub fn record(&mut self, asserted: bool) -> bool {
        if asserted && self.elapsed > Ticks::ZERO && self.asserted == Ticks::ZERO {
            self.elapsed = Ticks::ZERO;
            self.restarts += 1;
            return true;
        }
        if asserted {
            self.asserted.0 += 1;
        }
        self.elapsed.0 += 1;
        false
    }

    #[inline]
    pub fn is_complete(&self, length: Ticks) -> bool {
        self.elapsed >= length
    }
}

/// Fixed-cadence window sampler.
#[derive(Debug, Clone, Copy)]
pub struct Sampler {
    tick: Duration,
    window: Ticks,
}

impl Default for Sampler {
    fn default() -> Self {
        Self::new(TICK, Ticks(TICKS_PER_WINDOW))
    }
}

impl Sampler {
    pub fn new(tick: Duration, window: Ticks) -> Self {
        Self { tick, window }
    }

    /// Sample one window. The indicator mirrors the input while sampling.
    ///
    /// # Errors
    /// Propagates the first input read failure; the partial window is
    /// discarded.
    pub fn sample(
        &self,
        input: &mut dyn InputDriver,
        indicator: &mut Indicator,
        clock: &dyn Clock,
    ) -> Result<SampleWindow, HalError> {
        let mut window = SampleWindow::default();

        while !window.is_complete(self.window) {
            let level = input.read()?;
            indicator.set(level);
            if window.record(level) {
                debug!("Input asserted mid-window, restarting window");
            }
            clock.sleep(self.tick);
        }

        debug!(
            "Window complete: asserted {} ({} restarts)",
            window.asserted, window.restarts
        );
        Ok(window)
    }
}
