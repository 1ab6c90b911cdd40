//! Inner monitoring loop: sample a window, classify it, dispatch alerts.

use crate::classifier::{Alert, Classifier, Decision};
use crate::clock::Clock;
use crate::error::MonitorError;
use crate::indicator::Indicator;
use crate::notifier::Notifier;
use crate::sampler::Sampler;
use gate::consts::FLASHES_NOTIFYING;
use gate::hal::driver::InputDriver;
use gate::status::StatusTable;
use std::convert::Infallible;
use tracing::{info, warn};

/// One monitored input with its classifier and alert sink.
///
/// The classifier state lives as long as the `Monitor`, so it survives
/// supervisor restarts.
pub struct Monitor<C: Clock> {
    input: Box<dyn InputDriver>,
    indicator: Indicator,
    notifier: Box<dyn Notifier>,
    sampler: Sampler,
    classifier: Classifier,
    clock: C,
}

impl<C: Clock> Monitor<C> {
    pub fn new(
        input: Box<dyn InputDriver>,
        indicator: Indicator,
        notifier: Box<dyn Notifier>,
        table: StatusTable,
        clock: C,
    ) -> Self {
        let classifier = Classifier::new(table, clock.now());
        Self {
            input,
            indicator,
            notifier,
            sampler: Sampler::default(),
            classifier,
            clock,
        }
    }

    #[inline]
    pub fn classifier(&self) -> &Classifier {
        &self.classifier
    }

    #[inline]
    pub fn clock(&self) -> &C {
        &self.clock
    }

    /// Flash the progress indicator `count` times.
    pub fn flash(&mut self, count: u32) {
        self.indicator.flash(count, &self.clock);
    }

    /// Sample and evaluate one window, dispatching any resulting alert.
    ///
    /// # Errors
    /// Only input failures; alert delivery failures are logged and dropped.
    pub fn run_window(&mut self) -> Result<Decision, MonitorError> {
        let window = self
            .sampler
            .sample(self.input.as_mut(), &mut self.indicator, &self.clock)?;

        let decision = self.classifier.evaluate(window.asserted, self.clock.now());
        if let Some(alert) = decision.alert() {
            self.dispatch(alert);
        }
        Ok(decision)
    }

    /// Monitor until an input fault occurs.
    pub fn run(&mut self) -> Result<Infallible, MonitorError> {
        info!(
            "Monitoring '{}' input, current status {}",
            self.input.name(),
            self.classifier.state().current
        );
        loop {
            self.run_window()?;
        }
    }

    fn dispatch(&mut self, alert: &Alert) {
        self.flash(FLASHES_NOTIFYING);
        match self.notifier.send(alert) {
            Ok(()) => info!(
                "Alert sent via {}: {} ({})",
                self.notifier.name(),
                alert.message,
                alert.status
            ),
            Err(e) => warn!("Alert '{}' dropped: {}", alert.message, e),
        }
    }
}

impl<C: Clock> Drop for Monitor<C> {
    fn drop(&mut self) {
        if let Err(e) = self.input.shutdown() {
            warn!("Input shutdown failed: {}", e);
        }
        self.indicator.shutdown();
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::clock::ManualClock;
    use crate::error::NotifyError;
    use crate::notifier::LogNotifier;
    use gate::hal::config::PatternSegment;
    use gate::status::GateStatus;
    use gate_hal::drivers::simulation::{SimulatedIndicator, SimulatedInput};
    use std::time::Duration;

    struct FailingNotifier;

    impl Notifier for FailingNotifier {
        fn name(&self) -> &'static str {
            "failing"
        }

        fn send(&mut self, _alert: &Alert) -> Result<(), NotifyError> {
            Err(NotifyError::Transport("offline".to_string()))
        }
    }

    fn monitor(pattern: Vec<PatternSegment>, notifier: Box<dyn Notifier>) -> Monitor<ManualClock> {
        Monitor::new(
            Box::new(SimulatedInput::with_pattern(pattern)),
            Indicator::new(Box::new(SimulatedIndicator::new())),
            notifier,
            StatusTable::default(),
            ManualClock::new(),
        )
    }

    fn steady(level: bool) -> Vec<PatternSegment> {
        vec![PatternSegment { level, ticks: 1 }]
    }

    #[test]
    fn quiet_window_takes_five_seconds() {
        let mut monitor = monitor(steady(false), Box::new(LogNotifier::default()));
        let decision = monitor.run_window().unwrap();
        assert_eq!(decision.status(), Some(GateStatus::Closed));
        assert_eq!(monitor.clock().now(), Duration::from_secs(5));
    }

    #[test]
    fn alert_flashes_before_sending() {
        let mut monitor = monitor(steady(true), Box::new(LogNotifier::default()));
        let decision = monitor.run_window().unwrap();
        assert!(decision.alert().is_some());
        // 5 s window + 3 flashes of 0.4 s.
        assert_eq!(monitor.clock().now(), Duration::from_millis(6200));
    }

    #[test]
    fn failed_delivery_does_not_stop_monitoring() {
        let mut monitor = monitor(steady(true), Box::new(FailingNotifier));
        let decision = monitor.run_window().unwrap();
        assert!(matches!(decision, Decision::Committed { status: GateStatus::Open, .. }));
        assert_eq!(monitor.classifier().state().current, GateStatus::Open);
        assert!(monitor.run_window().is_ok());
    }
}
