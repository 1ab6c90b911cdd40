//! Shared fixtures for the gate_monitor integration tests.

#![allow(dead_code)]

use gate::hal::config::{InputConfig, PatternSegment};
use gate::hal::driver::{HalError, InputDriver};
use gate::status::StatusTable;
use gate_hal::drivers::simulation::{SimulatedIndicator, SimulatedInput};
use gate_monitor::clock::ManualClock;
use gate_monitor::indicator::Indicator;
use gate_monitor::notifier::Notifier;
use gate_monitor::{Alert, Monitor, NotifyError};
use std::cell::RefCell;
use std::rc::Rc;

/// Notifier that records every alert; clones share the record.
#[derive(Clone, Default)]
pub struct RecordingNotifier {
    pub sent: Rc<RefCell<Vec<Alert>>>,
}

impl RecordingNotifier {
    pub fn alerts(&self) -> Vec<Alert> {
        self.sent.borrow().clone()
    }
}

impl Notifier for RecordingNotifier {
    fn name(&self) -> &'static str {
        "recording"
    }

    fn send(&mut self, alert: &Alert) -> Result<(), NotifyError> {
        self.sent.borrow_mut().push(alert.clone());
        Ok(())
    }
}

/// Simulated input that fails every `every`-th read.
pub struct FlakyInput {
    inner: SimulatedInput,
    every: u32,
    reads: u32,
}

impl FlakyInput {
    pub fn new(pattern: Vec<PatternSegment>, every: u32) -> Self {
        Self {
            inner: SimulatedInput::with_pattern(pattern),
            every,
            reads: 0,
        }
    }
}

impl InputDriver for FlakyInput {
    fn name(&self) -> &'static str {
        "flaky"
    }

    fn init(&mut self, _config: &InputConfig) -> Result<(), HalError> {
        Ok(())
    }

    fn read(&mut self) -> Result<bool, HalError> {
        self.reads += 1;
        if self.reads % self.every == 0 {
            return Err(HalError::CommunicationError("line dropped".to_string()));
        }
        self.inner.read()
    }
}

pub fn seg(level: bool, ticks: u32) -> PatternSegment {
    PatternSegment { level, ticks }
}

/// Monitor over a scripted input with the stock table.
pub fn monitor(
    input: Box<dyn InputDriver>,
    table: StatusTable,
) -> (Monitor<ManualClock>, RecordingNotifier, ManualClock) {
    let notifier = RecordingNotifier::default();
    let clock = ManualClock::new();
    let monitor = Monitor::new(
        input,
        Indicator::new(Box::new(SimulatedIndicator::new())),
        Box::new(notifier.clone()),
        table,
        clock.clone(),
    );
    (monitor, notifier, clock)
}

pub fn scripted(pattern: Vec<PatternSegment>) -> Box<dyn InputDriver> {
    Box::new(SimulatedInput::with_pattern(pattern))
}
