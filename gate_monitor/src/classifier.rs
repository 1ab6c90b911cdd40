//! Status classification, confirmation and alert throttling.
//!
//! # State machine
//!
//! ```text
//!                 classify(d) == current
//!              ┌─────────────────────────┐
//!              │   re-alert when cooldown │
//!              ▼          elapsed         │
//!         ┌─────────┐ ────────────────────┘
//!         │ current │
//!         └─────────┘ ◄──── commit ────┐
//!              │                       │
//!   classify(d) != current             │
//!              │                       │
//!              ├── no confirm ─────────┤
//!              │                       │
//!              └── confirm ── pending == new ──┘
//!                      │
//!                      └── else: pending = new
//! ```
//!
//! A committed change to an alertable status always alerts, regardless of
//! cooldown. Durations that match no band leave the state as if the
//! current status had been observed again.

use gate::status::{GateStatus, StatusTable, Ticks};
use std::time::Duration;
use tracing::{debug, info};

/// Mutable monitoring state, owned by the [`Classifier`].
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct MonitorState {
    /// Confirmed status.
    pub current: GateStatus,
    /// Status awaiting a second consecutive match.
    pub pending: Option<GateStatus>,
    /// When the last alert for `current` was sent (or `current` committed).
    pub last_notified_at: Duration,
}

impl MonitorState {
    /// Initial state: closed, nothing pending, cooldown running from `now`.
    pub fn new(now: Duration) -> Self {
        Self {
            current: GateStatus::default(),
            pending: None,
            last_notified_at: now,
        }
    }
}

/// An alert to hand to the notifier.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Alert {
    pub status: GateStatus,
    pub message: String,
    /// Repeated-occurrence alert (status unchanged since last alert).
    pub repeat: bool,
}

/// Outcome of one window's evaluation.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Decision {
    /// Classification matched the current status.
    Unchanged { status: GateStatus, alert: Option<Alert> },
    /// No band matched; handled as [`Decision::Unchanged`].
    Unmatched { status: GateStatus, alert: Option<Alert> },
    /// A confirmation-required status was proposed for the first time.
    AwaitingConfirmation { status: GateStatus },
    /// The current status changed.
    Committed {
        status: GateStatus,
        previous: GateStatus,
        alert: Option<Alert>,
    },
}

impl Decision {
    /// Alert to dispatch, if any.
    pub fn alert(&self) -> Option<&Alert> {
        match self {
            Decision::Unchanged { alert, .. }
            | Decision::Unmatched { alert, .. }
            | Decision::Committed { alert, .. } => alert.as_ref(),
            Decision::AwaitingConfirmation { .. } => None,
        }
    }

    /// Current status after this decision.
    pub fn status(&self) -> Option<GateStatus> {
        match self {
            Decision::Unchanged { status, .. }
            | Decision::Unmatched { status, .. }
            | Decision::Committed { status, .. } => Some(*status),
            Decision::AwaitingConfirmation { .. } => None,
        }
    }
}

/// Classifier and confirmation state machine.
#[derive(Debug, Clone)]
pub struct Classifier {
    table: StatusTable,
    state: MonitorState,
}

impl Classifier {
    /// Create a classifier whose cooldown clock starts at `now`.
    pub fn new(table: StatusTable, now: Duration) -> Self {
        Self {
            table,
            state: MonitorState::new(now),
        }
    }

    #[inline]
    pub fn state(&self) -> &MonitorState {
        &self.state
    }

    #[inline]
    pub fn table(&self) -> &StatusTable {
        &self.table
    }

    /// Evaluate one window's asserted duration at time `now`.
    pub fn evaluate(&mut self, duration: Ticks, now: Duration) -> Decision {
        let current = self.state.current;

        let Some(observed) = self.table.classify(duration) else {
            debug!("No band matches {duration}, keeping {current}");
            return Decision::Unmatched {
                status: current,
                alert: self.due_repeat(now),
            };
        };

        if observed == current {
            return Decision::Unchanged {
                status: current,
                alert: self.due_repeat(now),
            };
        }

        let rule = self.table.rule(observed);
        if rule.confirm && self.state.pending != Some(observed) {
            if let Some(previous) = self.state.pending {
                debug!("Pending {previous} replaced by {observed}");
            }
            info!("{observed} observed ({duration}), awaiting confirmation");
            self.state.pending = Some(observed);
            return Decision::AwaitingConfirmation { status: observed };
        }

        self.commit(observed, now)
    }

    fn commit(&mut self, status: GateStatus, now: Duration) -> Decision {
        let previous = self.state.current;
        self.state.current = status;
        self.state.pending = None;
        self.state.last_notified_at = now;

        info!("Gate status changed: {previous} -> {status}");

        let rule = self.table.rule(status);
        let alert = rule.alertable.then(|| Alert {
            status,
            message: rule.label.clone(),
            repeat: false,
        });
        Decision::Committed {
            status,
            previous,
            alert,
        }
    }

    /// Repeated-occurrence alert for the current status, if its cooldown
    /// has run out.
    fn due_repeat(&mut self, now: Duration) -> Option<Alert> {
        let rule = self.table.rule(self.state.current);
        let due = self.state.last_notified_at.checked_add(rule.cooldown);
        if !rule.alertable || due.is_none_or(|due| now < due) {
            return None;
        }
        self.state.last_notified_at = now;
        debug!("Cooldown elapsed for {}", rule.status);
        Some(Alert {
            status: rule.status,
            message: rule.repeat_label.clone(),
            repeat: true,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use gate::status::{StatusRule, default_rules};

    const WINDOW: Duration = Duration::from_secs(5);

    fn secs(s: f64) -> Ticks {
        Ticks::from_secs_f64(s).unwrap()
    }

    /// Drive `durations` through a fresh classifier, one window apart.
    fn drive(table: StatusTable, durations: &[Ticks]) -> (Classifier, Vec<Decision>) {
        let mut classifier = Classifier::new(table, Duration::ZERO);
        let decisions = durations
            .iter()
            .enumerate()
            .map(|(i, &d)| classifier.evaluate(d, WINDOW * (i as u32 + 1)))
            .collect();
        (classifier, decisions)
    }

    fn table_with(edit: impl FnOnce(&mut Vec<StatusRule>)) -> StatusTable {
        let mut rules = default_rules();
        edit(&mut rules);
        StatusTable::new(rules).unwrap()
    }

    fn alerts(decisions: &[Decision]) -> Vec<&Alert> {
        decisions.iter().filter_map(Decision::alert).collect()
    }

    #[test]
    fn initial_state() {
        let classifier = Classifier::new(StatusTable::default(), Duration::from_secs(7));
        assert_eq!(
            *classifier.state(),
            MonitorState {
                current: GateStatus::Closed,
                pending: None,
                last_notified_at: Duration::from_secs(7),
            }
        );
    }

    #[test]
    fn closed_forever_never_alerts() {
        let (classifier, decisions) = drive(StatusTable::default(), &[Ticks(0); 100]);
        assert_eq!(classifier.state().current, GateStatus::Closed);
        assert!(alerts(&decisions).is_empty());
        assert!(decisions
            .iter()
            .all(|d| matches!(d, Decision::Unchanged { status: GateStatus::Closed, .. })));
    }

    #[test]
    fn unconfirmed_status_commits_on_first_window() {
        let (classifier, decisions) = drive(StatusTable::default(), &[secs(3.0), secs(3.0)]);
        assert_eq!(
            decisions[0],
            Decision::Committed {
                status: GateStatus::Open,
                previous: GateStatus::Closed,
                alert: Some(Alert {
                    status: GateStatus::Open,
                    message: "Gate OPEN".to_string(),
                    repeat: false,
                }),
            }
        );
        assert!(matches!(decisions[1], Decision::Unchanged { alert: None, .. }));
        assert_eq!(classifier.state().current, GateStatus::Open);
        assert_eq!(alerts(&decisions).len(), 1);
    }

    #[test]
    fn confirmed_status_commits_on_second_window() {
        let table = table_with(|rules| rules[1].confirm = true);
        let (classifier, decisions) = drive(table, &[secs(3.0), secs(3.0)]);

        assert_eq!(
            decisions[0],
            Decision::AwaitingConfirmation {
                status: GateStatus::Open
            }
        );
        assert!(matches!(
            decisions[1],
            Decision::Committed {
                status: GateStatus::Open,
                ..
            }
        ));
        let sent = alerts(&decisions);
        assert_eq!(sent.len(), 1);
        assert_eq!(sent[0].message, "Gate OPEN");
        assert!(!sent[0].repeat);
        assert_eq!(classifier.state().pending, None);
    }

    #[test]
    fn power_fault_blip_is_rejected() {
        let (classifier, decisions) =
            drive(StatusTable::default(), &[secs(1.0), Ticks(0), Ticks(0)]);
        assert!(alerts(&decisions).is_empty());
        assert_eq!(classifier.state().current, GateStatus::Closed);
        // Closed was already current, so pending survives the unchanged windows.
        assert_eq!(classifier.state().pending, Some(GateStatus::PowerFault));
    }

    #[test]
    fn open_for_fifty_seconds_repeats_at_most_once() {
        let (_, decisions) = drive(StatusTable::default(), &[secs(4.0); 11]);
        let repeats = alerts(&decisions).iter().filter(|a| a.repeat).count();
        assert!(repeats <= 1);
        assert_eq!(repeats, 0);
    }

    #[test]
    fn repeat_alert_after_cooldown() {
        let mut classifier = Classifier::new(StatusTable::default(), Duration::ZERO);
        let t0 = Duration::from_secs(10);
        assert!(classifier.evaluate(secs(4.0), t0).alert().is_some());

        let before = classifier.evaluate(secs(4.0), t0 + Duration::from_secs(299));
        assert_eq!(before.alert(), None);

        let due = classifier.evaluate(secs(4.0), t0 + Duration::from_secs(300));
        let alert = due.alert().unwrap();
        assert!(alert.repeat);
        assert_eq!(alert.message, "Gate still OPEN");
        assert_eq!(classifier.state().last_notified_at, t0 + Duration::from_secs(300));

        let after = classifier.evaluate(secs(4.0), t0 + Duration::from_secs(301));
        assert_eq!(after.alert(), None);
    }

    #[test]
    fn alternating_confirmed_statuses_never_commit() {
        let table = table_with(|rules| rules[1].confirm = true);
        let pattern: Vec<Ticks> = (0..20)
            .map(|i| if i % 2 == 0 { secs(3.0) } else { secs(1.0) })
            .collect();
        let (classifier, decisions) = drive(table, &pattern);

        assert!(decisions
            .iter()
            .all(|d| matches!(d, Decision::AwaitingConfirmation { .. })));
        assert_eq!(classifier.state().current, GateStatus::Closed);
        assert_eq!(classifier.state().pending, Some(GateStatus::PowerFault));
        assert!(alerts(&decisions).is_empty());
    }

    #[test]
    fn intervening_status_resets_pending_to_new_value() {
        let table = table_with(|rules| rules[1].confirm = true);
        let (classifier, decisions) = drive(table, &[secs(1.0), secs(3.0), secs(3.0)]);
        assert_eq!(
            decisions[1],
            Decision::AwaitingConfirmation {
                status: GateStatus::Open
            }
        );
        assert!(matches!(decisions[2], Decision::Committed { status: GateStatus::Open, .. }));
        assert_eq!(classifier.state().current, GateStatus::Open);
    }

    #[test]
    fn unconfirmed_commit_clears_pending() {
        let (classifier, decisions) = drive(StatusTable::default(), &[secs(1.0), secs(3.0)]);
        assert!(matches!(decisions[0], Decision::AwaitingConfirmation { .. }));
        assert!(matches!(decisions[1], Decision::Committed { .. }));
        assert_eq!(classifier.state().pending, None);
    }

    #[test]
    fn commit_alerts_regardless_of_cooldown() {
        // Open -> PowerFault -> Open within one Open cooldown.
        let (_, decisions) = drive(
            StatusTable::default(),
            &[secs(3.0), secs(1.0), secs(1.0), secs(3.0)],
        );
        let sent: Vec<_> = alerts(&decisions).iter().map(|a| a.status).collect();
        assert_eq!(
            sent,
            vec![GateStatus::Open, GateStatus::PowerFault, GateStatus::Open]
        );
    }

    #[test]
    fn non_alertable_commit_is_silent() {
        let (classifier, decisions) = drive(
            StatusTable::default(),
            &[secs(3.0), Ticks(0), Ticks(0)],
        );
        assert_eq!(classifier.state().current, GateStatus::Closed);
        assert_eq!(alerts(&decisions).len(), 1);
        assert!(matches!(
            decisions[2],
            Decision::Committed {
                status: GateStatus::Closed,
                alert: None,
                ..
            }
        ));
    }

    #[test]
    fn unmatched_duration_keeps_current_status() {
        let (classifier, decisions) = drive(StatusTable::default(), &[secs(3.0), Ticks(2)]);
        assert_eq!(
            decisions[1],
            Decision::Unmatched {
                status: GateStatus::Open,
                alert: None,
            }
        );
        assert_eq!(classifier.state().current, GateStatus::Open);
    }

    #[test]
    fn unmatched_duration_still_repeats_alerts() {
        let mut classifier = Classifier::new(StatusTable::default(), Duration::ZERO);
        classifier.evaluate(secs(3.0), Duration::ZERO);
        let decision = classifier.evaluate(Ticks(17), Duration::from_secs(300));
        assert!(matches!(decision, Decision::Unmatched { .. }));
        assert!(decision.alert().is_some_and(|a| a.repeat));
    }

    #[test]
    fn startup_does_not_alert_until_cooldown() {
        // Already current at boot: the cooldown started at construction.
        let table = table_with(|rules| {
            rules[0].alertable = true;
            rules[0].cooldown = Duration::from_secs(60);
        });
        let mut classifier = Classifier::new(table, Duration::ZERO);
        assert_eq!(classifier.evaluate(Ticks(0), Duration::from_secs(59)).alert(), None);
        assert!(classifier.evaluate(Ticks(0), Duration::from_secs(60)).alert().is_some());
    }

    #[test]
    fn cooldown_past_end_of_time_never_repeats() {
        let table = table_with(|rules| rules[1].cooldown = Duration::MAX);
        let mut classifier = Classifier::new(table, Duration::ZERO);
        assert!(classifier.evaluate(secs(3.0), WINDOW).alert().is_some());
        assert_eq!(classifier.evaluate(secs(3.0), WINDOW * 2).alert(), None);
    }

    #[test]
    fn no_more_than_one_alert_per_cooldown() {
        let mut classifier = Classifier::new(StatusTable::default(), Duration::ZERO);
        let mut sent = Vec::new();
        for i in 0..400u32 {
            let now = WINDOW * i;
            if let Some(alert) = classifier.evaluate(secs(5.0), now).alert() {
                sent.push(now);
                assert_eq!(alert.status, GateStatus::Open);
            }
        }
        for pair in sent.windows(2) {
            assert!(pair[1] - pair[0] >= Duration::from_secs(300));
        }
        // 400 windows = 2000 s: commit at 0 plus repeats at 300, 600, ... 1800.
        assert_eq!(sent.len(), 7);
    }
}
