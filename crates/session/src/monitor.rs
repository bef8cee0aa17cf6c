//! Idle-timeout state machine.
//!
//! ```text
//!   Idle ──start──▶ Active ──(elapsed ≥ timeout − warning)──▶ Warning
//!    ▲                ▲  ◀──────────activity / extend──────────┘ │
//!    │                │                                           │
//!    └──── Expired ◀──┴── force_logout / elapsed ≥ timeout / countdown 0
//! ```
//!
//! The monitor never reads a clock. Hosts pass `now` into every call and
//! drive timers with [`SessionMonitor::advance`].

use chrono::{DateTime, Utc};
use tracing::{debug, info};

use crate::activity::ActivityKind;
use crate::config::SessionConfig;
use crate::state::{LogoutReason, SessionActivityState, SessionPhase, SessionSnapshot};
use crate::timers::{TimerKind, TimerSet};

/// Receives the forced-logout notification.
///
/// Clearing credentials and navigating away are the implementor's job.
pub trait LogoutSink {
    fn on_logout(&mut self, show_message: bool);
}

impl<F> LogoutSink for F
where
    F: FnMut(bool),
{
    fn on_logout(&mut self, show_message: bool) {
        self(show_message)
    }
}

// ─────────────────────────────────────────────────────────────────────────────
// Monitor
// ─────────────────────────────────────────────────────────────────────────────

#[derive(Debug)]
pub struct SessionMonitor<S> {
    config: SessionConfig,
    timeout: chrono::Duration,
    warning_after: chrono::Duration,
    tick: chrono::Duration,
    phase: SessionPhase,
    activity: SessionActivityState,
    timers: TimerSet,
    last_logout: Option<LogoutReason>,
    sink: S,
}

impl<S: LogoutSink> SessionMonitor<S> {
    /// Monitor in `Idle`; call [`start`](Self::start) once authenticated.
    pub fn new(config: SessionConfig, sink: S) -> Self {
        Self {
            timeout: to_chrono(config.timeout()),
            warning_after: to_chrono(config.warning_after()),
            tick: to_chrono(config.tick()),
            config,
            phase: SessionPhase::Idle,
            activity: SessionActivityState::default(),
            timers: TimerSet::new(),
            last_logout: None,
            sink,
        }
    }

    pub fn config(&self) -> &SessionConfig {
        &self.config
    }

    pub fn phase(&self) -> SessionPhase {
        self.phase
    }

    pub fn activity(&self) -> &SessionActivityState {
        &self.activity
    }

    pub fn timers(&self) -> &TimerSet {
        &self.timers
    }

    /// Why the most recent forced logout happened.
    pub fn last_logout(&self) -> Option<LogoutReason> {
        self.last_logout
    }

    pub fn sink(&self) -> &S {
        &self.sink
    }

    pub fn warning_seconds_remaining(&self) -> Option<u32> {
        self.activity
            .warning_visible
            .then_some(self.activity.warning_seconds_remaining)
    }

    /// Activity sources that should be listened to right now.
    pub fn attached_listeners(&self) -> &'static [ActivityKind] {
        if self.phase.is_monitoring() {
            &ActivityKind::ALL
        } else {
            &[]
        }
    }

    pub fn snapshot(&self) -> SessionSnapshot {
        SessionSnapshot {
            phase: self.phase,
            last_activity: self.activity.last_activity,
            warning_seconds_remaining: self.warning_seconds_remaining(),
            armed_timers: self.timers.len(),
        }
    }

    /// Begin monitoring an authenticated session. No-op unless `Idle`.
    pub fn start(&mut self, now: DateTime<Utc>) {
        if self.phase != SessionPhase::Idle {
            debug!(phase = ?self.phase, "session monitor already running");
            return;
        }
        self.activity = SessionActivityState::started(now);
        self.transition(SessionPhase::Active, now);
    }

    /// Apply a genuine activity signal.
    ///
    /// Due timers are fired first, so activity arriving after the deadline
    /// does not revive an expired session. Returns whether the signal was
    /// accepted.
    pub fn record_activity(&mut self, kind: ActivityKind, now: DateTime<Utc>) -> bool {
        self.advance(now);
        if !self.phase.is_monitoring() {
            return false;
        }

        self.activity.last_activity = Some(now);
        if self.phase == SessionPhase::Warning {
            debug!(activity = %kind, "activity cancelled session warning");
            self.transition(SessionPhase::Active, now);
        } else {
            self.arm_timers_for_phase(now);
        }
        true
    }

    /// "Stay signed in": identical to an activity signal.
    pub fn extend_session(&mut self, now: DateTime<Utc>) -> bool {
        self.record_activity(ActivityKind::PointerDown, now)
    }

    /// End the session immediately, without passing through `Warning`.
    pub fn force_logout(&mut self, now: DateTime<Utc>) {
        if !self.phase.is_monitoring() {
            debug!(phase = ?self.phase, "force logout ignored; not monitoring");
            return;
        }
        self.expire(LogoutReason::UserRequested, now);
    }

    /// Tear down without notifying the sink (unmount or de-authentication).
    pub fn stop(&mut self) {
        let cleared = self.timers.clear();
        if self.phase != SessionPhase::Idle {
            info!(from = ?self.phase, cleared_timers = cleared, "session monitor stopped");
        }
        self.phase = SessionPhase::Idle;
        self.activity = SessionActivityState::default();
    }

    /// Fire every timer due at or before `now`, in deadline order.
    ///
    /// Each firing is evaluated at its own due instant, so one large jump
    /// behaves like the equivalent run of individual ticks.
    pub fn advance(&mut self, now: DateTime<Utc>) {
        while let Some((id, kind, due)) = self
            .timers
            .next_due(now)
            .map(|t| (t.id, t.kind, t.next_due))
        {
            self.timers.reschedule(id);
            match kind {
                TimerKind::InactivityCheck => self.on_inactivity_check(due),
                TimerKind::WarningCountdown => self.on_countdown(due),
            }
        }
    }

    fn on_inactivity_check(&mut self, at: DateTime<Utc>) {
        let Some(last) = self.activity.last_activity else {
            return;
        };
        let elapsed = at - last;

        if elapsed >= self.timeout {
            self.expire(LogoutReason::IdleTimeout, at);
        } else if self.phase == SessionPhase::Active && elapsed >= self.warning_after {
            self.activity.warning_visible = true;
            self.activity.warning_seconds_remaining = self.config.warning_seconds();
            self.transition(SessionPhase::Warning, at);
        }
    }

    fn on_countdown(&mut self, at: DateTime<Utc>) {
        if self.phase != SessionPhase::Warning {
            return;
        }
        self.activity.warning_seconds_remaining =
            self.activity.warning_seconds_remaining.saturating_sub(1);
        if self.activity.warning_seconds_remaining == 0 {
            self.expire(LogoutReason::CountdownElapsed, at);
        }
    }

    fn expire(&mut self, reason: LogoutReason, at: DateTime<Utc>) {
        if self.activity.logging_out {
            debug!(?reason, "logout already in progress");
            return;
        }
        self.activity.logging_out = true;
        self.activity.warning_visible = false;
        self.transition(SessionPhase::Expired, at);

        info!(?reason, "session expired; logging out");
        self.last_logout = Some(reason);
        self.sink.on_logout(reason.show_message());

        self.activity = SessionActivityState::default();
        self.transition(SessionPhase::Idle, at);
    }

    fn transition(&mut self, to: SessionPhase, at: DateTime<Utc>) {
        if self.phase != to {
            info!(from = ?self.phase, to = ?to, "session phase changed");
        }
        self.phase = to;
        if to != SessionPhase::Warning {
            self.activity.warning_visible = false;
            self.activity.warning_seconds_remaining = 0;
        }
        self.arm_timers_for_phase(at);
    }

    /// The only place timers are created. Always clears before arming, so a
    /// phase never holds more than one timer of each kind.
    fn arm_timers_for_phase(&mut self, at: DateTime<Utc>) {
        self.timers.clear();
        match self.phase {
            SessionPhase::Idle | SessionPhase::Expired => {}
            SessionPhase::Active => {
                self.timers
                    .arm_interval(TimerKind::InactivityCheck, at, self.tick);
            }
            SessionPhase::Warning => {
                self.timers
                    .arm_interval(TimerKind::InactivityCheck, at, self.tick);
                self.timers.arm_interval(
                    TimerKind::WarningCountdown,
                    at,
                    chrono::Duration::seconds(1),
                );
            }
        }
    }
}

/// Validated configs always fit; saturate rather than panic otherwise.
fn to_chrono(d: std::time::Duration) -> chrono::Duration {
    chrono::Duration::milliseconds(i64::try_from(d.as_millis()).unwrap_or(i64::MAX))
}
