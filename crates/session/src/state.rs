use chrono::{DateTime, Utc};
use serde::Serialize;

/// Monitor lifecycle.
///
/// `Expired` is transient: it is entered when the forced logout begins and
/// left for `Idle` as soon as the sink has been notified.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum SessionPhase {
    Idle,
    Active,
    Warning,
    Expired,
}

impl SessionPhase {
    /// Whether activity listeners and timers belong to this phase.
    pub fn is_monitoring(self) -> bool {
        matches!(self, SessionPhase::Active | SessionPhase::Warning)
    }
}

/// Why a session was ended by the monitor.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum LogoutReason {
    /// An inactivity check found the full timeout elapsed.
    IdleTimeout,
    /// The warning countdown reached zero.
    CountdownElapsed,
    /// `force_logout` was called.
    UserRequested,
}

impl LogoutReason {
    /// Whether the shell should tell the user they were signed out.
    pub fn show_message(self) -> bool {
        match self {
            LogoutReason::IdleTimeout | LogoutReason::CountdownElapsed => true,
            LogoutReason::UserRequested => false,
        }
    }
}

/// Per-session monitoring state.
///
/// Created by `start`, reset on every exit path.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct SessionActivityState {
    pub last_activity: Option<DateTime<Utc>>,
    pub warning_visible: bool,
    pub warning_seconds_remaining: u32,
    pub logging_out: bool,
}

impl SessionActivityState {
    pub fn started(at: DateTime<Utc>) -> Self {
        Self {
            last_activity: Some(at),
            ..Self::default()
        }
    }
}

/// Read-only view of the monitor for display.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct SessionSnapshot {
    pub phase: SessionPhase,
    pub last_activity: Option<DateTime<Utc>>,
    /// Present only while the warning is visible.
    pub warning_seconds_remaining: Option<u32>,
    pub armed_timers: usize,
}
