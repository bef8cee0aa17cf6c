//! Idle-timeout monitoring for authenticated sessions.
//!
//! [`SessionMonitor`] is a host-driven state machine; [`MonitorWorker`]
//! runs one on a background thread against a [`memberhub_core::Clock`].

pub mod activity;
pub mod config;
pub mod error;
pub mod monitor;
pub mod state;
pub mod timers;
pub mod worker;

pub use activity::ActivityKind;
pub use config::SessionConfig;
pub use error::SessionError;
pub use monitor::{LogoutSink, SessionMonitor};
pub use state::{LogoutReason, SessionActivityState, SessionPhase, SessionSnapshot};
pub use timers::{ArmedTimer, TimerId, TimerKind, TimerSet};
pub use worker::{MonitorHandle, MonitorWorker};
