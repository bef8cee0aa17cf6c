//! Composition of identity, guards, navigation and the session monitor.

use std::sync::Arc;
use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::mpsc;

use anyhow::Context;
use tracing::{debug, info};

use memberhub_auth::{
    Audience, GuardView, IdentityProvider, IdentityState, InMemoryIdentityProvider, RouteGuard,
};
use memberhub_core::{Clock, SystemClock};
use memberhub_navigation::{ClassifiedNavigation, NavigationItem, NavigationTable, defaults};
use memberhub_session::{ActivityKind, MonitorHandle, MonitorWorker, SessionSnapshot};

use crate::config::ShellConfig;

/// Delivered when the session monitor signs the member out.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct LogoutNotice {
    /// Whether to tell the member their session timed out.
    pub show_message: bool,
}

pub struct DashboardShell {
    config: ShellConfig,
    identity: Arc<InMemoryIdentityProvider>,
    navigation: NavigationTable,
    clock: Arc<dyn Clock>,
    monitor: Option<MonitorHandle>,
    /// Set by the current monitor's sink once it has signed the member out.
    session_ended: Arc<AtomicBool>,
    notices_tx: mpsc::Sender<LogoutNotice>,
    notices_rx: mpsc::Receiver<LogoutNotice>,
}

impl std::fmt::Debug for DashboardShell {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("DashboardShell")
            .field("config", &self.config)
            .field("identity", &self.identity.state())
            .field("monitoring", &self.is_monitoring())
            .finish_non_exhaustive()
    }
}

impl DashboardShell {
    pub fn new(config: ShellConfig) -> anyhow::Result<Self> {
        Self::with_clock(config, Arc::new(SystemClock))
    }

    pub fn with_clock(config: ShellConfig, clock: Arc<dyn Clock>) -> anyhow::Result<Self> {
        let navigation =
            defaults::dashboard_navigation().context("dashboard navigation table is invalid")?;
        let (notices_tx, notices_rx) = mpsc::channel();
        Ok(Self {
            config,
            identity: Arc::new(InMemoryIdentityProvider::new()),
            navigation,
            clock,
            monitor: None,
            session_ended: Arc::new(AtomicBool::new(false)),
            notices_tx,
            notices_rx,
        })
    }

    pub fn config(&self) -> &ShellConfig {
        &self.config
    }

    pub fn identity(&self) -> &dyn IdentityProvider {
        self.identity.as_ref()
    }

    pub fn identity_state(&self) -> IdentityState {
        self.identity.state()
    }

    /// Restore the identity from persisted session data and, when that yields
    /// a member, start idle monitoring.
    pub fn sign_in(&mut self, persisted: Option<&str>) -> anyhow::Result<IdentityState> {
        self.teardown();
        // Notices from a previous session must not end this one.
        while self.notices_rx.try_recv().is_ok() {}
        self.identity.begin_loading();
        self.identity
            .load_persisted(persisted)
            .context("could not restore the persisted session")?;

        let state = self.identity.state();
        if let Some(identity) = state.identity() {
            info!(member_id = %identity.id, role = %identity.role, "member signed in");
            self.start_monitoring()?;
        }
        Ok(state)
    }

    /// Explicit "log out now". The monitor's sink clears the identity.
    pub fn sign_out(&mut self) -> anyhow::Result<()> {
        match self.monitor.take() {
            Some(monitor) => {
                monitor.force_logout()?;
                // Round-trip so the sink has run before the worker goes away.
                monitor.snapshot()?;
                monitor.shutdown();
            }
            None => self.identity.clear_identity(),
        }
        Ok(())
    }

    /// Stop monitoring without signing out (the dashboard is being unmounted).
    pub fn teardown(&mut self) {
        if let Some(monitor) = self.monitor.take() {
            debug!("tearing down session monitor");
            monitor.shutdown();
        }
    }

    /// Whether an idle monitor is watching the current session.
    pub fn is_monitoring(&self) -> bool {
        self.monitor.is_some() && !self.session_ended.load(Ordering::SeqCst)
    }

    pub fn guard<'a, V>(&self, guard: &'a mut RouteGuard<V>) -> GuardView<'a, V> {
        guard.render(self.identity.as_ref())
    }

    /// Navigation for the signed-in member; `None` while nobody is.
    pub fn navigation(&self, items: &[NavigationItem]) -> Option<ClassifiedNavigation> {
        let state = self.identity.state();
        let identity = state.identity()?;
        Some(self.navigation.classify(items, Audience::of(identity)))
    }

    /// Forward a host event. Returns whether it was an activity signal
    /// delivered to a running monitor.
    pub fn record_event(&mut self, event_name: &str) -> anyhow::Result<bool> {
        self.reap_finished_monitor();
        let (Some(kind), Some(monitor)) =
            (ActivityKind::from_event_name(event_name), self.monitor.as_ref())
        else {
            return Ok(false);
        };
        monitor.record_activity(kind)?;
        Ok(true)
    }

    pub fn extend_session(&self) -> anyhow::Result<()> {
        if let Some(monitor) = &self.monitor {
            monitor.extend_session()?;
        }
        Ok(())
    }

    /// Monitor state, or `None` when nothing is being monitored. A monitor
    /// that has already signed the member out is released after reporting.
    pub fn session_snapshot(&mut self) -> anyhow::Result<Option<SessionSnapshot>> {
        let snapshot = self
            .monitor
            .as_ref()
            .map(|m| m.snapshot().context("session monitor is unavailable"))
            .transpose()?;
        self.reap_finished_monitor();
        Ok(snapshot)
    }

    /// Next pending logout notice. A monitor that has signed the member out
    /// is released; a running one is left alone.
    pub fn take_logout_notice(&mut self) -> Option<LogoutNotice> {
        let notice = self.notices_rx.try_recv().ok()?;
        self.reap_finished_monitor();
        Some(notice)
    }

    fn reap_finished_monitor(&mut self) {
        if self.session_ended.load(Ordering::SeqCst) {
            self.teardown();
        }
    }

    fn start_monitoring(&mut self) -> anyhow::Result<()> {
        let identity = Arc::clone(&self.identity);
        let notices = self.notices_tx.clone();
        let ended = Arc::new(AtomicBool::new(false));
        self.session_ended = Arc::clone(&ended);
        let sink = move |show_message: bool| {
            ended.store(true, Ordering::SeqCst);
            identity.clear_identity();
            let _ = notices.send(LogoutNotice { show_message });
        };

        let monitor = MonitorWorker::spawn(self.config.session, sink, Arc::clone(&self.clock))
            .context("could not start the session monitor")?;
        monitor.start()?;
        self.monitor = Some(monitor);
        Ok(())
    }
}

impl Drop for DashboardShell {
    fn drop(&mut self) {
        self.teardown();
    }
}
