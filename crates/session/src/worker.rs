use std::sync::Arc;
use std::sync::mpsc;
use std::thread;
use std::time::Duration;

use tracing::{debug, warn};

use memberhub_core::Clock;

use crate::activity::ActivityKind;
use crate::config::SessionConfig;
use crate::error::SessionError;
use crate::monitor::{LogoutSink, SessionMonitor};
use crate::state::SessionSnapshot;

const WORKER_NAME: &str = "memberhub-session-monitor";
const MAX_POLL: Duration = Duration::from_millis(100);

#[derive(Debug)]
enum Command {
    Start,
    Activity(ActivityKind),
    Extend,
    ForceLogout,
    Stop,
    Snapshot(mpsc::Sender<SessionSnapshot>),
    Shutdown,
}

/// Handle to a monitor running on its own thread.
///
/// Dropping the handle shuts the worker down; the monitor is stopped without
/// notifying the sink.
#[derive(Debug)]
pub struct MonitorHandle {
    commands: mpsc::Sender<Command>,
    join: Option<thread::JoinHandle<()>>,
}

impl MonitorHandle {
    pub fn start(&self) -> Result<(), SessionError> {
        self.send(Command::Start)
    }

    pub fn record_activity(&self, kind: ActivityKind) -> Result<(), SessionError> {
        self.send(Command::Activity(kind))
    }

    pub fn extend_session(&self) -> Result<(), SessionError> {
        self.send(Command::Extend)
    }

    pub fn force_logout(&self) -> Result<(), SessionError> {
        self.send(Command::ForceLogout)
    }

    pub fn stop(&self) -> Result<(), SessionError> {
        self.send(Command::Stop)
    }

    /// Current state, after firing any timers that are due.
    pub fn snapshot(&self) -> Result<SessionSnapshot, SessionError> {
        let (reply_tx, reply_rx) = mpsc::channel();
        self.send(Command::Snapshot(reply_tx))?;
        reply_rx.recv().map_err(|_| SessionError::WorkerGone)
    }

    /// Request graceful shutdown and wait for the worker to stop.
    pub fn shutdown(mut self) {
        self.join_worker();
    }

    fn send(&self, command: Command) -> Result<(), SessionError> {
        self.commands
            .send(command)
            .map_err(|_| SessionError::WorkerGone)
    }

    fn join_worker(&mut self) {
        let _ = self.commands.send(Command::Shutdown);
        if let Some(join) = self.join.take() {
            if join.join().is_err() {
                warn!(worker = WORKER_NAME, "session monitor worker panicked");
            }
        }
    }
}

impl Drop for MonitorHandle {
    fn drop(&mut self) {
        self.join_worker();
    }
}

/// Runs a [`SessionMonitor`] on a background thread.
///
/// Time comes from `clock`; timers are polled at the monitor's tick (capped
/// at 100 ms), and every command is applied at `clock.now()`.
#[derive(Debug)]
pub struct MonitorWorker;

impl MonitorWorker {
    pub fn spawn<S>(
        config: SessionConfig,
        sink: S,
        clock: Arc<dyn Clock>,
    ) -> Result<MonitorHandle, SessionError>
    where
        S: LogoutSink + Send + 'static,
    {
        config.validate()?;
        let (commands_tx, commands_rx) = mpsc::channel::<Command>();
        let poll = config.tick().min(MAX_POLL);
        let monitor = SessionMonitor::new(config, sink);

        let join = thread::Builder::new()
            .name(WORKER_NAME.to_string())
            .spawn(move || worker_loop(monitor, clock, commands_rx, poll))
            .map_err(SessionError::Spawn)?;

        Ok(MonitorHandle {
            commands: commands_tx,
            join: Some(join),
        })
    }
}

fn worker_loop<S: LogoutSink>(
    mut monitor: SessionMonitor<S>,
    clock: Arc<dyn Clock>,
    commands: mpsc::Receiver<Command>,
    poll: Duration,
) {
    loop {
        match commands.recv_timeout(poll) {
            Ok(Command::Shutdown) | Err(mpsc::RecvTimeoutError::Disconnected) => break,
            Ok(command) => apply(&mut monitor, command, &*clock),
            Err(mpsc::RecvTimeoutError::Timeout) => {}
        }
        monitor.advance(clock.now());
    }

    monitor.stop();
    debug!(worker = WORKER_NAME, "session monitor worker exited");
}

fn apply<S: LogoutSink>(monitor: &mut SessionMonitor<S>, command: Command, clock: &dyn Clock) {
    let now = clock.now();
    match command {
        Command::Start => monitor.start(now),
        Command::Activity(kind) => {
            monitor.record_activity(kind, now);
        }
        Command::Extend => {
            monitor.extend_session(now);
        }
        Command::ForceLogout => {
            monitor.advance(now);
            monitor.force_logout(now);
        }
        Command::Stop => monitor.stop(),
        Command::Snapshot(reply) => {
            monitor.advance(now);
            // The caller may have given up waiting.
            let _ = reply.send(monitor.snapshot());
        }
        Command::Shutdown => {}
    }
}
