//! `memberhub-shell`: wires the dashboard core together for a host UI.

pub mod config;
pub mod shell;

pub use config::ShellConfig;
pub use shell::{DashboardShell, LogoutNotice};

/// Install the process tracing subscriber from `config`.
pub fn init_tracing(config: &ShellConfig) -> bool {
    memberhub_observability::init_with(&config.logging)
}
