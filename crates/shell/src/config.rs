use anyhow::Context;

use memberhub_observability::LogSettings;
use memberhub_session::SessionConfig;

/// Everything the shell reads from its environment.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct ShellConfig {
    pub session: SessionConfig,
    pub logging: LogSettings,
}

impl ShellConfig {
    pub fn from_lookup<F>(lookup: F) -> anyhow::Result<Self>
    where
        F: Fn(&str) -> Option<String>,
    {
        let session =
            SessionConfig::from_lookup(&lookup).context("invalid session monitor configuration")?;
        let logging = LogSettings::from_lookup(&lookup).context("invalid logging configuration")?;
        Ok(Self { session, logging })
    }

    pub fn from_env() -> anyhow::Result<Self> {
        Self::from_lookup(|key| std::env::var(key).ok())
    }
}
