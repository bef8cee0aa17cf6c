//! Idle-timeout configuration.

use std::time::Duration;

use memberhub_core::ConfigError;

pub const DEFAULT_TIMEOUT: Duration = Duration::from_secs(30 * 60);
pub const DEFAULT_WARNING: Duration = Duration::from_secs(2 * 60);
pub const DEFAULT_TICK: Duration = Duration::from_secs(1);
/// Longest inactivity-check interval; the warning countdown runs at 1 s.
pub const MAX_TICK: Duration = Duration::from_secs(1);

pub const ENV_TIMEOUT_MS: &str = "MEMBERHUB_SESSION_TIMEOUT_MS";
pub const ENV_WARNING_MS: &str = "MEMBERHUB_SESSION_WARNING_MS";
pub const ENV_TICK_MS: &str = "MEMBERHUB_SESSION_TICK_MS";

/// Idle-timeout settings.
///
/// # Invariants
/// - all durations are positive
/// - `warning < timeout`
/// - `tick <= warning` and `tick <= 1s`, so an inactivity check always lands
///   inside the warning window
/// - every duration fits a `chrono::Duration`
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct SessionConfig {
    timeout: Duration,
    warning: Duration,
    tick: Duration,
}

impl Default for SessionConfig {
    fn default() -> Self {
        Self {
            timeout: DEFAULT_TIMEOUT,
            warning: DEFAULT_WARNING,
            tick: DEFAULT_TICK,
        }
    }
}

impl SessionConfig {
    pub fn new(timeout: Duration, warning: Duration) -> Result<Self, ConfigError> {
        Self::with_tick(timeout, warning, DEFAULT_TICK)
    }

    pub fn with_tick(
        timeout: Duration,
        warning: Duration,
        tick: Duration,
    ) -> Result<Self, ConfigError> {
        let config = Self {
            timeout,
            warning,
            tick,
        };
        config.validate()?;
        Ok(config)
    }

    pub fn from_millis(timeout_ms: u64, warning_ms: u64) -> Result<Self, ConfigError> {
        Self::new(
            Duration::from_millis(timeout_ms),
            Duration::from_millis(warning_ms),
        )
    }

    /// Read overrides through `lookup` (missing keys keep their defaults).
    pub fn from_lookup<F>(lookup: F) -> Result<Self, ConfigError>
    where
        F: Fn(&str) -> Option<String>,
    {
        let read = |key: &str, default: Duration| -> Result<Duration, ConfigError> {
            match lookup(key) {
                None => Ok(default),
                Some(raw) => raw
                    .trim()
                    .parse::<u64>()
                    .map(Duration::from_millis)
                    .map_err(|e| ConfigError::invalid(key, format!("'{raw}' is not milliseconds: {e}"))),
            }
        };

        Self::with_tick(
            read(ENV_TIMEOUT_MS, DEFAULT_TIMEOUT)?,
            read(ENV_WARNING_MS, DEFAULT_WARNING)?,
            read(ENV_TICK_MS, DEFAULT_TICK)?,
        )
    }

    pub fn from_env() -> Result<Self, ConfigError> {
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    pub fn validate(&self) -> Result<(), ConfigError> {
        for (key, value) in [
            ("session.timeout", self.timeout),
            ("session.warning", self.warning),
            ("session.tick", self.tick),
        ] {
            if value.is_zero() {
                return Err(ConfigError::invalid(key, "must be positive"));
            }
            if chrono::Duration::from_std(value).is_err() {
                return Err(ConfigError::invalid(key, "out of range"));
            }
        }

        if self.warning >= self.timeout {
            return Err(ConfigError::conflict(format!(
                "session.warning ({} ms) must be shorter than session.timeout ({} ms)",
                self.warning.as_millis(),
                self.timeout.as_millis()
            )));
        }

        if self.tick > self.warning {
            return Err(ConfigError::conflict(format!(
                "session.tick ({} ms) must not exceed session.warning ({} ms)",
                self.tick.as_millis(),
                self.warning.as_millis()
            )));
        }

        if self.tick > MAX_TICK {
            return Err(ConfigError::conflict(format!(
                "session.tick ({} ms) must not exceed {} ms",
                self.tick.as_millis(),
                MAX_TICK.as_millis()
            )));
        }

        Ok(())
    }

    pub fn timeout(&self) -> Duration {
        self.timeout
    }

    pub fn warning(&self) -> Duration {
        self.warning
    }

    pub fn tick(&self) -> Duration {
        self.tick
    }

    /// Inactivity after which the warning appears.
    pub fn warning_after(&self) -> Duration {
        self.timeout - self.warning
    }

    /// Countdown start value, in whole seconds (rounded up).
    pub fn warning_seconds(&self) -> u32 {
        let millis = self.warning.as_millis();
        u32::try_from(millis.div_ceil(1000)).unwrap_or(u32::MAX)
    }
}
