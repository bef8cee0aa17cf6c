//! Subscriber installation.
//!
//! Filtering always comes from `RUST_LOG` when set; `LogSettings` only picks
//! the output format and the fallback directive.

use std::str::FromStr;

use tracing_subscriber::EnvFilter;

use memberhub_core::ConfigError;

pub const ENV_LOG_FORMAT: &str = "MEMBERHUB_LOG_FORMAT";

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum LogFormat {
    #[default]
    Json,
    Pretty,
}

impl FromStr for LogFormat {
    type Err = ConfigError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "json" => Ok(LogFormat::Json),
            "pretty" | "text" => Ok(LogFormat::Pretty),
            other => Err(ConfigError::invalid(
                ENV_LOG_FORMAT,
                format!("unknown log format '{other}' (expected json or pretty)"),
            )),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LogSettings {
    pub format: LogFormat,
    /// Used when `RUST_LOG` is unset or unparsable.
    pub default_directive: String,
}

impl Default for LogSettings {
    fn default() -> Self {
        Self {
            format: LogFormat::Json,
            default_directive: "info".to_string(),
        }
    }
}

impl LogSettings {
    pub fn from_lookup<F>(lookup: F) -> Result<Self, ConfigError>
    where
        F: Fn(&str) -> Option<String>,
    {
        let format = match lookup(ENV_LOG_FORMAT) {
            Some(raw) => raw.parse()?,
            None => LogFormat::default(),
        };
        Ok(Self {
            format,
            ..Self::default()
        })
    }

    pub fn from_env() -> Result<Self, ConfigError> {
        Self::from_lookup(|key| std::env::var(key).ok())
    }
}

/// Install the process subscriber: JSON, `RUST_LOG` filtering, `info` fallback.
///
/// Safe to call multiple times (subsequent calls are no-ops).
pub fn init() {
    init_with(&LogSettings::default());
}

/// Returns `false` when a global subscriber was already installed.
pub fn init_with(settings: &LogSettings) -> bool {
    let filter = EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| EnvFilter::new(&settings.default_directive));

    let builder = tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_timer(tracing_subscriber::fmt::time::SystemTime);

    match settings.format {
        LogFormat::Json => builder.json().with_target(false).try_init().is_ok(),
        LogFormat::Pretty => builder.pretty().try_init().is_ok(),
    }
}

/// Subscriber for tests: output goes through the test harness capture.
pub fn init_for_tests() {
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("debug"));
    let _ = tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_test_writer()
        .try_init();
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn format_parses_case_insensitively() {
        assert_eq!("JSON".parse::<LogFormat>().unwrap(), LogFormat::Json);
        assert_eq!(" pretty ".parse::<LogFormat>().unwrap(), LogFormat::Pretty);
        assert!(matches!(
            "xml".parse::<LogFormat>(),
            Err(ConfigError::InvalidValue { key, .. }) if key == ENV_LOG_FORMAT
        ));
    }

    #[test]
    fn settings_default_to_json_info() {
        let settings = LogSettings::from_lookup(|_| None).unwrap();
        assert_eq!(settings, LogSettings::default());

        let settings =
            LogSettings::from_lookup(|k| (k == ENV_LOG_FORMAT).then(|| "pretty".to_string()))
                .unwrap();
        assert_eq!(settings.format, LogFormat::Pretty);
    }

    #[test]
    fn repeated_init_is_harmless() {
        init_for_tests();
        init_for_tests();
        init();
        assert!(!init_with(&LogSettings::default()));
    }
}
