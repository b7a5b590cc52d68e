//! Runtime configuration for the core.
//!
//! # Responsibility
//! - Collect storage, search-latency, logging and alert settings.
//! - Parse them from `YOON_*` environment variables with defaults.
//!
//! # Invariants
//! - A parsed `CoreConfig` always carries a valid storage key.
//! - Logging is configured only when a log directory is given.

use crate::logging::default_log_level;
use once_cell::sync::Lazy;
use regex::Regex;
use std::error::Error;
use std::fmt::{Display, Formatter};
use std::path::PathBuf;
use std::str::FromStr;
use std::time::Duration;

/// Local-storage key the browser app used for the notification collection.
pub const DEFAULT_STORAGE_KEY: &str = "yoon_notifications";

const DEFAULT_SEARCH_DELAY_MS: &str = "200";
const DEFAULT_LOOKUP_DELAY_MS: &str = "100";
const DEFAULT_HISTORY_DELAY_MS: &str = "50";

static STORAGE_KEY_RE: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"^[A-Za-z0-9_.:-]+$").expect("valid storage key regex"));

pub type ConfigResult<T> = Result<T, ConfigError>;

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ConfigError {
    Invalid {
        key: &'static str,
        value: String,
        reason: String,
    },
}

impl Display for ConfigError {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Invalid { key, value, reason } => {
                write!(f, "invalid {key} `{value}`: {reason}")
            }
        }
    }
}

impl Error for ConfigError {}

/// Artificial delays applied by the mock legal service.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct SearchLatency {
    /// Full-catalog text/article searches.
    pub search: Duration,
    /// Single lookups, listings and domain enumeration.
    pub lookup: Duration,
    /// Search-history recording.
    pub history: Duration,
}

impl SearchLatency {
    pub fn none() -> Self {
        Self {
            search: Duration::ZERO,
            lookup: Duration::ZERO,
            history: Duration::ZERO,
        }
    }
}

impl Default for SearchLatency {
    fn default() -> Self {
        Self {
            search: Duration::from_millis(200),
            lookup: Duration::from_millis(100),
            history: Duration::from_millis(50),
        }
    }
}

/// File logging settings consumed by [`crate::logging::init_logging`].
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LogConfig {
    pub level: String,
    pub dir: PathBuf,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CoreConfig {
    /// SQLite file backing local storage; in-memory when `None`.
    pub storage_path: Option<PathBuf>,
    pub storage_key: String,
    pub latency: SearchLatency,
    pub log: Option<LogConfig>,
    /// Whether system-level pop-up alerts may be raised on `add`.
    pub system_alerts: bool,
}

impl Default for CoreConfig {
    fn default() -> Self {
        Self {
            storage_path: None,
            storage_key: DEFAULT_STORAGE_KEY.to_string(),
            latency: SearchLatency::default(),
            log: None,
            system_alerts: true,
        }
    }
}

impl CoreConfig {
    /// Reads configuration from process environment variables.
    pub fn from_env() -> ConfigResult<Self> {
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    /// Reads configuration through an arbitrary variable lookup.
    pub fn from_lookup<F>(lookup: F) -> ConfigResult<Self>
    where
        F: Fn(&str) -> Option<String>,
    {
        let storage_key = lookup("YOON_STORAGE_KEY")
            .map(|value| value.trim().to_string())
            .unwrap_or_else(|| DEFAULT_STORAGE_KEY.to_string());
        validate_storage_key(&storage_key)?;

        let latency = SearchLatency {
            search: parse_millis(&lookup, "YOON_SEARCH_DELAY_MS", DEFAULT_SEARCH_DELAY_MS)?,
            lookup: parse_millis(&lookup, "YOON_LOOKUP_DELAY_MS", DEFAULT_LOOKUP_DELAY_MS)?,
            history: parse_millis(&lookup, "YOON_HISTORY_DELAY_MS", DEFAULT_HISTORY_DELAY_MS)?,
        };

        let log = non_empty(lookup("YOON_LOG_DIR")).map(|dir| LogConfig {
            level: non_empty(lookup("YOON_LOG_LEVEL"))
                .unwrap_or_else(|| default_log_level().to_string()),
            dir: PathBuf::from(dir),
        });

        let system_alerts = match non_empty(lookup("YOON_SYSTEM_ALERTS")) {
            Some(value) => parse_bool("YOON_SYSTEM_ALERTS", &value)?,
            None => true,
        };

        Ok(Self {
            storage_path: non_empty(lookup("YOON_STORAGE_PATH")).map(PathBuf::from),
            storage_key,
            latency,
            log,
            system_alerts,
        })
    }
}

fn validate_storage_key(key: &str) -> ConfigResult<()> {
    if STORAGE_KEY_RE.is_match(key) {
        return Ok(());
    }
    Err(ConfigError::Invalid {
        key: "YOON_STORAGE_KEY",
        value: key.to_string(),
        reason: "expected ASCII letters, digits or `_.:-`".to_string(),
    })
}

fn non_empty(value: Option<String>) -> Option<String> {
    value
        .map(|value| value.trim().to_string())
        .filter(|value| !value.is_empty())
}

fn parse_millis<F>(lookup: &F, key: &'static str, default: &str) -> ConfigResult<Duration>
where
    F: Fn(&str) -> Option<String>,
{
    let value = non_empty(lookup(key)).unwrap_or_else(|| default.to_string());
    parse_value::<u64>(key, &value).map(Duration::from_millis)
}

fn parse_value<T>(key: &'static str, value: &str) -> ConfigResult<T>
where
    T: FromStr,
    <T as FromStr>::Err: Display,
{
    value.parse::<T>().map_err(|err| ConfigError::Invalid {
        key,
        value: value.to_string(),
        reason: err.to_string(),
    })
}

fn parse_bool(key: &'static str, value: &str) -> ConfigResult<bool> {
    match value.to_ascii_lowercase().as_str() {
        "1" | "true" | "yes" | "on" => Ok(true),
        "0" | "false" | "no" | "off" => Ok(false),
        _ => Err(ConfigError::Invalid {
            key,
            value: value.to_string(),
            reason: "expected true|false".to_string(),
        }),
    }
}

#[cfg(test)]
mod tests {
    use super::{ConfigError, CoreConfig, SearchLatency, DEFAULT_STORAGE_KEY};
    use std::collections::HashMap;
    use std::path::PathBuf;
    use std::time::Duration;

    fn config_from(pairs: &[(&str, &str)]) -> Result<CoreConfig, ConfigError> {
        let vars: HashMap<String, String> = pairs
            .iter()
            .map(|(key, value)| (key.to_string(), value.to_string()))
            .collect();
        CoreConfig::from_lookup(|key| vars.get(key).cloned())
    }

    #[test]
    fn empty_environment_yields_defaults() {
        let config = config_from(&[]).unwrap();
        assert_eq!(config, CoreConfig::default());
        assert_eq!(config.storage_key, DEFAULT_STORAGE_KEY);
        assert_eq!(config.latency, SearchLatency::default());
        assert!(config.log.is_none());
    }

    #[test]
    fn overrides_are_applied() {
        let config = config_from(&[
            ("YOON_STORAGE_PATH", "/tmp/yoon.sqlite3"),
            ("YOON_STORAGE_KEY", "yoon_notifications_v2"),
            ("YOON_SEARCH_DELAY_MS", "0"),
            ("YOON_LOG_DIR", "/var/log/yoon"),
            ("YOON_LOG_LEVEL", "warn"),
            ("YOON_SYSTEM_ALERTS", "off"),
        ])
        .unwrap();

        assert_eq!(
            config.storage_path,
            Some(PathBuf::from("/tmp/yoon.sqlite3"))
        );
        assert_eq!(config.storage_key, "yoon_notifications_v2");
        assert_eq!(config.latency.search, Duration::ZERO);
        assert_eq!(config.latency.lookup, Duration::from_millis(100));
        let log = config.log.unwrap();
        assert_eq!(log.level, "warn");
        assert_eq!(log.dir, PathBuf::from("/var/log/yoon"));
        assert!(!config.system_alerts);
    }

    #[test]
    fn invalid_values_are_reported_with_key() {
        let err = config_from(&[("YOON_LOOKUP_DELAY_MS", "soon")]).unwrap_err();
        assert!(matches!(
            err,
            ConfigError::Invalid { key: "YOON_LOOKUP_DELAY_MS", .. }
        ));

        let err = config_from(&[("YOON_STORAGE_KEY", "yoon notifications")]).unwrap_err();
        assert!(err.to_string().contains("YOON_STORAGE_KEY"));

        let err = config_from(&[("YOON_SYSTEM_ALERTS", "maybe")]).unwrap_err();
        assert!(matches!(
            err,
            ConfigError::Invalid { key: "YOON_SYSTEM_ALERTS", .. }
        ));
    }
}
