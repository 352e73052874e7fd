//! Application configuration resolution.
//!
//! # Responsibility
//! - Resolve data directory, locale and logging settings from defaults and
//!   environment variables.
//! - Validate values once, before any storage is opened.
//!
//! # Invariants
//! - Precedence is defaults < environment < explicit overrides.
//! - `log_dir` defaults to `<data_dir>/logs` unless set explicitly.

use crate::logging::{default_log_level, normalize_level};
use crate::messages::Locale;
use std::error::Error;
use std::fmt::{Display, Formatter};
use std::path::{Path, PathBuf};

pub const ENV_DATA_DIR: &str = "PHRASEMATRIX_DATA_DIR";
pub const ENV_LOCALE: &str = "PHRASEMATRIX_LOCALE";
pub const ENV_LOG_LEVEL: &str = "PHRASEMATRIX_LOG_LEVEL";
pub const ENV_LOG_DIR: &str = "PHRASEMATRIX_LOG_DIR";

const APP_DIR_NAME: &str = "phrasematrix";
const DB_FILE_NAME: &str = "phrasematrix.sqlite3";

/// Invalid configuration value.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ConfigError {
    InvalidLocale(String),
    InvalidLogLevel(String),
}

impl Display for ConfigError {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::InvalidLocale(message) => write!(f, "invalid locale: {message}"),
            Self::InvalidLogLevel(message) => write!(f, "invalid log level: {message}"),
        }
    }
}

impl Error for ConfigError {}

/// Resolved runtime settings.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AppConfig {
    pub data_dir: PathBuf,
    pub locale: Locale,
    pub log_level: &'static str,
    log_dir: Option<PathBuf>,
}

impl Default for AppConfig {
    fn default() -> Self {
        Self {
            data_dir: default_data_dir(),
            locale: Locale::default(),
            log_level: default_log_level(),
            log_dir: None,
        }
    }
}

impl AppConfig {
    /// Resolves configuration from the process environment.
    pub fn from_env() -> Result<Self, ConfigError> {
        Self::from_lookup(|name| std::env::var(name).ok())
    }

    /// Resolves configuration from an arbitrary variable lookup.
    pub fn from_lookup<F>(lookup: F) -> Result<Self, ConfigError>
    where
        F: Fn(&str) -> Option<String>,
    {
        let mut config = Self::default();
        let non_empty = |name: &str| lookup(name).filter(|value| !value.trim().is_empty());

        if let Some(dir) = non_empty(ENV_DATA_DIR) {
            config.data_dir = PathBuf::from(dir);
        }
        if let Some(locale) = non_empty(ENV_LOCALE) {
            config.set_locale(&locale)?;
        }
        if let Some(level) = non_empty(ENV_LOG_LEVEL) {
            config.set_log_level(&level)?;
        }
        if let Some(dir) = non_empty(ENV_LOG_DIR) {
            config.log_dir = Some(PathBuf::from(dir));
        }

        Ok(config)
    }

    pub fn set_locale(&mut self, value: &str) -> Result<(), ConfigError> {
        self.locale = value.parse().map_err(ConfigError::InvalidLocale)?;
        Ok(())
    }

    pub fn set_log_level(&mut self, value: &str) -> Result<(), ConfigError> {
        self.log_level = normalize_level(value).map_err(ConfigError::InvalidLogLevel)?;
        Ok(())
    }

    pub fn set_log_dir(&mut self, dir: impl Into<PathBuf>) {
        self.log_dir = Some(dir.into());
    }

    /// Explicit log directory, or `<data_dir>/logs`.
    pub fn log_dir(&self) -> PathBuf {
        self.log_dir
            .clone()
            .unwrap_or_else(|| self.data_dir.join("logs"))
    }

    /// SQLite file holding the key-value store.
    pub fn db_path(&self) -> PathBuf {
        self.data_dir.join(DB_FILE_NAME)
    }
}

fn default_data_dir() -> PathBuf {
    dirs::data_dir()
        .map(|dir| dir.join(APP_DIR_NAME))
        .unwrap_or_else(|| Path::new("data").to_path_buf())
}

#[cfg(test)]
mod tests {
    use super::{AppConfig, ConfigError, ENV_DATA_DIR, ENV_LOCALE, ENV_LOG_DIR, ENV_LOG_LEVEL};
    use crate::messages::Locale;
    use std::collections::HashMap;
    use std::path::PathBuf;

    fn lookup_from(pairs: &[(&str, &str)]) -> impl Fn(&str) -> Option<String> {
        let vars: HashMap<String, String> = pairs
            .iter()
            .map(|(key, value)| (key.to_string(), value.to_string()))
            .collect();
        move |name| vars.get(name).cloned()
    }

    #[test]
    fn environment_overrides_defaults() {
        let config = AppConfig::from_lookup(lookup_from(&[
            (ENV_DATA_DIR, "/tmp/phrases"),
            (ENV_LOCALE, "es"),
            (ENV_LOG_LEVEL, "WARNING"),
        ]))
        .unwrap();

        assert_eq!(config.data_dir, PathBuf::from("/tmp/phrases"));
        assert_eq!(config.locale, Locale::Es);
        assert_eq!(config.log_level, "warn");
        assert_eq!(config.log_dir(), PathBuf::from("/tmp/phrases/logs"));
        assert_eq!(
            config.db_path(),
            PathBuf::from("/tmp/phrases/phrasematrix.sqlite3")
        );
    }

    #[test]
    fn blank_variables_are_ignored() {
        let config = AppConfig::from_lookup(lookup_from(&[(ENV_LOCALE, "  ")])).unwrap();
        assert_eq!(config.locale, Locale::En);
    }

    #[test]
    fn explicit_log_dir_wins() {
        let config = AppConfig::from_lookup(lookup_from(&[
            (ENV_DATA_DIR, "/tmp/phrases"),
            (ENV_LOG_DIR, "/var/log/phrases"),
        ]))
        .unwrap();
        assert_eq!(config.log_dir(), PathBuf::from("/var/log/phrases"));
    }

    #[test]
    fn invalid_values_are_rejected() {
        let err = AppConfig::from_lookup(lookup_from(&[(ENV_LOCALE, "fr")])).unwrap_err();
        assert!(matches!(err, ConfigError::InvalidLocale(_)));

        let mut config = AppConfig::default();
        let err = config.set_log_level("loud").unwrap_err();
        assert!(matches!(err, ConfigError::InvalidLogLevel(_)));
    }
}
