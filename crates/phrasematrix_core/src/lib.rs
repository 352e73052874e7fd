//! Core domain logic for PhraseMatrix.
//! This crate is the single source of truth for phrase invariants.

pub mod config;
pub mod db;
pub mod logging;
pub mod messages;
pub mod model;
pub mod notify;
pub mod repo;
pub mod service;

pub use config::{AppConfig, ConfigError};
pub use logging::{default_log_level, init_logging, logging_status};
pub use messages::{Locale, Messages};
pub use model::phrase::{
    validate_phrase_text, Phrase, PhraseId, PhraseValidationError, MAX_PHRASE_CHARS,
};
pub use model::sanitize::{collapse_whitespace, sanitize_phrase_text};
pub use notify::{LogNotifier, Notification, Notifier, RecordingNotifier, Severity};
pub use repo::kv_repo::{KeyValueStore, KvError, KvResult, MemoryKvStore, SqliteKvStore};
pub use repo::phrase_repo::{load_phrases, save_phrases, StorageError};
pub use service::phrase_store::{filter_phrases, PhraseStore};
pub use service::provider::{ConfigurationError, PhraseProvider};

/// Minimal health-check API for early integration.
pub fn ping() -> &'static str {
    "pong"
}

/// Returns the core crate version.
pub fn core_version() -> &'static str {
    env!("CARGO_PKG_VERSION")
}

#[cfg(test)]
mod tests {
    use super::{core_version, ping};

    #[test]
    fn ping_returns_pong() {
        assert_eq!(ping(), "pong");
    }

    #[test]
    fn version_is_not_empty() {
        assert!(!core_version().is_empty());
    }
}
