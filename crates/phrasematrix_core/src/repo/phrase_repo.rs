//! Phrase collection codec over the key-value store.
//!
//! # Responsibility
//! - Serialize the full collection to one JSON value and write it under a key.
//! - Read it back, rejecting malformed payloads as a whole.
//!
//! # Invariants
//! - Writes are full-collection replacements, never incremental.
//! - A load either returns every record or fails; partial loads do not exist.
//! - Loaded collections contain no case-insensitive duplicate texts.

use crate::model::phrase::Phrase;
use crate::model::sanitize::normalize_for_compare;
use crate::repo::kv_repo::{KeyValueStore, KvError};
use std::collections::HashSet;
use std::error::Error;
use std::fmt::{Display, Formatter};

/// Failure while reading or writing the persisted collection.
#[derive(Debug)]
pub enum StorageError {
    Store(KvError),
    /// Payload is not a JSON array of phrase records.
    Corrupt(serde_json::Error),
    /// A record parsed but breaks phrase invariants.
    InvalidRecord(String),
}

impl StorageError {
    /// Stable code used in log events.
    pub fn code(&self) -> &'static str {
        match self {
            Self::Store(_) => "store_failed",
            Self::Corrupt(_) => "corrupt_payload",
            Self::InvalidRecord(_) => "invalid_record",
        }
    }
}

impl Display for StorageError {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Store(err) => write!(f, "{err}"),
            Self::Corrupt(err) => write!(f, "corrupt phrase payload: {err}"),
            Self::InvalidRecord(message) => write!(f, "invalid persisted phrase: {message}"),
        }
    }
}

impl Error for StorageError {
    fn source(&self) -> Option<&(dyn Error + 'static)> {
        match self {
            Self::Store(err) => Some(err),
            Self::Corrupt(err) => Some(err),
            Self::InvalidRecord(_) => None,
        }
    }
}

impl From<KvError> for StorageError {
    fn from(value: KvError) -> Self {
        Self::Store(value)
    }
}

impl From<serde_json::Error> for StorageError {
    fn from(value: serde_json::Error) -> Self {
        Self::Corrupt(value)
    }
}

/// Reads the collection stored under `key`.
///
/// Returns an empty collection when the key is absent.
pub fn load_phrases<S: KeyValueStore>(store: &S, key: &str) -> Result<Vec<Phrase>, StorageError> {
    let Some(payload) = store.get(key)? else {
        return Ok(Vec::new());
    };

    let phrases: Vec<Phrase> = serde_json::from_str(&payload)?;
    check_records(&phrases)?;
    Ok(phrases)
}

/// Replaces the collection stored under `key`.
pub fn save_phrases<S: KeyValueStore>(
    store: &mut S,
    key: &str,
    phrases: &[Phrase],
) -> Result<(), StorageError> {
    let payload = serde_json::to_string(phrases)?;
    store.set(key, &payload)?;
    Ok(())
}

fn check_records(phrases: &[Phrase]) -> Result<(), StorageError> {
    let mut seen_ids = HashSet::with_capacity(phrases.len());
    let mut seen_texts = HashSet::with_capacity(phrases.len());

    for phrase in phrases {
        phrase.validate().map_err(StorageError::InvalidRecord)?;
        if !seen_ids.insert(phrase.id.as_str()) {
            return Err(StorageError::InvalidRecord(format!(
                "duplicate phrase id `{}`",
                phrase.id
            )));
        }
        if !seen_texts.insert(normalize_for_compare(&phrase.text)) {
            return Err(StorageError::InvalidRecord(format!(
                "phrase `{}` duplicates an earlier text",
                phrase.id
            )));
        }
    }

    Ok(())
}
