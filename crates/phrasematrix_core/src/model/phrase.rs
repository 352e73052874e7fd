//! Phrase domain model.
//!
//! # Responsibility
//! - Define the canonical phrase record and its persisted wire shape.
//! - Own the text validation rules applied before a phrase is created.
//!
//! # Invariants
//! - `id` is stable and never reused for another phrase.
//! - `text` is non-empty and at most [`MAX_PHRASE_CHARS`] characters.
//! - `created_at` carries millisecond precision, matching the wire format.

use crate::model::sanitize::normalize_for_compare;
use chrono::{DateTime, SecondsFormat, SubsecRound, Utc};
use serde::{Deserialize, Deserializer, Serialize, Serializer};
use std::error::Error;
use std::fmt::{Display, Formatter};
use uuid::Uuid;

/// Maximum phrase length in characters, counted after sanitization.
pub const MAX_PHRASE_CHARS: usize = 280;

/// Opaque phrase identifier.
///
/// New phrases get a UUID v4 string, but any non-empty string loaded from
/// storage is accepted as-is.
pub type PhraseId = String;

/// Rejection reason for phrase text.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PhraseValidationError {
    /// Text is empty after sanitization and trimming.
    Empty,
    /// Text exceeds the character limit.
    TooLong { len: usize, max: usize },
    /// Another phrase already has the same text, ignoring case.
    Duplicate,
}

impl PhraseValidationError {
    /// Stable machine-readable code for logs and callers.
    pub fn code(&self) -> &'static str {
        match self {
            Self::Empty => "empty",
            Self::TooLong { .. } => "too_long",
            Self::Duplicate => "duplicate",
        }
    }
}

impl Display for PhraseValidationError {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Empty => write!(f, "phrase text cannot be empty"),
            Self::TooLong { len, max } => {
                write!(f, "phrase has {len} characters; at most {max} are allowed")
            }
            Self::Duplicate => write!(f, "phrase already exists"),
        }
    }
}

impl Error for PhraseValidationError {}

/// A single user-authored text entry.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Phrase {
    pub id: PhraseId,
    pub text: String,
    /// Serialized as `createdAt` in RFC 3339 form with millisecond precision.
    #[serde(
        rename = "createdAt",
        serialize_with = "serialize_created_at",
        deserialize_with = "deserialize_created_at"
    )]
    pub created_at: DateTime<Utc>,
}

impl Phrase {
    /// Creates a phrase with a generated id and the current time.
    ///
    /// Does not validate `text`; callers go through [`validate_phrase_text`]
    /// first.
    pub fn new(text: impl Into<String>) -> Self {
        Self {
            id: Uuid::new_v4().to_string(),
            text: text.into(),
            created_at: Utc::now().trunc_subsecs(3),
        }
    }

    /// Creates a phrase with caller-provided identity, used by load/import paths.
    pub fn with_id(
        id: impl Into<PhraseId>,
        text: impl Into<String>,
        created_at: DateTime<Utc>,
    ) -> Self {
        Self {
            id: id.into(),
            text: text.into(),
            created_at,
        }
    }

    /// Checks record-level invariants of a phrase read from storage.
    pub fn validate(&self) -> Result<(), String> {
        if self.id.trim().is_empty() {
            return Err("phrase id is empty".to_string());
        }
        if self.text.trim().is_empty() {
            return Err(format!("phrase `{}` has empty text", self.id));
        }
        let len = self.text.chars().count();
        if len > MAX_PHRASE_CHARS {
            return Err(format!(
                "phrase `{}` has {len} characters; at most {MAX_PHRASE_CHARS} are allowed",
                self.id
            ));
        }
        Ok(())
    }
}

/// Validates already-sanitized phrase text against the current collection.
///
/// Checks run in a fixed order: emptiness, length, then duplicates.
pub fn validate_phrase_text(text: &str, existing: &[Phrase]) -> Result<(), PhraseValidationError> {
    if text.is_empty() {
        return Err(PhraseValidationError::Empty);
    }

    let len = text.chars().count();
    if len > MAX_PHRASE_CHARS {
        return Err(PhraseValidationError::TooLong {
            len,
            max: MAX_PHRASE_CHARS,
        });
    }

    let normalized = normalize_for_compare(text);
    if existing
        .iter()
        .any(|phrase| normalize_for_compare(&phrase.text) == normalized)
    {
        return Err(PhraseValidationError::Duplicate);
    }

    Ok(())
}

fn serialize_created_at<S>(value: &DateTime<Utc>, serializer: S) -> Result<S::Ok, S::Error>
where
    S: Serializer,
{
    serializer.serialize_str(&value.to_rfc3339_opts(SecondsFormat::Millis, true))
}

fn deserialize_created_at<'de, D>(deserializer: D) -> Result<DateTime<Utc>, D::Error>
where
    D: Deserializer<'de>,
{
    let raw = String::deserialize(deserializer)?;
    DateTime::parse_from_rfc3339(&raw)
        .map(|value| value.with_timezone(&Utc))
        .map_err(|err| serde::de::Error::custom(format!("invalid createdAt `{raw}`: {err}")))
}

#[cfg(test)]
mod tests {
    use super::{validate_phrase_text, Phrase, PhraseValidationError, MAX_PHRASE_CHARS};
    use chrono::{TimeZone, Utc};

    #[test]
    fn new_phrase_has_uuid_id_and_millisecond_timestamp() {
        let phrase = Phrase::new("hello");
        assert!(uuid::Uuid::parse_str(&phrase.id).is_ok());
        assert_eq!(phrase.created_at.timestamp_subsec_nanos() % 1_000_000, 0);
    }

    #[test]
    fn validate_checks_length_at_boundary() {
        let at_limit = "a".repeat(MAX_PHRASE_CHARS);
        assert_eq!(validate_phrase_text(&at_limit, &[]), Ok(()));

        let over_limit = "a".repeat(MAX_PHRASE_CHARS + 1);
        assert_eq!(
            validate_phrase_text(&over_limit, &[]),
            Err(PhraseValidationError::TooLong {
                len: MAX_PHRASE_CHARS + 1,
                max: MAX_PHRASE_CHARS
            })
        );
    }

    #[test]
    fn length_counts_characters_not_bytes() {
        let accented = "é".repeat(MAX_PHRASE_CHARS);
        assert_eq!(validate_phrase_text(&accented, &[]), Ok(()));
    }

    #[test]
    fn duplicate_check_ignores_case() {
        let existing = vec![Phrase::new("Hello World")];
        let err = validate_phrase_text("hello WORLD", &existing).unwrap_err();
        assert_eq!(err, PhraseValidationError::Duplicate);
        assert_eq!(err.code(), "duplicate");
    }

    #[test]
    fn wire_format_uses_camel_case_timestamp_with_millis() {
        let created_at = Utc.with_ymd_and_hms(2024, 5, 1, 10, 0, 0).unwrap();
        let phrase = Phrase::with_id("1", "Frase", created_at);

        let json = serde_json::to_value(&phrase).unwrap();
        assert_eq!(json["id"], "1");
        assert_eq!(json["text"], "Frase");
        assert_eq!(json["createdAt"], "2024-05-01T10:00:00.000Z");
    }

    #[test]
    fn validate_rejects_blank_loaded_records() {
        let phrase = Phrase::with_id("", "text", Utc::now());
        assert!(phrase.validate().is_err());

        let phrase = Phrase::with_id("7", "   ", Utc::now());
        assert!(phrase.validate().is_err());
    }

    #[test]
    fn validate_reports_emptiness_before_length() {
        let blank = Phrase::with_id("8", " ".repeat(MAX_PHRASE_CHARS + 5), Utc::now());
        assert!(blank.validate().unwrap_err().contains("empty text"));

        let long = Phrase::with_id("9", "a".repeat(MAX_PHRASE_CHARS + 1), Utc::now());
        assert!(long.validate().unwrap_err().contains("at most"));
    }
}
