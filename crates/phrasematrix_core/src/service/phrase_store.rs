//! Phrase state container.
//!
//! # Responsibility
//! - Hold the in-memory collection and the current search term.
//! - Run sanitize → validate → mutate → persist → notify for every change.
//! - Derive the filtered view on demand.
//!
//! # Invariants
//! - Collection order is newest first.
//! - Persistence writes follow the in-memory mutation they reflect, and only
//!   for mutations that changed state.
//! - Storage failures never roll back in-memory state and never reach the
//!   caller; they are logged and reported through the notifier.
//! - Log events carry ids, lengths and counts, never phrase text.

use crate::messages::{Locale, Messages};
use crate::model::phrase::{validate_phrase_text, Phrase, PhraseValidationError};
use crate::model::sanitize::{normalize_for_compare, sanitize_phrase_text};
use crate::notify::Notifier;
use crate::repo::kv_repo::KeyValueStore;
use crate::repo::phrase_repo::{load_phrases, save_phrases};
use log::{debug, error, info};

/// Returns phrases whose text contains `term`, ignoring case.
///
/// Preserves input order. An empty term matches everything.
pub fn filter_phrases<'a>(phrases: &'a [Phrase], term: &str) -> Vec<&'a Phrase> {
    let needle = normalize_for_compare(term);
    phrases
        .iter()
        .filter(|phrase| normalize_for_compare(&phrase.text).contains(&needle))
        .collect()
}

/// In-memory phrase collection synchronized with a durable key-value store.
pub struct PhraseStore<S: KeyValueStore, N: Notifier> {
    phrases: Vec<Phrase>,
    search_term: String,
    locale: Locale,
    storage_key: String,
    store: S,
    notifier: N,
}

impl<S: KeyValueStore, N: Notifier> PhraseStore<S, N> {
    /// Loads the collection for `locale` from `store`.
    ///
    /// Never fails: an unreadable or malformed collection yields an empty
    /// store plus one destructive notification.
    pub fn load(store: S, notifier: N, locale: Locale) -> Self {
        let storage_key = locale.storage_key();
        let phrases = match load_phrases(&store, &storage_key) {
            Ok(phrases) => {
                info!(
                    "event=phrases_load module=store status=ok locale={} count={}",
                    locale,
                    phrases.len()
                );
                phrases
            }
            Err(err) => {
                error!(
                    "event=phrases_load module=store status=error locale={} error_code={} error={}",
                    locale,
                    err.code(),
                    err
                );
                notifier.notify(locale.messages().storage_failure(locale.messages().load_failed));
                Vec::new()
            }
        };

        Self {
            phrases,
            search_term: String::new(),
            locale,
            storage_key,
            store,
            notifier,
        }
    }

    /// Full collection, newest first.
    pub fn phrases(&self) -> &[Phrase] {
        &self.phrases
    }

    pub fn search_term(&self) -> &str {
        &self.search_term
    }

    /// Stores the term verbatim; no trimming.
    pub fn set_search_term(&mut self, term: impl Into<String>) {
        self.search_term = term.into();
        debug!(
            "event=search_term_set module=store status=ok term_len={}",
            self.search_term.chars().count()
        );
    }

    /// Phrases matching the current search term, in collection order.
    pub fn filtered_phrases(&self) -> Vec<&Phrase> {
        filter_phrases(&self.phrases, &self.search_term)
    }

    pub fn locale(&self) -> Locale {
        self.locale
    }

    pub fn notifier(&self) -> &N {
        &self.notifier
    }

    pub fn store(&self) -> &S {
        &self.store
    }

    /// Sanitizes, validates and prepends a new phrase.
    ///
    /// Rejections leave state untouched and emit one validation notification.
    /// Success persists the collection and emits one success notification.
    ///
    /// # Errors
    /// - `Empty` when nothing remains after sanitizing and trimming.
    /// - `TooLong` when the text exceeds the character limit.
    /// - `Duplicate` when the text matches an existing phrase, ignoring case.
    pub fn add_phrase(&mut self, raw: &str) -> Result<Phrase, PhraseValidationError> {
        let text = sanitize_phrase_text(raw);

        if let Err(err) = validate_phrase_text(&text, &self.phrases) {
            info!(
                "event=phrase_add module=store status=rejected reason={} input_len={}",
                err.code(),
                raw.chars().count()
            );
            let messages = self.messages();
            let message = match err {
                PhraseValidationError::Empty => messages.empty_text,
                PhraseValidationError::TooLong { .. } => messages.too_long,
                PhraseValidationError::Duplicate => messages.duplicate,
            };
            self.notifier.notify(messages.validation(message));
            return Err(err);
        }

        let phrase = Phrase::new(text);
        self.phrases.insert(0, phrase.clone());
        info!(
            "event=phrase_add module=store status=ok phrase_id={} text_len={} count={}",
            phrase.id,
            phrase.text.chars().count(),
            self.phrases.len()
        );

        self.persist();
        let messages = self.messages();
        self.notifier.notify(messages.success(messages.added));
        Ok(phrase)
    }

    /// Removes the phrase with `id`.
    ///
    /// Returns `false` for unknown ids, which is a silent no-op: no write and
    /// no notification.
    pub fn delete_phrase(&mut self, id: &str) -> bool {
        let Some(position) = self.phrases.iter().position(|phrase| phrase.id == id) else {
            debug!("event=phrase_delete module=store status=noop phrase_id={id}");
            return false;
        };

        self.phrases.remove(position);
        info!(
            "event=phrase_delete module=store status=ok phrase_id={} count={}",
            id,
            self.phrases.len()
        );

        self.persist();
        let messages = self.messages();
        self.notifier.notify(messages.success(messages.deleted));
        true
    }

    fn messages(&self) -> &'static Messages {
        self.locale.messages()
    }

    fn persist(&mut self) {
        if let Err(err) = save_phrases(&mut self.store, &self.storage_key, &self.phrases) {
            error!(
                "event=phrases_save module=store status=error locale={} count={} error_code={} error={}",
                self.locale,
                self.phrases.len(),
                err.code(),
                err
            );
            let messages = self.messages();
            self.notifier
                .notify(messages.storage_failure(messages.save_failed));
        }
    }
}

#[cfg(test)]
mod tests {
    use super::filter_phrases;
    use crate::model::phrase::Phrase;

    fn sample() -> Vec<Phrase> {
        vec![
            Phrase::new("Manzana roja"),
            Phrase::new("Banana amarilla"),
            Phrase::new("Manzana verde"),
        ]
    }

    #[test]
    fn empty_term_matches_everything_in_order() {
        let phrases = sample();
        let filtered = filter_phrases(&phrases, "");
        assert_eq!(filtered.len(), 3);
        assert_eq!(filtered[1].text, "Banana amarilla");
    }

    #[test]
    fn matching_is_case_insensitive_substring() {
        let phrases = sample();
        let filtered = filter_phrases(&phrases, "MANZANA");
        let texts: Vec<&str> = filtered.iter().map(|phrase| phrase.text.as_str()).collect();
        assert_eq!(texts, vec!["Manzana roja", "Manzana verde"]);
    }

    #[test]
    fn untrimmed_term_is_matched_verbatim() {
        let phrases = sample();
        assert_eq!(filter_phrases(&phrases, " roja").len(), 1);
        assert!(filter_phrases(&phrases, "roja ").is_empty());
    }

    #[test]
    fn unmatched_term_yields_nothing() {
        let phrases = sample();
        assert!(filter_phrases(&phrases, "kiwi").is_empty());
    }
}
