//! Explicit handle that scopes access to an initialized [`PhraseStore`].
//!
//! # Responsibility
//! - Model the "store is available" scope as a value instead of ambient state.
//! - Fail loudly when consumers reach for the store before initialization.
//!
//! # Invariants
//! - Initialization loads from storage exactly once per handle.
//! - Accessing an uninitialized handle returns `ConfigurationError`.

use crate::messages::Locale;
use crate::notify::Notifier;
use crate::repo::kv_repo::KeyValueStore;
use crate::service::phrase_store::PhraseStore;
use std::error::Error;
use std::fmt::{Display, Formatter};

/// Programming error: the phrase contract was used outside its scope.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ConfigurationError {
    NotInitialized,
    AlreadyInitialized,
}

impl Display for ConfigurationError {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::NotInitialized => {
                write!(f, "usePhrases must be used within a PhraseProvider")
            }
            Self::AlreadyInitialized => write!(f, "PhraseProvider is already initialized"),
        }
    }
}

impl Error for ConfigurationError {}

/// Owner of the session's phrase store.
pub struct PhraseProvider<S: KeyValueStore, N: Notifier> {
    inner: Option<PhraseStore<S, N>>,
}

impl<S: KeyValueStore, N: Notifier> Default for PhraseProvider<S, N> {
    fn default() -> Self {
        Self { inner: None }
    }
}

impl<S: KeyValueStore, N: Notifier> PhraseProvider<S, N> {
    /// Creates an uninitialized provider.
    pub fn new() -> Self {
        Self::default()
    }

    /// Creates a provider and immediately loads its store.
    pub fn initialized(store: S, notifier: N, locale: Locale) -> Self {
        Self {
            inner: Some(PhraseStore::load(store, notifier, locale)),
        }
    }

    /// Loads the store; runs once per provider.
    ///
    /// # Errors
    /// - `AlreadyInitialized` on a second call; the existing store is kept.
    pub fn initialize(
        &mut self,
        store: S,
        notifier: N,
        locale: Locale,
    ) -> Result<&mut PhraseStore<S, N>, ConfigurationError> {
        if self.inner.is_some() {
            return Err(ConfigurationError::AlreadyInitialized);
        }
        Ok(self
            .inner
            .insert(PhraseStore::load(store, notifier, locale)))
    }

    pub fn is_initialized(&self) -> bool {
        self.inner.is_some()
    }

    /// Read access to the consumer contract.
    pub fn phrases(&self) -> Result<&PhraseStore<S, N>, ConfigurationError> {
        self.inner.as_ref().ok_or(ConfigurationError::NotInitialized)
    }

    /// Mutable access to the consumer contract.
    pub fn phrases_mut(&mut self) -> Result<&mut PhraseStore<S, N>, ConfigurationError> {
        self.inner.as_mut().ok_or(ConfigurationError::NotInitialized)
    }

    /// Ends the scope and hands back the store, if any.
    pub fn into_inner(self) -> Option<PhraseStore<S, N>> {
        self.inner
    }
}
