//! Localized notification catalog and locale-scoped storage keys.
//!
//! # Invariants
//! - Every locale provides every message.
//! - Storage keys differ per locale so collections never mix languages.

use crate::notify::{Notification, Severity};
use std::fmt::{Display, Formatter};
use std::str::FromStr;

const STORAGE_KEY_PREFIX: &str = "phraseMatrixApp_phrases";

/// UI language for notifications and storage scoping.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Locale {
    #[default]
    En,
    Es,
}

impl Locale {
    pub fn code(self) -> &'static str {
        match self {
            Self::En => "en",
            Self::Es => "es",
        }
    }

    /// Durable store key for this locale's phrase collection.
    pub fn storage_key(self) -> String {
        format!("{STORAGE_KEY_PREFIX}_{}", self.code())
    }

    pub fn messages(self) -> &'static Messages {
        match self {
            Self::En => &EN,
            Self::Es => &ES,
        }
    }
}

impl Display for Locale {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.code())
    }
}

impl FromStr for Locale {
    type Err = String;

    fn from_str(value: &str) -> Result<Self, Self::Err> {
        match value.trim().to_ascii_lowercase().as_str() {
            "en" => Ok(Self::En),
            "es" => Ok(Self::Es),
            other => Err(format!("unsupported locale `{other}`; expected en|es")),
        }
    }
}

/// Notification texts for one locale.
#[derive(Debug)]
pub struct Messages {
    pub validation_title: &'static str,
    pub empty_text: &'static str,
    pub too_long: &'static str,
    pub duplicate: &'static str,
    pub success_title: &'static str,
    pub added: &'static str,
    pub deleted: &'static str,
    pub error_title: &'static str,
    pub load_failed: &'static str,
    pub save_failed: &'static str,
}

impl Messages {
    pub(crate) fn validation(&self, message: &str) -> Notification {
        Notification::new(self.validation_title, message, Severity::Destructive)
    }

    pub(crate) fn success(&self, message: &str) -> Notification {
        Notification::new(self.success_title, message, Severity::Default)
    }

    pub(crate) fn storage_failure(&self, message: &str) -> Notification {
        Notification::new(self.error_title, message, Severity::Destructive)
    }
}

static EN: Messages = Messages {
    validation_title: "Validation Error",
    empty_text: "Phrase text cannot be empty.",
    too_long: "Phrase cannot exceed 280 characters.",
    duplicate: "This phrase already exists in the matrix.",
    success_title: "Success",
    added: "Phrase added successfully!",
    deleted: "Phrase deleted successfully!",
    error_title: "Error",
    load_failed: "Could not load phrases from storage.",
    save_failed: "Could not save phrases to storage.",
};

static ES: Messages = Messages {
    validation_title: "Error de Validación",
    empty_text: "El texto de la frase no puede estar vacío.",
    too_long: "La frase no puede tener más de 280 caracteres.",
    duplicate: "Esta frase ya existe en la matriz.",
    success_title: "Éxito",
    added: "¡Frase añadida con éxito!",
    deleted: "¡Frase eliminada con éxito!",
    error_title: "Error",
    load_failed: "No se pudieron cargar las frases del almacenamiento.",
    save_failed: "No se pudieron guardar las frases en el almacenamiento.",
};

#[cfg(test)]
mod tests {
    use super::Locale;

    #[test]
    fn storage_key_is_scoped_by_locale() {
        assert_eq!(Locale::Es.storage_key(), "phraseMatrixApp_phrases_es");
        assert_eq!(Locale::En.storage_key(), "phraseMatrixApp_phrases_en");
    }

    #[test]
    fn parse_accepts_known_codes() {
        assert_eq!(" ES ".parse::<Locale>().unwrap(), Locale::Es);
        assert!("fr".parse::<Locale>().unwrap_err().contains("unsupported"));
    }
}
