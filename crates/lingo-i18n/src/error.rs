//! Error types for localization operations

use lingo_common::LocaleId;
use thiserror::Error;

/// Errors that can occur during localization operations
#[derive(Error, Debug)]
pub enum I18nError {
    /// A locale source could not supply data for a locale
    #[error("Failed to load locale {locale}: {reason}")]
    Load {
        /// Locale that failed to load
        locale: LocaleId,
        /// Cause reported by the source
        reason: String,
    },

    /// Translation requested against a locale that has no loaded store
    #[error("Locale not loaded: {locale}")]
    LocaleNotLoaded {
        /// Locale that was asked for
        locale: LocaleId,
    },

    /// Key absent from an otherwise loaded store
    #[error("Key '{key}' not found in locale {locale}")]
    KeyNotFound {
        /// Locale that was searched
        locale: LocaleId,
        /// Missing key
        key: String,
    },

    /// Placeholders present but no parameters supplied
    #[error("Template contains placeholders but no parameters were supplied: {template}")]
    MissingParameters {
        /// Template that needed parameters
        template: String,
    },

    /// Locale token unusable as an identifier or file name
    #[error("Invalid locale identifier: {0}")]
    InvalidLocaleId(String),

    /// IO error occurred
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
}

impl I18nError {
    /// Builds a [`I18nError::Load`] from any displayable cause.
    pub fn load(locale: &LocaleId, reason: impl std::fmt::Display) -> Self {
        Self::Load {
            locale: locale.clone(),
            reason: reason.to_string(),
        }
    }
}

/// Result type for i18n operations
pub type I18nResult<T> = Result<T, I18nError>;
