//! Common type definitions and newtype wrappers for domain modeling.

use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;
use unic_langid::LanguageIdentifier;

/// Token that suppresses a message when used as the whole raw text.
pub const NO_MESSAGE: &str = "none";

/// Locale loaded when nothing else is configured.
pub const DEFAULT_LOCALE: &str = "zh_CN";

/// A locale identifier such as `zh_CN` or `en-US`.
///
/// The token is opaque: two identifiers are equal only when their text is.
/// [`LocaleId::language_identifier`] is available for validation.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(transparent)]
pub struct LocaleId(String);

impl LocaleId {
    /// Creates a locale identifier from any string-like value.
    pub fn new(id: impl Into<String>) -> Self {
        Self(id.into())
    }

    /// Returns the identifier text.
    #[must_use]
    pub fn as_str(&self) -> &str {
        &self.0
    }

    /// Parses the identifier as a BCP 47 language identifier.
    ///
    /// Both `zh_CN` and `zh-CN` are accepted.
    pub fn language_identifier(&self) -> std::result::Result<LanguageIdentifier, LingoError> {
        self.0
            .parse()
            .map_err(|_| LingoError::Locale(format!("invalid locale identifier '{}'", self.0)))
    }
}

impl Default for LocaleId {
    fn default() -> Self {
        Self::new(DEFAULT_LOCALE)
    }
}

impl fmt::Display for LocaleId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

impl FromStr for LocaleId {
    type Err = LingoError;

    fn from_str(s: &str) -> std::result::Result<Self, Self::Err> {
        let trimmed = s.trim();
        if trimmed.is_empty() {
            return Err(LingoError::Locale("locale identifier cannot be empty".to_string()));
        }
        Ok(Self::new(trimmed))
    }
}

impl From<&str> for LocaleId {
    fn from(id: &str) -> Self {
        Self::new(id)
    }
}

impl From<String> for LocaleId {
    fn from(id: String) -> Self {
        Self(id)
    }
}

impl AsRef<str> for LocaleId {
    fn as_ref(&self) -> &str {
        &self.0
    }
}

/// Common result type for the application.
pub type Result<T> = std::result::Result<T, Box<dyn std::error::Error + Send + Sync>>;

/// Application-wide error type.
#[derive(thiserror::Error, Debug)]
pub enum LingoError {
    /// Configuration error.
    #[error("Configuration error: {0}")]
    Config(String),

    /// Locale identifier or locale data error.
    #[error("Locale error: {0}")]
    Locale(String),

    /// I/O error.
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    /// Serialization error.
    #[error("Serialization error: {0}")]
    Serialization(String),
}
