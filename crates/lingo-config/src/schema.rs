//! Configuration schema definitions using serde.

use lingo_common::{is_valid_locale_format, LingoError, LocaleId};
use serde::{Deserialize, Serialize};
use std::path::PathBuf;

/// Locale file suffixes the locale directory understands.
pub const SUPPORTED_LOCALE_SUFFIXES: &[&str] = &["yml", "yaml", "json", "toml"];

/// Log levels accepted by `logging.level`.
pub const LOG_LEVELS: &[&str] = &["trace", "debug", "info", "warn", "error"];

/// Main configuration structure for lingo.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct Config {
    /// Locale selection and storage.
    pub locale: LocaleConfig,
    /// Message handling.
    pub messages: MessagesConfig,
    /// Markup translation.
    pub markup: MarkupConfig,
    /// Logging output.
    pub logging: LoggingConfig,
}

/// Locale configuration.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct LocaleConfig {
    /// Locale used for translation.
    pub current: LocaleId,
    /// Locale consulted when the current one lacks a key.
    pub fallback: Option<LocaleId>,
    /// Directory holding `<locale>.<suffix>` files.
    pub directory: PathBuf,
    /// Locale file suffix.
    pub suffix: String,
}

/// Message configuration.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct MessagesConfig {
    /// Raw text that suppresses a message.
    pub sentinel: String,
    /// Text prepended to recipient messages.
    pub prefix: String,
}

/// Markup configuration.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct MarkupConfig {
    /// Whether markup tokens are translated at all.
    pub enabled: bool,
    /// Characters that introduce a markup token.
    pub prefixes: String,
}

/// Logging configuration.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct LoggingConfig {
    /// Default filter when `RUST_LOG` is unset.
    pub level: String,
    /// Optional log file; stdout only when absent.
    pub file: Option<PathBuf>,
}

impl MarkupConfig {
    /// Prefix characters as a list.
    pub fn prefix_chars(&self) -> Vec<char> {
        self.prefixes.chars().collect()
    }
}

fn validate_locale(field: &str, locale: &LocaleId) -> Result<(), LingoError> {
    if !is_valid_locale_format(locale.as_str()) {
        return Err(LingoError::Config(format!(
            "{field} '{locale}' is not a valid locale token"
        )));
    }
    locale.language_identifier().map_err(|_| {
        LingoError::Config(format!("{field} '{locale}' is not a language identifier"))
    })?;
    Ok(())
}

impl Config {
    /// Validates the configuration.
    pub fn validate(&self) -> Result<(), LingoError> {
        validate_locale("locale.current", &self.locale.current)?;
        if let Some(fallback) = &self.locale.fallback {
            validate_locale("locale.fallback", fallback)?;
        }

        if !SUPPORTED_LOCALE_SUFFIXES.contains(&self.locale.suffix.to_ascii_lowercase().as_str()) {
            return Err(LingoError::Config(format!(
                "locale.suffix '{}' is not one of {:?}",
                self.locale.suffix, SUPPORTED_LOCALE_SUFFIXES
            )));
        }

        if self.messages.sentinel.is_empty() {
            return Err(LingoError::Config(
                "messages.sentinel cannot be empty".to_string(),
            ));
        }

        if self.markup.enabled {
            if self.markup.prefixes.is_empty() {
                return Err(LingoError::Config(
                    "markup.prefixes cannot be empty while markup is enabled".to_string(),
                ));
            }
            if let Some(bad) = self
                .markup
                .prefixes
                .chars()
                .find(|c| c.is_alphanumeric() || c.is_whitespace() || matches!(c, '#' | '\u{a7}'))
            {
                return Err(LingoError::Config(format!(
                    "markup.prefixes contains unusable character '{bad}'"
                )));
            }
        }

        if !LOG_LEVELS.contains(&self.logging.level.to_ascii_lowercase().as_str()) {
            return Err(LingoError::Config(format!(
                "logging.level '{}' is not one of {:?}",
                self.logging.level, LOG_LEVELS
            )));
        }

        Ok(())
    }
}
