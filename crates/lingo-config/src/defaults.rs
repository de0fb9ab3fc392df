//! Default values for every configuration section.

use crate::schema::*;
use lingo_common::{LocaleId, NO_MESSAGE};
use std::path::PathBuf;

/// Default configuration file name.
pub const DEFAULT_CONFIG_FILE: &str = "lingo.yml";

impl Default for Config {
    fn default() -> Self {
        Self {
            locale: LocaleConfig::default(),
            messages: MessagesConfig::default(),
            markup: MarkupConfig::default(),
            logging: LoggingConfig::default(),
        }
    }
}

impl Default for LocaleConfig {
    fn default() -> Self {
        Self {
            current: LocaleId::default(),
            fallback: None,
            directory: PathBuf::from("locales"),
            suffix: "yml".to_string(),
        }
    }
}

impl Default for MessagesConfig {
    fn default() -> Self {
        Self {
            sentinel: NO_MESSAGE.to_string(),
            prefix: String::new(),
        }
    }
}

impl Default for MarkupConfig {
    fn default() -> Self {
        Self {
            enabled: true,
            prefixes: "&^".to_string(),
        }
    }
}

impl Default for LoggingConfig {
    fn default() -> Self {
        Self {
            level: "info".to_string(),
            file: None,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults_are_valid() {
        let config = Config::default();
        assert!(config.validate().is_ok());
        assert_eq!(config.locale.current.as_str(), "zh_CN");
        assert_eq!(config.messages.sentinel, "none");
        assert_eq!(config.markup.prefix_chars(), vec!['&', '^']);
    }
}
