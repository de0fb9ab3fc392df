//! Test utilities and shared test helpers for lingo.
//!
//! This module provides common testing utilities and fixtures that can be used
//! across all crates in the workspace for unit and integration testing.

use std::sync::Once;

#[cfg(feature = "tracing-subscriber")]
use tracing_subscriber::{fmt, EnvFilter};

/// Initialize test logging once per test run.
static INIT: Once = Once::new();

/// Initialize logging for tests with a sensible default configuration.
/// This function is safe to call multiple times and will only initialize once.
#[cfg(feature = "tracing-subscriber")]
pub fn init_test_logging() {
    INIT.call_once(|| {
        let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("debug"));

        let _ = fmt().with_test_writer().with_env_filter(filter).try_init();
    });
}

/// No-op version when tracing-subscriber is not available
#[cfg(not(feature = "tracing-subscriber"))]
pub fn init_test_logging() {
    INIT.call_once(|| {});
}

/// Create a temporary directory for tests that automatically cleans up.
#[cfg(feature = "tempfile")]
pub fn create_temp_dir() -> tempfile::TempDir {
    tempfile::tempdir().expect("Failed to create temporary directory")
}

/// Locale-related test fixtures.
pub mod locale_fixtures {
    use std::collections::HashMap;

    /// Flat English translations used across the workspace tests.
    pub fn english_translations() -> HashMap<String, String> {
        [
            ("greet.hello", "Hello, {0}!"),
            ("greet.bye", "Goodbye."),
            ("status.online", "&aonline"),
            ("status.players", "{0} of {1} players online"),
        ]
        .into_iter()
        .map(|(k, v)| (k.to_string(), v.to_string()))
        .collect()
    }

    /// Flat Chinese translations missing `status.players`.
    pub fn chinese_translations() -> HashMap<String, String> {
        [
            ("greet.hello", "你好，{0}！"),
            ("greet.bye", "再见。"),
            ("status.online", "&a在线"),
        ]
        .into_iter()
        .map(|(k, v)| (k.to_string(), v.to_string()))
        .collect()
    }

    /// Nested English locale file as YAML.
    pub fn english_locale_yaml() -> &'static str {
        r#"
greet:
  hello: "Hello, {0}!"
  bye: "Goodbye."
status:
  online: "&aonline"
  players: "{0} of {1} players online"
"#
    }

    /// Nested Chinese locale file as YAML.
    pub fn chinese_locale_yaml() -> &'static str {
        r#"
greet:
  hello: "你好，{0}！"
  bye: "再见。"
status:
  online: "&a在线"
"#
    }
}

/// Configuration-related test utilities.
pub mod config_fixtures {
    /// Create a minimal valid test configuration as YAML string.
    pub fn minimal_config_yaml() -> &'static str {
        r#"
locale:
  current: "en_US"
  directory: "locales"
"#
    }

    /// Create a full test configuration as YAML string.
    pub fn full_config_yaml() -> &'static str {
        concat!(
            "locale:\n",
            "  current: \"en_US\"\n",
            "  fallback: \"zh_CN\"\n",
            "  directory: \"locales\"\n",
            "  suffix: \"yml\"\n",
            "\n",
            "messages:\n",
            "  sentinel: \"none\"\n",
            "  prefix: \"&7[Server] \"\n",
            "\n",
            "markup:\n",
            "  enabled: true\n",
            "  prefixes: \"&^\"\n",
            "\n",
            "logging:\n",
            "  level: \"debug\"\n",
        )
    }
}
