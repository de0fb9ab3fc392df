//! Shared utility functions for keys, locale tokens, and raw messages.

use crate::types::NO_MESSAGE;

/// Returns `true` when a raw message must not be delivered.
///
/// A message is suppressed when it is empty or exactly equal to `sentinel`.
pub fn is_suppressed(raw: &str, sentinel: &str) -> bool {
    raw.is_empty() || raw == sentinel
}

/// Same as [`is_suppressed`] with the default `none` sentinel.
pub fn is_suppressed_default(raw: &str) -> bool {
    is_suppressed(raw, NO_MESSAGE)
}

/// Joins a dot-path prefix and a key segment.
pub fn join_key(prefix: &str, segment: &str) -> String {
    if prefix.is_empty() {
        segment.to_string()
    } else {
        format!("{prefix}.{segment}")
    }
}

/// Checks that a translation key is usable.
///
/// Keys must be non-empty and must not start or end with a dot.
pub fn is_valid_key(key: &str) -> bool {
    !key.is_empty() && !key.starts_with('.') && !key.ends_with('.')
}

/// Checks the shape of a locale token before it is used in a file name.
///
/// Accepts ASCII alphanumerics separated by single `-` or `_` characters.
pub fn is_valid_locale_format(locale: &str) -> bool {
    if locale.is_empty() || locale.len() > 20 {
        return false;
    }

    let is_separator = |c: char| c == '-' || c == '_';

    locale.chars().all(|c| c.is_ascii_alphanumeric() || is_separator(c))
        && !locale.starts_with(is_separator)
        && !locale.ends_with(is_separator)
        && !locale.contains("--")
        && !locale.contains("__")
        && !locale.contains("-_")
        && !locale.contains("_-")
}
