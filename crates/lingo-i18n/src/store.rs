//! Flat key→template storage for a single loaded locale

use crate::source::TranslationMap;
use lingo_common::{is_valid_key, LocaleId};
use std::collections::HashMap;
use tracing::warn;

/// Translations of one locale.
///
/// A store is built once from a [`TranslationMap`] and never mutated
/// afterwards; reloading a locale replaces the whole store.
#[derive(Debug, Clone)]
pub struct LocaleStore {
    locale: LocaleId,
    entries: HashMap<String, String>,
}

impl LocaleStore {
    /// Build a store from already-parsed translations.
    ///
    /// Keys that are empty or start/end with a dot are dropped.
    pub fn new(locale: LocaleId, translations: TranslationMap) -> Self {
        let mut entries = HashMap::with_capacity(translations.len());
        for (key, template) in translations {
            if is_valid_key(&key) {
                entries.insert(key, template);
            } else {
                warn!("Dropping invalid key '{}' from locale {}", key, locale);
            }
        }

        Self { locale, entries }
    }

    /// Create a store with no entries
    pub fn empty(locale: LocaleId) -> Self {
        Self {
            locale,
            entries: HashMap::new(),
        }
    }

    /// Locale this store belongs to
    pub fn locale(&self) -> &LocaleId {
        &self.locale
    }

    /// Look up the raw template for `key`
    #[must_use]
    pub fn get(&self, key: &str) -> Option<&str> {
        self.entries.get(key).map(String::as_str)
    }

    /// Whether `key` has a template
    pub fn contains(&self, key: &str) -> bool {
        self.entries.contains_key(key)
    }

    /// Number of keys
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    /// Whether the store holds no keys
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Iterate over all keys in this store, in no particular order
    pub fn keys(&self) -> impl Iterator<Item = &str> {
        self.entries.keys().map(String::as_str)
    }

    /// Iterate over `(key, template)` pairs
    pub fn iter(&self) -> impl Iterator<Item = (&str, &str)> {
        self.entries.iter().map(|(k, v)| (k.as_str(), v.as_str()))
    }
}
