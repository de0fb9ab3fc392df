//! Locale data sources
//!
//! The registry never reads files itself. It asks a [`LocaleSource`] for an
//! already-parsed flat mapping and builds a store from it.

use crate::error::{I18nError, I18nResult};
use lingo_common::LocaleId;
use std::collections::HashMap;

/// Flat dot-path key → template mapping produced by a source.
pub type TranslationMap = HashMap<String, String>;

/// Supplies parsed translations for a locale.
pub trait LocaleSource {
    /// Return the flat translations of `locale`.
    ///
    /// Implementations fail with [`I18nError::Load`] when the data is absent
    /// or unreadable.
    fn load_translations(&self, locale: &LocaleId) -> I18nResult<TranslationMap>;
}

/// In-memory source, handy for hosts that already hold their locale data.
#[derive(Debug, Clone, Default)]
pub struct MapSource {
    locales: HashMap<LocaleId, TranslationMap>,
}

impl MapSource {
    /// Create an empty source
    pub fn new() -> Self {
        Self::default()
    }

    /// Add or replace the translations of a locale
    pub fn with_locale(mut self, locale: impl Into<LocaleId>, translations: TranslationMap) -> Self {
        self.locales.insert(locale.into(), translations);
        self
    }

    /// Add or replace the translations of a locale in place
    pub fn insert(&mut self, locale: impl Into<LocaleId>, translations: TranslationMap) {
        self.locales.insert(locale.into(), translations);
    }
}

impl LocaleSource for MapSource {
    fn load_translations(&self, locale: &LocaleId) -> I18nResult<TranslationMap> {
        self.locales
            .get(locale)
            .cloned()
            .ok_or_else(|| I18nError::load(locale, "no translations supplied for this locale"))
    }
}
