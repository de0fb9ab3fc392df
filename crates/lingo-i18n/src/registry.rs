//! Registry of loaded locales and the active locale

use crate::error::{I18nError, I18nResult};
use crate::interpolate::interpolate;
use crate::source::{LocaleSource, TranslationMap};
use crate::store::LocaleStore;
use lingo_common::LocaleId;
use parking_lot::RwLock;
use std::collections::HashMap;
use std::sync::Arc;
use tracing::{debug, info, warn};

#[derive(Debug)]
struct RegistryState {
    stores: HashMap<LocaleId, Arc<LocaleStore>>,
    current: LocaleId,
    fallback: Option<LocaleId>,
}

/// Owns every loaded [`LocaleStore`] and tracks the current locale.
///
/// Mutations (`load`, `insert`, `set_current`, `clear`) take the write lock;
/// lookups share the read lock. Share the registry through an `Arc`.
#[derive(Debug)]
pub struct LocaleRegistry {
    state: RwLock<RegistryState>,
}

impl LocaleRegistry {
    /// Create an empty registry whose current locale is `current`
    pub fn new(current: impl Into<LocaleId>) -> Self {
        Self {
            state: RwLock::new(RegistryState {
                stores: HashMap::new(),
                current: current.into(),
                fallback: None,
            }),
        }
    }

    /// Consult `fallback` when the current store lacks a key
    #[must_use]
    pub fn with_fallback(mut self, fallback: impl Into<LocaleId>) -> Self {
        self.state.get_mut().fallback = Some(fallback.into());
        self
    }

    /// Load `locale` from `source`, replacing any store already bound to it.
    ///
    /// A failed load leaves previously loaded stores untouched.
    pub fn load(&self, locale: &LocaleId, source: &dyn LocaleSource) -> I18nResult<()> {
        debug!("Loading locale: {}", locale);

        let translations = source.load_translations(locale).map_err(|e| {
            warn!("Failed to load locale {}: {}", locale, e);
            e
        })?;
        self.insert(LocaleStore::new(locale.clone(), translations));
        Ok(())
    }

    /// Bind an already-parsed mapping to `locale`
    pub fn load_map(&self, locale: impl Into<LocaleId>, translations: TranslationMap) {
        self.insert(LocaleStore::new(locale.into(), translations));
    }

    /// Bind a store under its own locale, replacing any previous one
    pub fn insert(&self, store: LocaleStore) {
        let locale = store.locale().clone();
        let entries = store.len();
        let replaced = self
            .state
            .write()
            .stores
            .insert(locale.clone(), Arc::new(store))
            .is_some();

        if replaced {
            info!("Reloaded locale {} ({} entries)", locale, entries);
        } else {
            info!("Loaded locale {} ({} entries)", locale, entries);
        }
    }

    /// Translate `key` in the current locale.
    ///
    /// Returns the raw template without interpolation or markup.
    pub fn translate(&self, key: &str) -> I18nResult<String> {
        let state = self.state.read();
        let result = Self::lookup(&state, &state.current, key);

        if let Err(I18nError::KeyNotFound { .. }) = result {
            if let Some(template) = Self::lookup_fallback(&state, key) {
                return Ok(template);
            }
        }
        result
    }

    /// Translate `key` in an explicit locale, ignoring the fallback
    pub fn translate_in(&self, locale: &LocaleId, key: &str) -> I18nResult<String> {
        Self::lookup(&self.state.read(), locale, key)
    }

    /// Translate `key` and interpolate `params` into the template
    pub fn translate_with<S: AsRef<str>>(&self, key: &str, params: &[S]) -> I18nResult<String> {
        let template = self.translate(key)?;
        interpolate(&template, params)
    }

    /// Switch the current locale. Does not load anything.
    pub fn set_current(&self, locale: impl Into<LocaleId>) {
        let locale = locale.into();
        let mut state = self.state.write();
        if !state.stores.contains_key(&locale) {
            warn!("Switching to locale {} which is not loaded yet", locale);
        }
        info!("Current locale: {} -> {}", state.current, locale);
        state.current = locale;
    }

    /// Current locale identifier
    pub fn current(&self) -> LocaleId {
        self.state.read().current.clone()
    }

    /// Fallback locale identifier, if any
    pub fn fallback(&self) -> Option<LocaleId> {
        self.state.read().fallback.clone()
    }

    /// Drop every loaded store
    pub fn clear(&self) {
        let mut state = self.state.write();
        let count = state.stores.len();
        state.stores.clear();
        info!("Cleared {} loaded locales", count);
    }

    /// Check whether a store is bound to `locale`
    pub fn is_loaded(&self, locale: &LocaleId) -> bool {
        self.state.read().stores.contains_key(locale)
    }

    /// All loaded locales, sorted
    pub fn loaded_locales(&self) -> Vec<LocaleId> {
        let mut locales: Vec<LocaleId> = self.state.read().stores.keys().cloned().collect();
        locales.sort();
        locales
    }

    /// Shared handle to the store bound to `locale`
    pub fn store(&self, locale: &LocaleId) -> Option<Arc<LocaleStore>> {
        self.state.read().stores.get(locale).cloned()
    }

    fn lookup(state: &RegistryState, locale: &LocaleId, key: &str) -> I18nResult<String> {
        let store = state
            .stores
            .get(locale)
            .ok_or_else(|| I18nError::LocaleNotLoaded {
                locale: locale.clone(),
            })?;

        store
            .get(key)
            .map(str::to_string)
            .ok_or_else(|| I18nError::KeyNotFound {
                locale: locale.clone(),
                key: key.to_string(),
            })
    }

    fn lookup_fallback(state: &RegistryState, key: &str) -> Option<String> {
        let fallback = state.fallback.as_ref().filter(|f| **f != state.current)?;
        let template = Self::lookup(state, fallback, key).ok()?;
        warn!(
            "Key '{}' not found in locale {}, falling back to {}",
            key, state.current, fallback
        );
        Some(template)
    }
}

impl Default for LocaleRegistry {
    fn default() -> Self {
        Self::new(LocaleId::default())
    }
}
