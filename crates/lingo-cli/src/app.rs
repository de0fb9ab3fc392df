//! Application wiring: configuration to registry, resolver and messenger.

use crate::cli::Command;
use crate::error::AppResult;
use lingo_common::LocaleId;
use lingo_config::{Config, ConfigCache, MarkupConfig};
use lingo_i18n::{
    I18nError, LegacyMarkup, LocaleAudit, LocaleDirectory, LocaleFormat, LocaleRegistry,
    LocaleSource, LocaleStore, MarkupTranslator, MessageResolver, PlainMarkup,
};
use lingo_messenger::{Channel, Delivery, MessageSink, Messenger};
use std::sync::Arc;
use tracing::{debug, info, warn};

/// Locale files shipped with the binary, installed when absent.
pub const BUNDLED_LOCALES: &[(&str, &str)] = &[
    ("zh_CN", include_str!("../locales/zh_CN.yml")),
    ("en_US", include_str!("../locales/en_US.yml")),
];

/// Everything derived from one configuration snapshot.
struct Components {
    directory: LocaleDirectory,
    registry: Arc<LocaleRegistry>,
    resolver: Arc<MessageResolver>,
    messenger: Messenger,
}

impl Components {
    fn build(config: &Config, sink: Arc<dyn MessageSink>) -> AppResult<Self> {
        config.validate()?;

        let directory =
            LocaleDirectory::new(&config.locale.directory).with_suffix(config.locale.suffix.clone());
        install_bundled(&directory)?;

        let current = config.locale.current.clone();
        let mut registry = LocaleRegistry::new(current.clone());
        if let Some(fallback) = &config.locale.fallback {
            registry = registry.with_fallback(fallback.clone());
        }

        registry.load(&current, &directory)?;
        if let Some(fallback) = config.locale.fallback.as_ref().filter(|f| **f != current) {
            if let Err(e) = registry.load(fallback, &directory) {
                warn!("Fallback locale {} unavailable: {}", fallback, e);
            }
        }

        let registry = Arc::new(registry);
        let resolver = Arc::new(
            MessageResolver::new(registry.clone())
                .with_markup(build_markup(&config.markup))
                .with_sentinel(config.messages.sentinel.clone()),
        );
        let messenger =
            Messenger::new(resolver.clone(), sink).with_prefix(config.messages.prefix.clone());

        Ok(Self {
            directory,
            registry,
            resolver,
            messenger,
        })
    }
}

/// Picks the markup translator for a configuration.
pub fn build_markup(config: &MarkupConfig) -> Arc<dyn MarkupTranslator> {
    if config.enabled {
        Arc::new(LegacyMarkup::new(config.prefix_chars()))
    } else {
        Arc::new(PlainMarkup)
    }
}

/// Writes the bundled locale files that are missing from `directory`.
///
/// Bundled files are YAML; other suffixes get nothing installed.
pub fn install_bundled(directory: &LocaleDirectory) -> AppResult<usize> {
    if LocaleFormat::from_suffix(directory.suffix()) != Some(LocaleFormat::Yaml) {
        debug!(
            "Skipping bundled locales for suffix '{}'",
            directory.suffix()
        );
        return Ok(0);
    }

    let mut installed = 0;
    for (locale, contents) in BUNDLED_LOCALES {
        if directory.install_default(&LocaleId::new(*locale), contents)? {
            installed += 1;
        }
    }
    Ok(installed)
}

/// Main application state.
pub struct App {
    config: ConfigCache,
    sink: Arc<dyn MessageSink>,
    components: Components,
}

impl App {
    /// Builds the application from a configuration.
    ///
    /// Fails when the configuration is invalid or the current locale cannot
    /// be loaded.
    pub fn new(config: Config, sink: Arc<dyn MessageSink>) -> AppResult<Self> {
        let components = Components::build(&config, sink.clone())?;
        info!(
            "Lingo ready with locale {} ({} locale(s) loaded)",
            config.locale.current,
            components.registry.loaded_locales().len()
        );

        Ok(Self {
            config: ConfigCache::new(config),
            sink,
            components,
        })
    }

    /// Current configuration snapshot.
    pub fn config(&self) -> Arc<Config> {
        self.config.get()
    }

    /// Shared locale registry.
    pub fn registry(&self) -> &Arc<LocaleRegistry> {
        &self.components.registry
    }

    /// Shared message resolver.
    pub fn resolver(&self) -> &Arc<MessageResolver> {
        &self.components.resolver
    }

    /// Messenger bound to the configured sink.
    pub fn messenger(&self) -> &Messenger {
        &self.components.messenger
    }

    /// Applies a new configuration.
    ///
    /// Locales are reloaded before anything is swapped, so a failed reload
    /// leaves the running state untouched.
    pub fn reload(&mut self, config: Config) -> AppResult<()> {
        let components = Components::build(&config, self.sink.clone())?;
        self.config.replace(config)?;
        self.components = components;
        info!("Reloaded configuration and locales");
        Ok(())
    }

    /// Resolves a raw message and writes it to the console channel.
    ///
    /// Returns `false` when the message was suppressed.
    pub fn resolve(&self, raw: &str, args: &[String]) -> AppResult<bool> {
        Ok(self.components.messenger.console(raw, args)?)
    }

    /// Translates one key strictly and writes it to the console channel.
    pub fn translate(&self, key: &str, args: &[String]) -> AppResult<()> {
        let text = self.components.resolver.resolve_key(key, args)?;
        self.sink.deliver(Delivery::new(Channel::Console, text))?;
        Ok(())
    }

    /// Keys and templates of the current locale, sorted by key.
    pub fn keys(&self) -> AppResult<Vec<(String, String)>> {
        let current = self.components.registry.current();
        let store = self
            .components
            .registry
            .store(&current)
            .ok_or(I18nError::LocaleNotLoaded { locale: current })?;

        let mut entries: Vec<(String, String)> = store
            .iter()
            .map(|(key, template)| (key.to_string(), template.to_string()))
            .collect();
        entries.sort();
        Ok(entries)
    }

    /// Audits every locale file in the directory against `reference`.
    ///
    /// Uses the current locale when no reference is given. A file that fails
    /// to parse is reported as an issue instead of aborting the audit.
    pub fn check(&self, reference: Option<LocaleId>) -> AppResult<LocaleAudit> {
        let reference = reference.unwrap_or_else(|| self.components.registry.current());
        let directory = &self.components.directory;

        let mut stores = Vec::new();
        let mut unreadable = Vec::new();
        for locale in directory.available_locales()? {
            match directory.load_translations(&locale) {
                Ok(translations) => stores.push(LocaleStore::new(locale, translations)),
                Err(e) => {
                    warn!("Auditing without unreadable locale {}: {}", locale, e);
                    unreadable.push((locale, e));
                }
            }
        }

        let Some(reference_store) = stores.iter().find(|store| *store.locale() == reference)
        else {
            return Err(match unreadable.into_iter().find(|(l, _)| *l == reference) {
                Some((_, e)) => e.into(),
                None => I18nError::LocaleNotLoaded { locale: reference }.into(),
            });
        };

        let mut audit = LocaleAudit::compare(reference_store, stores.iter());
        for (locale, e) in unreadable {
            audit.record_unreadable(locale, e);
        }
        info!(
            "Audited {} locale(s): {} issue(s)",
            stores.len(),
            audit.issues().len()
        );
        Ok(audit)
    }

    /// Runs one subcommand, printing through the sink.
    ///
    /// Returns `false` when `check` found inconsistencies.
    pub fn run(&self, command: &Command) -> AppResult<bool> {
        match command {
            Command::Resolve { message, args } => {
                if !self.resolve(message, args)? {
                    debug!("Message suppressed, nothing printed");
                }
                Ok(true)
            }
            Command::Translate { key, args } => {
                self.translate(key, args)?;
                Ok(true)
            }
            Command::Keys => {
                for (key, template) in self.keys()? {
                    self.print(format!("{key} = {template}"))?;
                }
                Ok(true)
            }
            Command::Check { reference } => {
                let reference = reference
                    .as_deref()
                    .map_or_else(|| self.components.registry.current(), LocaleId::new);
                let audit = self.check(Some(reference.clone()))?;
                for issue in audit.issues() {
                    self.print(issue.to_string())?;
                }
                if audit.is_clean() {
                    self.print(format!("All locales consistent with {reference}"))?;
                }
                Ok(audit.is_clean())
            }
        }
    }

    fn print(&self, line: String) -> AppResult<()> {
        self.sink.deliver(Delivery::new(Channel::Console, line))?;
        Ok(())
    }
}

impl std::fmt::Debug for App {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("App")
            .field("config", &self.config.get())
            .field("resolver", &self.components.resolver)
            .finish_non_exhaustive()
    }
}
