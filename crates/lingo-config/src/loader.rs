//! Configuration loading and persistence with atomic file operations.

use crate::defaults::DEFAULT_CONFIG_FILE;
use crate::schema::Config;
use lingo_common::{LingoError, LocaleId, Result};
use std::io::Write;
use std::path::{Path, PathBuf};
use tracing::{debug, info};

/// Environment variable overriding `locale.current`.
pub const ENV_LOCALE: &str = "LINGO_LOCALE";
/// Environment variable overriding `locale.directory`.
pub const ENV_LOCALES_DIR: &str = "LINGO_LOCALES_DIR";
/// Environment variable overriding `logging.level`.
pub const ENV_LOG_LEVEL: &str = "LINGO_LOG_LEVEL";

/// Serialization format of a configuration file.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ConfigFormat {
    /// YAML (`.yml`, `.yaml`, or no extension).
    Yaml,
    /// TOML (`.toml`).
    Toml,
    /// JSON (`.json`).
    Json,
}

impl ConfigFormat {
    /// Picks the format from the file extension.
    pub fn from_path(path: &Path) -> Result<Self> {
        match path.extension().and_then(|e| e.to_str()) {
            None => Ok(Self::Yaml),
            Some(ext) => match ext.to_ascii_lowercase().as_str() {
                "yml" | "yaml" => Ok(Self::Yaml),
                "toml" => Ok(Self::Toml),
                "json" => Ok(Self::Json),
                other => Err(LingoError::Config(format!(
                    "unsupported configuration extension '{other}'"
                ))
                .into()),
            },
        }
    }

    /// Parses configuration text.
    pub fn parse(self, content: &str) -> Result<Config> {
        let config: Config = match self {
            Self::Yaml => serde_yaml::from_str(content)
                .map_err(|e| LingoError::Serialization(e.to_string()))?,
            Self::Toml => {
                toml::from_str(content).map_err(|e| LingoError::Serialization(e.to_string()))?
            }
            Self::Json => serde_json::from_str(content)
                .map_err(|e| LingoError::Serialization(e.to_string()))?,
        };
        Ok(config)
    }

    /// Renders configuration text.
    pub fn render(self, config: &Config) -> Result<String> {
        let content: String = match self {
            Self::Yaml => serde_yaml::to_string(config)
                .map_err(|e| LingoError::Serialization(e.to_string()))?,
            Self::Toml => toml::to_string_pretty(config)
                .map_err(|e| LingoError::Serialization(e.to_string()))?,
            Self::Json => serde_json::to_string_pretty(config)
                .map_err(|e| LingoError::Serialization(e.to_string()))?,
        };
        Ok(content)
    }
}

/// Configuration loader with atomic file operations.
#[derive(Debug, Clone)]
pub struct ConfigLoader {
    path: PathBuf,
}

impl ConfigLoader {
    /// Creates a new configuration loader.
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }

    /// Path of the configuration file.
    pub fn path(&self) -> &Path {
        &self.path
    }

    /// Loads and validates configuration from file.
    pub async fn load(&self) -> Result<Config> {
        let format = ConfigFormat::from_path(&self.path)?;
        debug!("Loading configuration from {:?}", self.path);

        let content = tokio::fs::read_to_string(&self.path).await.map_err(|e| {
            LingoError::Config(format!("cannot read {}: {e}", self.path.display()))
        })?;

        let config = if content.trim().is_empty() {
            Config::default()
        } else {
            format.parse(&content)?
        };
        config.validate()?;

        info!("Loaded configuration from {:?}", self.path);
        Ok(config)
    }

    /// Loads configuration, writing the defaults first when the file is absent.
    pub async fn load_or_init(&self) -> Result<Config> {
        if tokio::fs::try_exists(&self.path).await? {
            return self.load().await;
        }

        info!("No configuration at {:?}, writing defaults", self.path);
        let config = Config::default();
        self.save(&config).await?;
        Ok(config)
    }

    /// Saves configuration to file atomically.
    pub async fn save(&self, config: &Config) -> Result<()> {
        let content = ConfigFormat::from_path(&self.path)?.render(config)?;
        let path = self.path.clone();

        tokio::task::spawn_blocking(move || write_atomically(&path, &content))
            .await
            .map_err(|e| LingoError::Config(format!("save task failed: {e}")))??;

        info!("Saved configuration to {:?}", self.path);
        Ok(())
    }
}

impl Default for ConfigLoader {
    fn default() -> Self {
        Self::new(DEFAULT_CONFIG_FILE)
    }
}

fn write_atomically(path: &Path, content: &str) -> Result<()> {
    let dir = match path.parent() {
        Some(parent) if !parent.as_os_str().is_empty() => parent.to_path_buf(),
        _ => PathBuf::from("."),
    };
    std::fs::create_dir_all(&dir)?;

    let mut file = tempfile::NamedTempFile::new_in(&dir)?;
    file.write_all(content.as_bytes())?;
    file.as_file().sync_all()?;
    file.persist(path).map_err(|e| LingoError::Io(e.error))?;
    Ok(())
}

/// Applies overrides from an environment lookup.
///
/// `lookup` is usually `|key| std::env::var(key).ok()`.
pub fn apply_env_overrides<F>(config: &mut Config, lookup: F)
where
    F: Fn(&str) -> Option<String>,
{
    if let Some(locale) = lookup(ENV_LOCALE).filter(|v| !v.trim().is_empty()) {
        debug!("{} overrides locale.current", ENV_LOCALE);
        config.locale.current = LocaleId::new(locale.trim());
    }

    if let Some(dir) = lookup(ENV_LOCALES_DIR).filter(|v| !v.is_empty()) {
        debug!("{} overrides locale.directory", ENV_LOCALES_DIR);
        config.locale.directory = PathBuf::from(dir);
    }

    if let Some(level) = lookup(ENV_LOG_LEVEL).filter(|v| !v.is_empty()) {
        debug!("{} overrides logging.level", ENV_LOG_LEVEL);
        config.logging.level = level;
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashMap;

    #[test]
    fn test_format_from_path() {
        assert_eq!(
            ConfigFormat::from_path(Path::new("lingo.yml")).unwrap(),
            ConfigFormat::Yaml
        );
        assert_eq!(
            ConfigFormat::from_path(Path::new("lingo.TOML")).unwrap(),
            ConfigFormat::Toml
        );
        assert_eq!(
            ConfigFormat::from_path(Path::new("lingo")).unwrap(),
            ConfigFormat::Yaml
        );
        assert!(ConfigFormat::from_path(Path::new("lingo.ini")).is_err());
    }

    #[test]
    fn test_env_overrides() {
        let env: HashMap<&str, &str> = [(ENV_LOCALE, " en_US "), (ENV_LOG_LEVEL, "debug")]
            .into_iter()
            .collect();
        let mut config = Config::default();

        apply_env_overrides(&mut config, |key| env.get(key).map(|v| (*v).to_string()));

        assert_eq!(config.locale.current.as_str(), "en_US");
        assert_eq!(config.logging.level, "debug");
        assert_eq!(config.locale.directory, PathBuf::from("locales"));
    }
}
