//! File-backed locale source
//!
//! Reads `<dir>/<locale>.<suffix>` and flattens the nested document into
//! dot-path keys before handing it to the registry.

use crate::error::{I18nError, I18nResult};
use crate::source::{LocaleSource, TranslationMap};
use lingo_common::{is_valid_locale_format, join_key, LocaleId};
use serde_yaml::Value;
use std::fs;
use std::path::{Path, PathBuf};
use tracing::{debug, info, warn};

/// Default locale file suffix
pub const DEFAULT_SUFFIX: &str = "yml";

/// Document formats a locale file may use
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LocaleFormat {
    /// `.yml` / `.yaml`
    Yaml,
    /// `.json`
    Json,
    /// `.toml`
    Toml,
}

impl LocaleFormat {
    /// Pick the format from a file suffix
    pub fn from_suffix(suffix: &str) -> Option<Self> {
        match suffix.to_ascii_lowercase().as_str() {
            "yml" | "yaml" => Some(Self::Yaml),
            "json" => Some(Self::Json),
            "toml" => Some(Self::Toml),
            _ => None,
        }
    }
}

/// Parse a locale document and flatten it into dot-path keys.
///
/// Nested maps become `parent.child` keys, scalars become strings, sequences
/// of scalars are joined with newlines, and nulls are skipped.
pub fn parse_translations(content: &str, format: LocaleFormat) -> Result<TranslationMap, String> {
    if content.trim().is_empty() {
        return Err("document is empty".to_string());
    }

    let document: Value = match format {
        LocaleFormat::Yaml => serde_yaml::from_str(content).map_err(|e| e.to_string())?,
        LocaleFormat::Json => {
            let json: serde_json::Value =
                serde_json::from_str(content).map_err(|e| e.to_string())?;
            serde_yaml::to_value(json).map_err(|e| e.to_string())?
        }
        LocaleFormat::Toml => {
            let table: toml::Table = toml::from_str(content).map_err(|e| e.to_string())?;
            serde_yaml::to_value(table).map_err(|e| e.to_string())?
        }
    };

    if !document.is_mapping() {
        return Err("top level of a locale document must be a mapping".to_string());
    }

    let mut translations = TranslationMap::new();
    flatten_value(&document, "", &mut translations);
    Ok(translations)
}

fn scalar_to_string(value: &Value) -> Option<String> {
    match value {
        Value::String(s) => Some(s.clone()),
        Value::Number(n) => Some(n.to_string()),
        Value::Bool(b) => Some(b.to_string()),
        Value::Tagged(tagged) => scalar_to_string(&tagged.value),
        Value::Null | Value::Sequence(_) | Value::Mapping(_) => None,
    }
}

fn flatten_value(value: &Value, prefix: &str, translations: &mut TranslationMap) {
    match value {
        Value::Mapping(map) => {
            for (key, val) in map {
                match scalar_to_string(key) {
                    Some(segment) => flatten_value(val, &join_key(prefix, &segment), translations),
                    None => warn!("Skipping non-scalar key under '{}'", prefix),
                }
            }
        }
        Value::Sequence(items) => {
            let lines: Option<Vec<String>> = items.iter().map(scalar_to_string).collect();
            match lines {
                Some(lines) => {
                    translations.insert(prefix.to_string(), lines.join("\n"));
                }
                None => {
                    for (index, item) in items.iter().enumerate() {
                        flatten_value(item, &join_key(prefix, &index.to_string()), translations);
                    }
                }
            }
        }
        Value::Tagged(tagged) => flatten_value(&tagged.value, prefix, translations),
        Value::Null => {}
        scalar => {
            if let Some(text) = scalar_to_string(scalar) {
                translations.insert(prefix.to_string(), text);
            }
        }
    }
}

/// Locale files stored in one directory, one file per locale.
#[derive(Debug, Clone)]
pub struct LocaleDirectory {
    /// Directory holding the locale files
    base_dir: PathBuf,
    /// File suffix without the dot
    suffix: String,
}

impl LocaleDirectory {
    /// Create a source over `base_dir` using the default `yml` suffix
    pub fn new<P: AsRef<Path>>(base_dir: P) -> Self {
        Self {
            base_dir: base_dir.as_ref().to_path_buf(),
            suffix: DEFAULT_SUFFIX.to_string(),
        }
    }

    /// Use a different file suffix (`yml`, `yaml`, `json` or `toml`)
    #[must_use]
    pub fn with_suffix(mut self, suffix: impl Into<String>) -> Self {
        self.suffix = suffix.into().trim_start_matches('.').to_string();
        self
    }

    /// Get the base directory for resources
    pub fn base_dir(&self) -> &Path {
        &self.base_dir
    }

    /// File suffix, without the dot
    pub fn suffix(&self) -> &str {
        &self.suffix
    }

    /// Path of the file holding `locale`
    pub fn path_for(&self, locale: &LocaleId) -> I18nResult<PathBuf> {
        if !is_valid_locale_format(locale.as_str()) {
            return Err(I18nError::InvalidLocaleId(locale.to_string()));
        }
        Ok(self
            .base_dir
            .join(format!("{}.{}", locale.as_str(), self.suffix)))
    }

    fn format(&self, locale: &LocaleId) -> I18nResult<LocaleFormat> {
        LocaleFormat::from_suffix(&self.suffix).ok_or_else(|| {
            I18nError::load(locale, format!("unsupported locale file suffix '{}'", self.suffix))
        })
    }

    /// Locales that have a file in the directory, sorted
    pub fn available_locales(&self) -> I18nResult<Vec<LocaleId>> {
        let mut locales = Vec::new();

        for entry in fs::read_dir(&self.base_dir)? {
            let path = entry?.path();
            if !path.is_file() {
                continue;
            }
            let matches_suffix = path
                .extension()
                .and_then(|e| e.to_str())
                .is_some_and(|e| e == self.suffix);
            let stem = path.file_stem().and_then(|s| s.to_str());

            if let (true, Some(stem)) = (matches_suffix, stem) {
                if is_valid_locale_format(stem) {
                    locales.push(LocaleId::new(stem));
                } else {
                    debug!("Ignoring locale file with invalid name: {:?}", path);
                }
            }
        }

        locales.sort();
        Ok(locales)
    }

    /// Write a bundled locale file unless one already exists.
    ///
    /// Returns `true` when the file was written.
    pub fn install_default(&self, locale: &LocaleId, contents: &str) -> I18nResult<bool> {
        let path = self.path_for(locale)?;
        if path.exists() {
            debug!("Locale file already present: {:?}", path);
            return Ok(false);
        }

        fs::create_dir_all(&self.base_dir)?;
        fs::write(&path, contents)?;
        info!("Installed default locale file: {:?}", path);
        Ok(true)
    }
}

impl LocaleSource for LocaleDirectory {
    fn load_translations(&self, locale: &LocaleId) -> I18nResult<TranslationMap> {
        let path = self.path_for(locale)?;
        let format = self.format(locale)?;

        debug!("Loading locale file: {:?}", path);

        if !path.exists() {
            warn!("Locale file does not exist: {:?}", path);
            return Err(I18nError::load(
                locale,
                format!("file not found: {}", path.display()),
            ));
        }

        let content = fs::read_to_string(&path)
            .map_err(|e| I18nError::load(locale, format!("{}: {e}", path.display())))?;

        let translations = parse_translations(&content, format)
            .map_err(|e| I18nError::load(locale, format!("{}: {e}", path.display())))?;

        info!(
            "Read {} translations for locale {} from {:?}",
            translations.len(),
            locale,
            path
        );
        Ok(translations)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_flatten_nested_yaml() {
        let yaml = r#"
greet:
  hello: "Hello, {0}!"
  farewell:
    short: Bye
count: 3
enabled: true
empty: ~
motd:
  - "&aline one"
  - line two
"#;
        let map = parse_translations(yaml, LocaleFormat::Yaml).unwrap();

        assert_eq!(map["greet.hello"], "Hello, {0}!");
        assert_eq!(map["greet.farewell.short"], "Bye");
        assert_eq!(map["count"], "3");
        assert_eq!(map["enabled"], "true");
        assert_eq!(map["motd"], "&aline one\nline two");
        assert!(!map.contains_key("empty"));
    }

    #[test]
    fn test_sequence_of_maps_uses_indices() {
        let yaml = "items:\n  - name: a\n  - name: b\n";
        let map = parse_translations(yaml, LocaleFormat::Yaml).unwrap();
        assert_eq!(map["items.0.name"], "a");
        assert_eq!(map["items.1.name"], "b");
    }

    #[test]
    fn test_json_and_toml() {
        let json = r#"{"greet": {"hello": "Hi {0}"}}"#;
        let map = parse_translations(json, LocaleFormat::Json).unwrap();
        assert_eq!(map["greet.hello"], "Hi {0}");

        let toml = "[greet]\nhello = \"Hi {0}\"\n";
        let map = parse_translations(toml, LocaleFormat::Toml).unwrap();
        assert_eq!(map["greet.hello"], "Hi {0}");
    }

    #[test]
    fn test_rejects_empty_and_non_mapping() {
        assert!(parse_translations("  \n", LocaleFormat::Yaml).is_err());
        assert!(parse_translations("- a\n- b\n", LocaleFormat::Yaml).is_err());
        assert!(parse_translations("greet: [unclosed", LocaleFormat::Yaml).is_err());
    }

    #[test]
    fn test_format_from_suffix() {
        assert_eq!(LocaleFormat::from_suffix("YML"), Some(LocaleFormat::Yaml));
        assert_eq!(LocaleFormat::from_suffix("yaml"), Some(LocaleFormat::Yaml));
        assert_eq!(LocaleFormat::from_suffix("ftl"), None);
    }

    #[test]
    fn test_path_for_rejects_traversal() {
        let dir = LocaleDirectory::new("locales");
        assert!(matches!(
            dir.path_for(&LocaleId::new("../secret")),
            Err(I18nError::InvalidLocaleId(_))
        ));
        assert_eq!(
            dir.path_for(&LocaleId::new("zh_CN")).unwrap(),
            Path::new("locales").join("zh_CN.yml")
        );
    }
}
