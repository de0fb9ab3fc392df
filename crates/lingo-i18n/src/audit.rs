//! Cross-locale consistency checks
//!
//! Compares every locale against a reference store and reports missing keys,
//! extra keys and placeholder mismatches.

use crate::interpolate::placeholder_indices;
use crate::store::LocaleStore;
use lingo_common::LocaleId;
use std::collections::BTreeSet;
use std::fmt;

/// A single inconsistency between a locale and the reference.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum AuditIssue {
    /// Key present in the reference but not in the locale
    MissingKey {
        /// Locale lacking the key
        locale: LocaleId,
        /// The missing key
        key: String,
    },
    /// Key present in the locale but not in the reference
    ExtraKey {
        /// Locale carrying the key
        locale: LocaleId,
        /// The unexpected key
        key: String,
    },
    /// Both have the key but reference different placeholder indices
    PlaceholderMismatch {
        /// Locale being compared
        locale: LocaleId,
        /// Key whose templates disagree
        key: String,
        /// Indices used by the reference template
        expected: BTreeSet<usize>,
        /// Indices used by this locale's template
        found: BTreeSet<usize>,
    },
    /// The locale's data could not be read at all
    Unreadable {
        /// Locale that failed to load
        locale: LocaleId,
        /// Load error
        reason: String,
    },
}

impl fmt::Display for AuditIssue {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::MissingKey { locale, key } => write!(f, "{locale}: missing key '{key}'"),
            Self::ExtraKey { locale, key } => write!(f, "{locale}: extra key '{key}'"),
            Self::PlaceholderMismatch {
                locale,
                key,
                expected,
                found,
            } => write!(
                f,
                "{locale}: placeholder mismatch for '{key}'. Expected: {expected:?}, Found: {found:?}"
            ),
            Self::Unreadable { locale, reason } => write!(f, "{locale}: unreadable ({reason})"),
        }
    }
}

/// Result of comparing locales against a reference locale.
#[derive(Debug, Clone, Default)]
pub struct LocaleAudit {
    reference: Option<LocaleId>,
    issues: Vec<AuditIssue>,
}

fn placeholder_set(template: &str) -> BTreeSet<usize> {
    placeholder_indices(template).into_iter().collect()
}

impl LocaleAudit {
    /// Compare each store in `others` against `reference`.
    ///
    /// Issues are ordered by locale, then key.
    pub fn compare<'a>(
        reference: &LocaleStore,
        others: impl IntoIterator<Item = &'a LocaleStore>,
    ) -> Self {
        let mut issues = Vec::new();
        let reference_keys: BTreeSet<&str> = reference.keys().collect();

        let mut others: Vec<&LocaleStore> = others
            .into_iter()
            .filter(|store| store.locale() != reference.locale())
            .collect();
        others.sort_by(|a, b| a.locale().cmp(b.locale()));

        for store in others {
            let locale = store.locale();
            let keys: BTreeSet<&str> = store.keys().collect();

            for key in reference_keys.difference(&keys) {
                issues.push(AuditIssue::MissingKey {
                    locale: locale.clone(),
                    key: (*key).to_string(),
                });
            }

            for key in keys.difference(&reference_keys) {
                issues.push(AuditIssue::ExtraKey {
                    locale: locale.clone(),
                    key: (*key).to_string(),
                });
            }

            for key in reference_keys.intersection(&keys) {
                let expected = reference.get(key).map(placeholder_set).unwrap_or_default();
                let found = store.get(key).map(placeholder_set).unwrap_or_default();
                if expected != found {
                    issues.push(AuditIssue::PlaceholderMismatch {
                        locale: locale.clone(),
                        key: (*key).to_string(),
                        expected,
                        found,
                    });
                }
            }
        }

        Self {
            reference: Some(reference.locale().clone()),
            issues,
        }
    }

    /// Locale everything was compared against
    pub fn reference(&self) -> Option<&LocaleId> {
        self.reference.as_ref()
    }

    /// Every issue found, in report order
    pub fn issues(&self) -> &[AuditIssue] {
        &self.issues
    }

    /// Record a locale whose data could not be loaded for comparison.
    pub fn record_unreadable(&mut self, locale: LocaleId, reason: impl fmt::Display) {
        self.issues.push(AuditIssue::Unreadable {
            locale,
            reason: reason.to_string(),
        });
    }

    /// `true` when no issue was found
    pub fn is_clean(&self) -> bool {
        self.issues.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use lingo_common::test_utils::locale_fixtures::{chinese_translations, english_translations};

    #[test]
    fn test_missing_key_reported() {
        let en = LocaleStore::new(LocaleId::new("en_US"), english_translations());
        let zh = LocaleStore::new(LocaleId::new("zh_CN"), chinese_translations());

        let audit = LocaleAudit::compare(&en, [&zh]);
        assert_eq!(
            audit.issues(),
            &[AuditIssue::MissingKey {
                locale: LocaleId::new("zh_CN"),
                key: "status.players".to_string(),
            }]
        );
        assert!(!audit.is_clean());
    }

    #[test]
    fn test_extra_key_and_placeholder_mismatch() {
        let en = LocaleStore::new(LocaleId::new("en_US"), english_translations());
        let mut translations = english_translations();
        translations.insert("greet.hello".to_string(), "Hello!".to_string());
        translations.insert("only.here".to_string(), "x".to_string());
        let other = LocaleStore::new(LocaleId::new("en_GB"), translations);

        let audit = LocaleAudit::compare(&en, [&other]);
        assert_eq!(audit.issues().len(), 2);
        assert!(audit
            .issues()
            .iter()
            .any(|i| matches!(i, AuditIssue::ExtraKey { key, .. } if key == "only.here")));
        assert!(audit.issues().iter().any(|i| matches!(
            i,
            AuditIssue::PlaceholderMismatch { key, .. } if key == "greet.hello"
        )));
    }

    #[test]
    fn test_reference_is_skipped() {
        let en = LocaleStore::new(LocaleId::new("en_US"), english_translations());
        let audit = LocaleAudit::compare(&en, [&en]);
        assert!(audit.is_clean());
        assert_eq!(audit.reference(), Some(&LocaleId::new("en_US")));
    }

    #[test]
    fn test_display() {
        let issue = AuditIssue::MissingKey {
            locale: LocaleId::new("zh_CN"),
            key: "a.b".to_string(),
        };
        assert_eq!(issue.to_string(), "zh_CN: missing key 'a.b'");
    }

    #[test]
    fn test_unreadable_locale_recorded() {
        let en = LocaleStore::new(LocaleId::new("en_US"), english_translations());
        let mut audit = LocaleAudit::compare(&en, [&en]);
        assert!(audit.is_clean());

        audit.record_unreadable(LocaleId::new("fr_FR"), "bad indentation");

        assert!(!audit.is_clean());
        assert_eq!(
            audit.issues()[0].to_string(),
            "fr_FR: unreadable (bad indentation)"
        );
    }
}
