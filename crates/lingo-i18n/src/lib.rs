//! Localization and message formatting for lingo
//!
//! This crate turns raw message templates into final styled strings:
//!
//! - Locale stores and a registry with a switchable current locale
//! - Embedded `(key.path)` resolution inside free text
//! - Positional `{0}` parameter interpolation
//! - Ampersand/caret color markup translation
//! - File-backed locale sources and cross-locale audits
//!
//! # Example
//!
//! ```rust
//! use std::collections::HashMap;
//! use std::sync::Arc;
//! use lingo_i18n::{LocaleRegistry, MessageResolver};
//!
//! let registry = Arc::new(LocaleRegistry::new("en_US"));
//! let mut translations = HashMap::new();
//! translations.insert("greet.hello".to_string(), "&aHello, {0}!".to_string());
//! registry.load_map("en_US", translations);
//!
//! let resolver = MessageResolver::new(registry);
//! let message = resolver.resolve("(greet.hello)", &["World"]);
//! assert_eq!(message.as_deref(), Some("\u{a7}aHello, World!"));
//! ```

#![warn(missing_docs)]
#![warn(clippy::all)]
#![warn(clippy::pedantic)]
#![warn(clippy::nursery)]
#![allow(clippy::module_name_repetitions)]

pub mod audit;
pub mod error;
pub mod interpolate;
pub mod markup;
pub mod registry;
pub mod resolver;
pub mod resource;
pub mod source;
pub mod store;

pub use audit::{AuditIssue, LocaleAudit};
pub use error::{I18nError, I18nResult};
pub use interpolate::{has_placeholders, interpolate, placeholder_indices};
pub use markup::{strip_styling, LegacyMarkup, MarkupTranslator, PlainMarkup, SECTION_SIGN};
pub use registry::LocaleRegistry;
pub use resolver::{scan, MessageResolver, Segment};
pub use resource::{parse_translations, LocaleDirectory, LocaleFormat};
pub use source::{LocaleSource, MapSource, TranslationMap};
pub use store::LocaleStore;

// Re-export the shared locale identifier
pub use lingo_common::LocaleId;
