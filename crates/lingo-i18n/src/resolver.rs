//! Embedded key resolution pipeline
//!
//! A raw message may embed translation keys as `(key.path)` tokens between
//! literal text. Resolution runs in a fixed order:
//!
//! 1. suppression check (empty text or the sentinel produce nothing);
//! 2. scan for `(` … next `)` tokens and look each key up in the registry,
//!    keeping the token verbatim when the lookup fails;
//! 3. positional interpolation, only when parameters were supplied;
//! 4. markup translation over the whole result.

use crate::error::I18nResult;
use crate::interpolate::{interpolate, substitute};
use crate::markup::{LegacyMarkup, MarkupTranslator};
use crate::registry::LocaleRegistry;
use lingo_common::{is_suppressed, NO_MESSAGE};
use std::fmt;
use std::sync::Arc;
use tracing::debug;

/// A piece of a scanned raw message.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Segment<'a> {
    /// Text copied verbatim
    Literal(&'a str),
    /// A `(key)` token; `token` includes the parentheses
    Key {
        /// Full token, parentheses included
        token: &'a str,
        /// Text between the parentheses
        key: &'a str,
    },
}

/// Split `raw` into literal text and `(key)` tokens.
///
/// Each `(` is closed by the first `)` after it; nesting is not supported.
/// An opening parenthesis with no closing one is literal text.
pub fn scan(raw: &str) -> Vec<Segment<'_>> {
    let mut segments = Vec::new();
    let mut cursor = 0;

    while let Some(open) = raw[cursor..].find('(').map(|i| cursor + i) {
        let Some(close) = raw[open + 1..].find(')').map(|i| open + 1 + i) else {
            break;
        };

        if open > cursor {
            segments.push(Segment::Literal(&raw[cursor..open]));
        }
        segments.push(Segment::Key {
            token: &raw[open..=close],
            key: &raw[open + 1..close],
        });
        cursor = close + 1;
    }

    if cursor < raw.len() {
        segments.push(Segment::Literal(&raw[cursor..]));
    }
    segments
}

/// Turns raw messages into resolved, styled strings.
#[derive(Clone)]
pub struct MessageResolver {
    registry: Arc<LocaleRegistry>,
    markup: Arc<dyn MarkupTranslator>,
    sentinel: String,
}

impl fmt::Debug for MessageResolver {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("MessageResolver")
            .field("registry", &self.registry)
            .field("markup", &"dyn MarkupTranslator")
            .field("sentinel", &self.sentinel)
            .finish()
    }
}

impl MessageResolver {
    /// Create a resolver with [`LegacyMarkup`] and the `none` sentinel
    pub fn new(registry: Arc<LocaleRegistry>) -> Self {
        Self {
            registry,
            markup: Arc::new(LegacyMarkup::default()),
            sentinel: NO_MESSAGE.to_string(),
        }
    }

    /// Replace the markup translator
    #[must_use]
    pub fn with_markup(mut self, markup: Arc<dyn MarkupTranslator>) -> Self {
        self.markup = markup;
        self
    }

    /// Replace the suppression sentinel
    #[must_use]
    pub fn with_sentinel(mut self, sentinel: impl Into<String>) -> Self {
        self.sentinel = sentinel.into();
        self
    }

    /// Registry used for key lookups
    pub fn registry(&self) -> &Arc<LocaleRegistry> {
        &self.registry
    }

    /// Raw text that suppresses a message
    pub fn sentinel(&self) -> &str {
        &self.sentinel
    }

    /// Check the suppression convention for `raw`
    pub fn is_suppressed(&self, raw: &str) -> bool {
        is_suppressed(raw, &self.sentinel)
    }

    /// Resolve `raw` into its final styled form.
    ///
    /// Returns `None` when the message is suppressed. Embedded key lookups are
    /// best-effort, so this never fails.
    pub fn resolve<S: AsRef<str>>(&self, raw: &str, params: &[S]) -> Option<String> {
        self.render(raw, params)
            .map(|rendered| self.markup.translate(&rendered))
    }

    /// Resolve `raw` without the final markup step.
    pub fn render<S: AsRef<str>>(&self, raw: &str, params: &[S]) -> Option<String> {
        if self.is_suppressed(raw) {
            debug!("Suppressed message");
            return None;
        }

        let mut output = String::with_capacity(raw.len());
        for segment in scan(raw) {
            match segment {
                Segment::Literal(text) => output.push_str(&fill(text, params)),
                Segment::Key { token, key } => match self.lookup(key) {
                    Some(template) => output.push_str(&fill(&template, params)),
                    None => output.push_str(token),
                },
            }
        }
        Some(output)
    }

    /// Replace embedded key tokens only; no interpolation, no markup.
    pub fn expand_keys(&self, raw: &str) -> String {
        let mut output = String::with_capacity(raw.len());
        for segment in scan(raw) {
            match segment {
                Segment::Literal(text) => output.push_str(text),
                Segment::Key { token, key } => match self.lookup(key) {
                    Some(template) => output.push_str(&template),
                    None => output.push_str(token),
                },
            }
        }
        output
    }

    /// Strict lookup of a single key: translate, interpolate, then markup.
    ///
    /// Unlike [`MessageResolver::resolve`], every failure propagates.
    pub fn resolve_key<S: AsRef<str>>(&self, key: &str, params: &[S]) -> I18nResult<String> {
        self.render_key(key, params)
            .map(|filled| self.markup.translate(&filled))
    }

    /// Strict lookup of a single key without the final markup step.
    pub fn render_key<S: AsRef<str>>(&self, key: &str, params: &[S]) -> I18nResult<String> {
        let template = self.registry.translate(key)?;
        interpolate(&template, params)
    }

    /// Apply the markup translator alone
    pub fn markup(&self, text: &str) -> String {
        self.markup.translate(text)
    }

    fn lookup(&self, key: &str) -> Option<String> {
        if key.is_empty() {
            return None;
        }

        match self.registry.translate(key) {
            Ok(template) => Some(template),
            Err(e) => {
                debug!("Keeping embedded key '{}' literal: {}", key, e);
                None
            }
        }
    }
}

/// Interpolate only when parameters were supplied for this call.
fn fill<S: AsRef<str>>(text: &str, params: &[S]) -> String {
    if params.is_empty() {
        text.to_string()
    } else {
        substitute(text, params)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_scan_mixed() {
        assert_eq!(
            scan("Welcome (greet.hello) and (b)!"),
            vec![
                Segment::Literal("Welcome "),
                Segment::Key {
                    token: "(greet.hello)",
                    key: "greet.hello"
                },
                Segment::Literal(" and "),
                Segment::Key {
                    token: "(b)",
                    key: "b"
                },
                Segment::Literal("!"),
            ]
        );
    }

    #[test]
    fn test_scan_unclosed() {
        assert_eq!(scan("a (b"), vec![Segment::Literal("a (b")]);
        assert_eq!(
            scan("(x) (y"),
            vec![
                Segment::Key {
                    token: "(x)",
                    key: "x"
                },
                Segment::Literal(" (y"),
            ]
        );
    }

    #[test]
    fn test_scan_first_close_wins() {
        assert_eq!(
            scan("((a))"),
            vec![
                Segment::Key {
                    token: "((a)",
                    key: "(a"
                },
                Segment::Literal(")"),
            ]
        );
    }

    #[test]
    fn test_scan_empty_and_plain() {
        assert!(scan("").is_empty());
        assert_eq!(scan("plain"), vec![Segment::Literal("plain")]);
        assert_eq!(scan("()"), vec![Segment::Key { token: "()", key: "" }]);
    }
}
