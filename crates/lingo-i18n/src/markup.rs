//! Color and style markup translation
//!
//! Informal markup such as `&a`, `^l` or `&#ff8800` is rewritten into the
//! section-sign representation consumed by output channels (`§a`, `§l`,
//! `§x§f§f§8§8§0§0`). Unknown tokens pass through untouched.

/// Marker that introduces a translated style code.
pub const SECTION_SIGN: char = '\u{a7}';

/// Prefixes recognised by [`LegacyMarkup::default`].
pub const DEFAULT_PREFIXES: &[char] = &['&', '^'];

/// Rewrites markup tokens into their final styled form.
///
/// Implementations must be pure and must never fail on malformed markup.
pub trait MarkupTranslator: Send + Sync {
    /// Translate every recognised token in `input`
    fn translate(&self, input: &str) -> String;
}

/// Ampersand/caret color codes, formatting codes and `#RRGGBB` hex colors.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LegacyMarkup {
    prefixes: Vec<char>,
}

impl LegacyMarkup {
    /// Create a translator for the given prefix characters.
    ///
    /// The section sign itself is never accepted as a prefix.
    pub fn new(prefixes: impl IntoIterator<Item = char>) -> Self {
        let mut unique = Vec::new();
        for prefix in prefixes {
            if prefix != SECTION_SIGN && !unique.contains(&prefix) {
                unique.push(prefix);
            }
        }
        Self { prefixes: unique }
    }

    /// Prefix characters in use
    pub fn prefixes(&self) -> &[char] {
        &self.prefixes
    }

    fn is_prefix(&self, c: char) -> bool {
        self.prefixes.contains(&c)
    }
}

impl Default for LegacyMarkup {
    fn default() -> Self {
        Self::new(DEFAULT_PREFIXES.iter().copied())
    }
}

/// Color `0-9a-f`, format `k-o` and reset `r`, in either case.
pub fn is_style_code(c: char) -> bool {
    matches!(c.to_ascii_lowercase(), '0'..='9' | 'a'..='f' | 'k'..='o' | 'r')
}

/// Six hex digits directly after a `#`, if present.
fn hex_color(rest: &str) -> Option<&str> {
    let digits = rest.strip_prefix('#')?.get(..6)?;
    digits
        .chars()
        .all(|c| c.is_ascii_hexdigit())
        .then_some(digits)
}

impl MarkupTranslator for LegacyMarkup {
    fn translate(&self, input: &str) -> String {
        let mut output = String::with_capacity(input.len());
        let mut chars = input.char_indices().peekable();

        while let Some((offset, c)) = chars.next() {
            if !self.is_prefix(c) {
                output.push(c);
                continue;
            }

            let rest = &input[offset + c.len_utf8()..];
            if let Some(hex) = hex_color(rest) {
                output.push(SECTION_SIGN);
                output.push('x');
                for digit in hex.chars() {
                    output.push(SECTION_SIGN);
                    output.push(digit.to_ascii_lowercase());
                }
                // '#' plus six digits
                for _ in 0..7 {
                    chars.next();
                }
                continue;
            }

            match chars.peek() {
                Some(&(_, code)) if is_style_code(code) => {
                    output.push(SECTION_SIGN);
                    output.push(code.to_ascii_lowercase());
                    chars.next();
                }
                _ => output.push(c),
            }
        }

        output
    }
}

/// Identity translator for sinks that render plain text.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct PlainMarkup;

impl MarkupTranslator for PlainMarkup {
    fn translate(&self, input: &str) -> String {
        input.to_string()
    }
}

/// Remove translated `§x` style pairs, leaving plain text.
pub fn strip_styling(input: &str) -> String {
    let mut output = String::with_capacity(input.len());
    let mut chars = input.chars().peekable();

    while let Some(c) = chars.next() {
        if c == SECTION_SIGN {
            match chars.peek() {
                Some(&code) if is_style_code(code) || code.eq_ignore_ascii_case(&'x') => {
                    chars.next();
                }
                _ => output.push(c),
            }
        } else {
            output.push(c);
        }
    }

    output
}
