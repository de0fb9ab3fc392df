//! Positional `{i}` parameter interpolation

use crate::error::{I18nError, I18nResult};

/// A `{i}` placeholder found in a template.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
struct Placeholder {
    start: usize,
    end: usize,
    index: usize,
}

/// Find the next `{digits}` token at or after byte offset `from`.
fn next_placeholder(template: &str, from: usize) -> Option<Placeholder> {
    let bytes = template.as_bytes();
    let mut cursor = from;

    while let Some(offset) = template[cursor..].find('{') {
        let start = cursor + offset;
        let digits = bytes[start + 1..]
            .iter()
            .take_while(|b| b.is_ascii_digit())
            .count();
        let close = start + 1 + digits;

        if digits > 0 && bytes.get(close) == Some(&b'}') {
            // Indices too large for usize can never match a parameter.
            let index = template[start + 1..close].parse().unwrap_or(usize::MAX);
            return Some(Placeholder {
                start,
                end: close + 1,
                index,
            });
        }
        cursor = start + 1;
    }
    None
}

/// Returns `true` when `template` contains at least one `{i}` placeholder.
pub fn has_placeholders(template: &str) -> bool {
    next_placeholder(template, 0).is_some()
}

/// Indices of every placeholder in `template`, in order of appearance.
pub fn placeholder_indices(template: &str) -> Vec<usize> {
    let mut indices = Vec::new();
    let mut cursor = 0;
    while let Some(placeholder) = next_placeholder(template, cursor) {
        indices.push(placeholder.index);
        cursor = placeholder.end;
    }
    indices
}

/// Substitute positional parameters into `template`.
///
/// Every `{i}` with `i < params.len()` is replaced by `params[i]` in a single
/// left-to-right pass; substituted text is never scanned again. Placeholders
/// beyond the parameter list stay as they are.
///
/// # Errors
///
/// [`I18nError::MissingParameters`] when `params` is empty and the template
/// contains a placeholder.
pub fn interpolate<S: AsRef<str>>(template: &str, params: &[S]) -> I18nResult<String> {
    if params.is_empty() {
        if has_placeholders(template) {
            return Err(I18nError::MissingParameters {
                template: template.to_string(),
            });
        }
        return Ok(template.to_string());
    }

    Ok(substitute(template, params))
}

/// Single-pass substitution shared with the resolver. Never fails.
pub(crate) fn substitute<S: AsRef<str>>(template: &str, params: &[S]) -> String {
    let mut output = String::with_capacity(template.len());
    let mut cursor = 0;

    while let Some(placeholder) = next_placeholder(template, cursor) {
        output.push_str(&template[cursor..placeholder.start]);
        match params.get(placeholder.index) {
            Some(value) => output.push_str(value.as_ref()),
            None => output.push_str(&template[placeholder.start..placeholder.end]),
        }
        cursor = placeholder.end;
    }
    output.push_str(&template[cursor..]);
    output
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_basic_substitution() {
        assert_eq!(
            interpolate("{0} of {1} players online", &["3", "20"]).unwrap(),
            "3 of 20 players online"
        );
    }

    #[test]
    fn test_every_occurrence_replaced() {
        assert_eq!(interpolate("{0}-{0}-{0}", &["x"]).unwrap(), "x-x-x");
    }

    #[test]
    fn test_out_of_range_left_alone() {
        assert_eq!(interpolate("{0} and {2}", &["a", "b"]).unwrap(), "a and {2}");
    }

    #[test]
    fn test_substituted_text_not_rescanned() {
        assert_eq!(interpolate("{0} {1}", &["{1}", "b"]).unwrap(), "{1} b");
    }

    #[test]
    fn test_missing_parameters() {
        let err = interpolate::<&str>("Hello, {0}!", &[]).unwrap_err();
        assert!(matches!(err, I18nError::MissingParameters { .. }));
    }

    #[test]
    fn test_no_placeholders_no_params() {
        assert_eq!(interpolate::<&str>("plain", &[]).unwrap(), "plain");
    }

    #[test]
    fn test_non_index_braces_are_literal() {
        assert!(!has_placeholders("{} {name} {-1} { 0}"));
        assert_eq!(interpolate("{} {name} {0}", &["v"]).unwrap(), "{} {name} v");
    }

    #[test]
    fn test_adjacent_and_nested_braces() {
        assert_eq!(interpolate("{{0}}", &["v"]).unwrap(), "{v}");
        assert_eq!(interpolate("{0}{1}", &["a", "b"]).unwrap(), "ab");
    }

    #[test]
    fn test_multibyte_text() {
        assert_eq!(interpolate("你好，{0}！", &["世界"]).unwrap(), "你好，世界！");
    }

    #[test]
    fn test_huge_index() {
        let template = "{99999999999999999999999}";
        assert_eq!(interpolate(template, &["a"]).unwrap(), template);
    }

    #[test]
    fn test_placeholder_indices() {
        assert_eq!(placeholder_indices("{1} {0} {1} {x}"), vec![1, 0, 1]);
    }
}
