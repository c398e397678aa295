//! Markup scrubbing for TEXT values.
//!
//! Source prose embeds links as `[display]{namespace:reference}`, e.g.
//! `[HP]{mechanic:hp}` or `[]{move:dragon-tail}`. Each link is replaced by
//! its display text, or by a readable form of the reference when the display
//! text is empty.

use std::borrow::Cow;
use std::sync::LazyLock;

use regex::{Captures, Regex};

static MARKUP_REGEX: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"\[(.*?)\]\{(.*?)\}").expect("Invalid markup regex"));

/// Replace every `[display]{ns:ref}` occurrence with plain text.
///
/// Matches are replaced left to right in a single pass; replacement text is
/// not scanned again.
///
/// # Examples
///
/// ```
/// use dexdb_infer::scrub_text;
///
/// assert_eq!(
///     scrub_text("[]{move:dragon-tail} will affect [HP]{mechanic:hp}."),
///     "dragon tail will affect HP."
/// );
/// assert_eq!(scrub_text("plain text"), "plain text");
/// ```
pub fn scrub_text(value: &str) -> Cow<'_, str> {
    MARKUP_REGEX.replace_all(value, |caps: &Captures<'_>| {
        let display = caps.get(1).map_or("", |m| m.as_str());
        let reference = caps.get(2).map_or("", |m| m.as_str());
        replacement(display, reference)
    })
}

fn replacement(display: &str, reference: &str) -> String {
    if !display.is_empty() {
        return display.to_string();
    }
    let target = reference
        .split_once(':')
        .map_or(reference, |(_, rest)| rest);
    target.replace('-', " ")
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn display_text_wins() {
        assert_eq!(scrub_text("[HP]{mechanic:hp}"), "HP");
    }

    #[test]
    fn empty_display_uses_reference() {
        assert_eq!(scrub_text("[]{ability:swift-swim}"), "swift swim");
        assert_eq!(scrub_text("[]{no-namespace}"), "no namespace");
        assert_eq!(scrub_text("[]{a:b:c-d}"), "b:c d");
    }

    #[test]
    fn substitution_is_single_pass() {
        // The first match is `[[]{x:y}` with display `[`; the output looks
        // like markup again but is left alone.
        assert_eq!(scrub_text("[[]{x:y}]{z:w}"), "[]{z:w}");
        assert_eq!(scrub_text("[a]{b}[c]{d}"), "ac");
    }

    #[test]
    fn clean_text_is_borrowed() {
        assert!(matches!(scrub_text("no markup here"), Cow::Borrowed(_)));
        assert_eq!(scrub_text(""), "");
    }
}
