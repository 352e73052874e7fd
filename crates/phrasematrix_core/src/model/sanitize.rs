//! Phrase text sanitization.
//!
//! # Responsibility
//! - Strip markup from user input, leaving plain text content.
//! - Normalize whitespace so equal-looking phrases compare equal.
//!
//! # Invariants
//! - Only markup constructs are removed; scheme-like plain text
//!   (`javascript:alert(1)`) is preserved.
//! - A `<` that does not open a tag is kept.
//! - Output never has leading/trailing whitespace or internal runs of it.

use once_cell::sync::Lazy;
use regex::Regex;

// Tag bodies skip over quoted attribute values, so a `>` inside quotes does
// not end the tag. An unterminated script/style block runs to end of input.
static RAW_TEXT_BLOCK_RE: Lazy<Regex> = Lazy::new(|| {
    Regex::new(
        r#"(?is)<(script|style)\b(?:[^>"']|"[^"]*"|'[^']*')*>.*?(?:</(?:script|style)\s*>|$)"#,
    )
    .expect("valid raw text block regex")
});
static COMMENT_RE: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"(?s)<!--.*?-->").expect("valid comment regex"));
static TAG_RE: Lazy<Regex> = Lazy::new(|| {
    Regex::new(r#"</?[A-Za-z](?:[^>"']|"[^"]*"|'[^']*')*>|<![A-Za-z][^>]*>"#)
        .expect("valid tag regex")
});
static WHITESPACE_RE: Lazy<Regex> = Lazy::new(|| Regex::new(r"\s+").expect("valid ws regex"));

/// Turns raw user input into storable phrase text.
///
/// Script/style blocks are dropped with their content, other tags are
/// dropped along with their attributes (event handlers included), then
/// whitespace runs collapse to one space and the result is trimmed.
pub fn sanitize_phrase_text(raw: &str) -> String {
    let without_blocks = RAW_TEXT_BLOCK_RE.replace_all(raw, "");
    let without_comments = COMMENT_RE.replace_all(&without_blocks, "");
    let without_tags = TAG_RE.replace_all(&without_comments, "");
    collapse_whitespace(&without_tags)
}

/// Collapses whitespace runs to a single space and trims both ends.
pub fn collapse_whitespace(text: &str) -> String {
    WHITESPACE_RE.replace_all(text, " ").trim().to_string()
}

/// Case-folded form used for duplicate detection and search matching.
pub fn normalize_for_compare(text: &str) -> String {
    text.to_lowercase()
}

#[cfg(test)]
mod tests {
    use super::{collapse_whitespace, normalize_for_compare, sanitize_phrase_text};

    #[test]
    fn strips_script_block_with_content() {
        assert_eq!(sanitize_phrase_text("<script>alert(1)</script>Hello"), "Hello");
        assert_eq!(
            sanitize_phrase_text("<SCRIPT type=\"text/javascript\">\nx()\n</SCRIPT>Hi"),
            "Hi"
        );
    }

    #[test]
    fn strips_tags_with_event_handler_attributes() {
        assert_eq!(
            sanitize_phrase_text("<img src=x onerror=alert(1)>Hello"),
            "Hello"
        );
        assert_eq!(
            sanitize_phrase_text("<b onclick=\"steal()\">bold</b> move"),
            "bold move"
        );
    }

    #[test]
    fn quoted_gt_does_not_end_the_tag() {
        assert_eq!(
            sanitize_phrase_text("<img src=\"a>b\" onerror=\"alert(1)\">Hello"),
            "Hello"
        );
        assert_eq!(
            sanitize_phrase_text("<a title='x > y' onclick='go()'>link</a>"),
            "link"
        );
    }

    #[test]
    fn unterminated_script_drops_the_rest_of_the_input() {
        assert_eq!(sanitize_phrase_text("<script>alert(1)"), "");
        assert_eq!(sanitize_phrase_text("Keep <script>alert(1)"), "Keep");
        assert_eq!(
            sanitize_phrase_text("<script src=\"a>b\">alert(1)</script>After"),
            "After"
        );
    }

    #[test]
    fn keeps_scheme_like_plain_text() {
        assert_eq!(
            sanitize_phrase_text("javascript:alert(1)"),
            "javascript:alert(1)"
        );
    }

    #[test]
    fn keeps_comparison_operators() {
        assert_eq!(sanitize_phrase_text("1 < 2 and 3 > 2"), "1 < 2 and 3 > 2");
    }

    #[test]
    fn removes_comments() {
        assert_eq!(sanitize_phrase_text("a<!-- hidden -->b"), "ab");
    }

    #[test]
    fn collapses_internal_whitespace_runs() {
        assert_eq!(
            collapse_whitespace("  Frase    con \t múltiples\n\nespacios  "),
            "Frase con múltiples espacios"
        );
        assert_eq!(collapse_whitespace("   "), "");
    }

    #[test]
    fn normalize_lowercases_unicode() {
        assert_eq!(normalize_for_compare("ÁRBOL Verde"), "árbol verde");
    }
}
