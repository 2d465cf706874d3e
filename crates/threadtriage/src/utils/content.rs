use std::sync::OnceLock;

use regex::Regex;

/// Minimal HTML-to-text for exported message bodies: drop tag spans, decode
/// entities, then collapse whitespace runs to single spaces.
///
/// Stripping an already-stripped string is a no-op.
#[must_use]
pub fn strip_markup(content: &str) -> String {
    let without_tags = tag_regex().replace_all(content, "");
    let decoded = html_escape::decode_html_entities(without_tags.as_ref());
    collapse_whitespace(&decoded)
}

#[must_use]
pub fn collapse_whitespace(text: &str) -> String {
    text.split_whitespace().collect::<Vec<_>>().join(" ")
}

fn tag_regex() -> &'static Regex {
    static REGEX: OnceLock<Regex> = OnceLock::new();
    REGEX.get_or_init(|| Regex::new(r"<[^>]+>").expect("tag regex should compile"))
}
