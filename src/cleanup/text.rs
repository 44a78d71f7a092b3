//! Page text cleanup.
//!
//! Cleaning is an ordered list of rules. Each rule is a plain
//! `&str -> String` function so it can be tested on its own; the order in
//! [`TEXT_RULES`] is part of the output contract.

use std::sync::LazyLock;

use regex::Regex;

static NEWLINE_RUN: LazyLock<Regex> = LazyLock::new(|| Regex::new(r"\n+").unwrap());

static WHITESPACE_RUN: LazyLock<Regex> = LazyLock::new(|| Regex::new(r"\s{2,}").unwrap());

// The lazy tail matches nothing, so only the token itself goes away.
static BOILERPLATE: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"(?i)(www\.[a-z0-9.-]+|https?://\S+|Email:|TOLL-FREE CALL).*?").unwrap()
});

static MARKERS: LazyLock<Regex> = LazyLock::new(|| Regex::new(r"PLOT \d+|@NCDCgov").unwrap());

static PAGE_FOOTER: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"\b\d+\s*\|\s*Page\b").unwrap());

/// A single text cleanup rule.
pub type TextRule = fn(&str) -> String;

/// Rules applied by [`normalize_text`], in order. Trimming happens last.
pub const TEXT_RULES: &[(&str, TextRule)] = &[
    ("collapse_newlines", collapse_newlines),
    ("collapse_whitespace", collapse_whitespace),
    ("repair_hyphenation", repair_hyphenation),
    ("strip_boilerplate", strip_boilerplate),
    ("strip_markers", strip_markers),
    ("strip_page_footers", strip_page_footers),
    ("collapse_whitespace", collapse_whitespace),
];

/// Clean one page of raw extracted text.
///
/// Absent or empty input yields an empty string.
///
/// # Example
///
/// ```
/// use pdfsift::cleanup::normalize_text;
///
/// assert_eq!(normalize_text(Some("Hello-\nworld")), "Helloworld");
/// assert_eq!(normalize_text(None), "");
/// ```
pub fn normalize_text(raw: Option<&str>) -> String {
    let raw = match raw {
        Some(text) if !text.is_empty() => text,
        _ => return String::new(),
    };

    let cleaned = TEXT_RULES
        .iter()
        .fold(raw.to_string(), |text, (_, rule)| rule(&text));
    cleaned.trim().to_string()
}

/// Join words split across a line break: drops every `"- "` and `"-\n"`.
///
/// Runs after whitespace collapsing, so a break of any width has already
/// become a single space.
pub fn repair_hyphenation(text: &str) -> String {
    text.replace("- ", "").replace("-\n", "")
}

/// Replace each run of newlines with a single space.
pub fn collapse_newlines(text: &str) -> String {
    NEWLINE_RUN.replace_all(text, " ").into_owned()
}

/// Replace each run of two or more whitespace characters with one space.
pub fn collapse_whitespace(text: &str) -> String {
    WHITESPACE_RUN.replace_all(text, " ").into_owned()
}

/// Remove URLs, `Email:` and `TOLL-FREE CALL` tokens (case-insensitive).
///
/// Text following a token is kept: `"Email: a@b.org"` becomes `" a@b.org"`.
pub fn strip_boilerplate(text: &str) -> String {
    BOILERPLATE.replace_all(text, "").into_owned()
}

/// Remove `PLOT <digits>` and `@NCDCgov` markers.
pub fn strip_markers(text: &str) -> String {
    MARKERS.replace_all(text, "").into_owned()
}

/// Remove `<digits> | Page` footers.
pub fn strip_page_footers(text: &str) -> String {
    PAGE_FOOTER.replace_all(text, "").into_owned()
}
