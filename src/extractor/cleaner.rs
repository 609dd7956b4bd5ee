//! Text normalization for extracted post bodies.
//!
//! The raw extracted content still carries markup, tracked short-links and
//! platform punctuation noise. `normalize` turns it into the plain,
//! single-spaced text the dataset reports, and `word_count` is defined over
//! that normalized form.

use regex::Regex;
use scraper::Html;
use std::sync::LazyLock;

// The redirector shows up in three shapes in scraped text: the full URL, a
// mangled form with the scheme glued to the domain, and the bare domain.
static SHORT_LINK_FULL: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"https?://lnkd\.in/[a-zA-Z0-9_-]+").unwrap());
static SHORT_LINK_MANGLED: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"httpslnkd\.in[a-zA-Z0-9_-]+").unwrap());
static SHORT_LINK_BARE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"lnkd\.in/[a-zA-Z0-9_-]+").unwrap());
static BARE_URL: LazyLock<Regex> = LazyLock::new(|| Regex::new(r"https?://\S+").unwrap());

static WHITESPACE_RUN: LazyLock<Regex> = LazyLock::new(|| Regex::new(r"\s+").unwrap());
static SPACE_BEFORE_PUNCT: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"\s+([.!?,:;])").unwrap());
static NON_TEXT: LazyLock<Regex> = LazyLock::new(|| Regex::new(r"[^\w\s.,!?/-]").unwrap());

/// Strip markup, drop tracked links, and canonicalize whitespace and
/// punctuation. Empty input yields an empty string.
pub fn normalize(raw: &str) -> String {
    if raw.is_empty() {
        return String::new();
    }

    let text = strip_tags(raw);

    let text = SHORT_LINK_FULL.replace_all(&text, "");
    let text = SHORT_LINK_MANGLED.replace_all(&text, "");
    let text = SHORT_LINK_BARE.replace_all(&text, "");
    let text = BARE_URL.replace_all(&text, "");

    let text = tidy_spacing(&text);
    let text = NON_TEXT.replace_all(&text, "");
    // Character removal can leave doubled spaces behind; tidy once more so
    // the output is stably single-spaced.
    tidy_spacing(&text)
}

fn tidy_spacing(text: &str) -> String {
    let text = WHITESPACE_RUN.replace_all(text.trim(), " ");
    SPACE_BEFORE_PUNCT.replace_all(&text, "$1").into_owned()
}

/// Number of whitespace-delimited tokens in normalized text.
pub fn word_count(normalized: &str) -> usize {
    normalized.split_whitespace().count()
}

/// Parse as an HTML fragment and keep only the visible text content.
/// Plain text passes through unchanged apart from entity decoding.
pub(crate) fn strip_tags(raw: &str) -> String {
    let fragment = Html::parse_fragment(raw);
    fragment.root_element().text().collect()
}
