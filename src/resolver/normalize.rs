//! String normalization for search queries.
//!
//! Library exports carry punctuation, parenthetical suffixes, and
//! repackaging qualifiers ("remastered", "deluxe") that break exact catalog
//! search. These helpers strip that noise before a query is issued. All
//! functions are pure and total: any input string, including empty, yields a
//! string.

use regex::Regex;
use std::sync::LazyLock;

/// Parenthesized spans. Greedy on purpose: "A (x) b (y)" drops everything
/// from the first `(` to the last `)`.
static PARENTHETICAL: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"\(.*\)").expect("valid regex"));

/// Straight and curly apostrophes
static APOSTROPHE: LazyLock<Regex> = LazyLock::new(|| Regex::new(r"['\u{2019}]").expect("valid regex"));

/// Separator punctuation that becomes whitespace
static SEPARATOR: LazyLock<Regex> = LazyLock::new(|| Regex::new(r"[/\-]").expect("valid regex"));

/// Whole-word repackaging qualifiers, case-insensitive
static QUALIFIER: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"(?i)\b(remastered|deluxe)\b").expect("valid regex"));

/// Runs of whitespace
static WHITESPACE: LazyLock<Regex> = LazyLock::new(|| Regex::new(r"\s+").expect("valid regex"));

/// Normalize a track title for catalog search.
///
/// Removes parenthesized substrings and apostrophes, turns slashes and
/// hyphens into spaces, and collapses the result to single-spaced, trimmed
/// text.
pub fn normalize_title(title: &str) -> String {
    let cleaned = PARENTHETICAL.replace_all(title, " ");
    let cleaned = APOSTROPHE.replace_all(&cleaned, "");
    let cleaned = SEPARATOR.replace_all(&cleaned, " ");
    collapse(&cleaned)
}

/// Normalize an album title for catalog search.
///
/// As [`normalize_title`], but first drops the whole words "remastered" and
/// "deluxe" (case-insensitive) so repackaged editions still match the
/// canonical album.
pub fn normalize_album_title(title: &str) -> String {
    let cleaned = QUALIFIER.replace_all(title, " ");
    normalize_title(&cleaned)
}

/// Normalize an artist name for the relaxed second-tier search.
///
/// Drops the article "The " and spells out "&" as "and". The band
/// The The is the one name this would destroy, so it passes through
/// unchanged.
pub fn normalize_artist(artist: &str) -> String {
    if artist == "The The" {
        return artist.to_string();
    }
    artist.replace("The ", "").replace('&', "and").trim().to_string()
}

fn collapse(s: &str) -> String {
    WHITESPACE.replace_all(s, " ").trim().to_string()
}
