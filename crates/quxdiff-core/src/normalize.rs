//! Title canonicalization and token-set similarity.
//!
//! Titles are model-generated prose, so two runs rarely describe the same
//! problem with identical wording. Normalization removes the noise that does
//! not carry meaning (severity prefixes, filler adverbs, casing) and folds
//! common synonyms onto one token before similarity is measured.

use std::collections::HashSet;
use std::sync::LazyLock;

use regex::Regex;

/// Leading severity marker such as `[P0] `, `{p1}: ` or `P2— `.
static SEVERITY_PREFIX: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"(?i)^[\[{]?p[0-2][\]}]?[:\-–—]?\s?").expect("severity prefix regex is valid")
});

/// Filler adverbs that intensify but do not identify an issue.
const FILLER_WORDS: &[&str] = &[
    "consistently",
    "extremely",
    "significantly",
    "very",
    "really",
    "quite",
    "highly",
    "severely",
    "noticeably",
    "frequently",
    "occasionally",
    "sometimes",
    "repeatedly",
    "completely",
    "totally",
    "slightly",
];

/// Per-token synonym folding. Not phrase-aware.
const SYNONYMS: &[(&str, &str)] = &[
    ("latency", "performance"),
    ("lag", "performance"),
    ("laggy", "performance"),
    ("sluggish", "performance"),
    ("frozen", "block"),
    ("freeze", "block"),
    ("freezes", "block"),
    ("stuck", "block"),
    ("hang", "block"),
    ("hangs", "block"),
    ("blocked", "block"),
    ("blocking", "block"),
    ("navigation", "nav"),
    ("navigate", "nav"),
    ("navigating", "nav"),
    ("progress", "step"),
    ("steps", "step"),
    ("crashes", "crash"),
    ("crashed", "crash"),
    ("errors", "error"),
    ("buttons", "button"),
];

fn is_filler(token: &str) -> bool {
    FILLER_WORDS.contains(&token)
}

fn canonical_token(token: &str) -> &str {
    SYNONYMS
        .iter()
        .find(|(from, _)| *from == token)
        .map_or(token, |(_, to)| *to)
}

/// Canonicalize an issue title for comparison.
pub fn normalize_title(title: &str) -> String {
    let stripped = SEVERITY_PREFIX.replace(title, "");
    let lowered = stripped.to_lowercase();
    lowered
        .split_whitespace()
        .filter(|token| !is_filler(token))
        .map(canonical_token)
        .collect::<Vec<_>>()
        .join(" ")
}

fn token_set(normalized: &str) -> HashSet<&str> {
    normalized.split_whitespace().collect()
}

/// Jaccard similarity of the normalized token sets of two titles, in `[0, 1]`.
///
/// Two titles that both normalize to nothing are considered identical.
pub fn jaccard_similarity(a: &str, b: &str) -> f64 {
    let norm_a = normalize_title(a);
    let norm_b = normalize_title(b);
    let set_a = token_set(&norm_a);
    let set_b = token_set(&norm_b);

    match (set_a.is_empty(), set_b.is_empty()) {
        (true, true) => return 1.0,
        (true, false) | (false, true) => return 0.0,
        _ => {}
    }

    let intersection = set_a.intersection(&set_b).count();
    let union = set_a.union(&set_b).count();
    intersection as f64 / union as f64
}

/// Similarity expressed as a rounded percentage.
pub fn similarity_percent(similarity: f64) -> u32 {
    (similarity * 100.0).round() as u32
}
