//! Slug derivation for post titles.

use regex::Regex;
use std::sync::LazyLock;

static WHITESPACE_REGEX: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"\s+").expect("Invalid whitespace regex"));

/// Anything that is not a letter, digit, underscore or hyphen
static DISALLOWED_REGEX: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"[^\p{L}\p{N}_\-]").expect("Invalid slug charset regex"));

static DASH_RUN_REGEX: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"-{2,}").expect("Invalid dash regex"));

/// Derive the base slug for a title.
///
/// Lowercases, turns whitespace runs into a single `-`, drops characters that
/// are not URL-safe and trims stray hyphens. May return an empty string when
/// the title has no usable characters.
pub fn slugify(title: &str) -> String {
    let lowered = title.trim().to_lowercase();
    let hyphenated = WHITESPACE_REGEX.replace_all(&lowered, "-");
    let cleaned = DISALLOWED_REGEX.replace_all(&hyphenated, "");
    let collapsed = DASH_RUN_REGEX.replace_all(&cleaned, "-");

    collapsed.trim_matches('-').to_string()
}

/// Final slug for a post given how many existing slugs contain the base.
pub fn disambiguate(base: &str, existing_matches: i64) -> String {
    if existing_matches > 0 {
        format!("{}-{}", base, existing_matches)
    } else {
        base.to_string()
    }
}
