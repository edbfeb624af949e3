//! Domain extraction from free-form text.
//!
//! A domain is one or more dot-separated labels followed by a final label of
//! at least two characters. Labels are 1-63 ASCII alphanumerics or hyphens and
//! never start or end with a hyphen.

use std::collections::BTreeSet;
use std::sync::LazyLock;

use regex::Regex;

use crate::error::{DomcheckError, Result};

/// Unanchored pattern used when scanning text.
pub const DOMAIN_PATTERN: &str = r"(?:[A-Za-z0-9](?:[A-Za-z0-9-]{0,61}[A-Za-z0-9])?\.)+[A-Za-z0-9][A-Za-z0-9-]{0,61}[A-Za-z0-9]";

/// Longest name DNS can carry in presentation form (without the root dot).
const MAX_DOMAIN_LEN: usize = 253;

static DOMAIN_RE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(DOMAIN_PATTERN).expect("domain pattern compiles"));

static DOMAIN_EXACT_RE: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(&format!("^(?:{DOMAIN_PATTERN})$")).expect("anchored domain pattern compiles")
});

/// Extract every domain-like token from `text`.
///
/// Matches are lowercased, deduplicated and returned in ascending order.
/// Text without matches (including empty text) yields an empty vector.
///
/// ```rust
/// use domcheck_core::extract_domains;
///
/// let found = extract_domains("Visit example.com and TEST.org, not example.com again");
/// assert_eq!(found, vec!["example.com", "test.org"]);
/// ```
#[must_use]
pub fn extract_domains(text: &str) -> Vec<String> {
    DOMAIN_RE
        .find_iter(text)
        .map(|m| m.as_str().to_ascii_lowercase())
        .collect::<BTreeSet<_>>()
        .into_iter()
        .collect()
}

/// Validate a single, explicitly supplied domain.
///
/// Surrounding whitespace and one trailing root dot are ignored. Returns the
/// lowercased domain.
pub fn validate_domain(input: &str) -> Result<String> {
    let trimmed = input.trim();
    let name = trimmed.strip_suffix('.').unwrap_or(trimmed);

    if name.len() > MAX_DOMAIN_LEN || !DOMAIN_EXACT_RE.is_match(name) {
        return Err(DomcheckError::InvalidDomain(input.to_string()));
    }

    Ok(name.to_ascii_lowercase())
}

/// Returns true if `input` is a valid domain according to [`validate_domain`].
#[must_use]
pub fn is_valid_domain(input: &str) -> bool {
    validate_domain(input).is_ok()
}
