//! Inline checks for blocklist input.

use regex::Regex;
use std::sync::LazyLock;
use thiserror::Error;

/// Single-label hostname with at least one alphabetic suffix.
static HOSTNAME_PATTERN: LazyLock<Option<Regex>> = LazyLock::new(|| {
    Regex::new(r"^[a-zA-Z0-9][a-zA-Z0-9-]{1,61}[a-zA-Z0-9](?:\.[a-zA-Z]{2,})+$").ok()
});

/// Why an entry was refused before reaching the backend.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Error)]
pub enum EntryRejection {
    /// Nothing but whitespace was typed.
    #[error("enter a domain to block")]
    Empty,
    /// The text does not look like a domain.
    #[error("invalid domain format")]
    Malformed,
}

/// Loose domain check: the hostname pattern, or anything containing a dot.
#[must_use]
pub fn is_plausible_domain(candidate: &str) -> bool {
    candidate.contains('.')
        || HOSTNAME_PATTERN
            .as_ref()
            .is_some_and(|pattern| pattern.is_match(candidate))
}

/// Trim and validate an entry typed into the add form.
///
/// # Errors
///
/// Returns [`EntryRejection`] when the trimmed input is empty or implausible.
pub fn normalize_entry(input: &str) -> Result<String, EntryRejection> {
    let trimmed = input.trim();
    if trimmed.is_empty() {
        return Err(EntryRejection::Empty);
    }
    if !is_plausible_domain(trimmed) {
        return Err(EntryRejection::Malformed);
    }
    Ok(trimmed.to_string())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn dotted_names_pass() {
        assert!(is_plausible_domain("example.com"));
        assert!(is_plausible_domain("sub.example.co.uk"));
        assert!(is_plausible_domain("1.2.3.4"));
    }

    #[test]
    fn bare_words_fail() {
        assert!(!is_plausible_domain("localhost"));
        assert!(!is_plausible_domain("a"));
    }

    #[test]
    fn normalize_trims_and_rejects() {
        assert_eq!(normalize_entry("  ads.net \n"), Ok("ads.net".to_string()));
        assert_eq!(normalize_entry("   "), Err(EntryRejection::Empty));
        assert_eq!(normalize_entry("intranet"), Err(EntryRejection::Malformed));
    }

    #[test]
    fn hostname_pattern_compiles() {
        assert!(HOSTNAME_PATTERN.is_some());
    }
}
