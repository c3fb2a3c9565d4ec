//! Utility functions for the Swyft admin service

use sha2::{Digest, Sha256};

/// Case-insensitive substring match used by every search box
///
/// An empty query matches everything, mirroring an empty search field.
#[must_use]
pub fn matches_query(haystack: &str, query: &str) -> bool {
    if query.is_empty() {
        return true;
    }
    haystack.to_lowercase().contains(&query.to_lowercase())
}

/// Hex-encoded SHA-256 digest, used for admin password hashes
#[must_use]
pub fn sha256_hex(input: &str) -> String {
    let mut hasher = Sha256::new();
    hasher.update(input.as_bytes());
    let digest = hasher.finalize();
    digest.iter().map(|b| format!("{b:02x}")).collect()
}

/// Join optional first and last name parts into a display name
#[must_use]
pub fn full_name(first: &str, last: Option<&str>) -> String {
    match last {
        Some(last) if !last.is_empty() => format!("{first} {last}"),
        _ => first.to_string(),
    }
}

/// Validate a display-name search query (length guard for list endpoints)
#[must_use]
pub fn validate_search_query(query: &str) -> bool {
    query.len() <= 100
}
