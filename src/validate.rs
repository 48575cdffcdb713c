//! Identifier normalisation and syntax checking

use crate::error::ResolveError;
use crate::types::Identifier;
use regex::Regex;
use std::sync::LazyLock;

static IDENTIFIER_PATTERN: LazyLock<Regex> = LazyLock::new(|| {
    #[allow(clippy::expect_used)]
    Regex::new(r"^[A-Za-z0-9-]+$").expect("identifier pattern is a valid regex")
});

/// Validate a raw identifier from batch input
///
/// Blank input and the placeholder "none" (any case) are reported as missing.
/// Anything else is trimmed and must consist of ASCII letters, digits and hyphens.
///
/// # Examples
///
/// ```
/// use profile_scan::validate::validate;
///
/// assert_eq!(validate("  torvalds ").unwrap().as_str(), "torvalds");
/// assert!(validate("None").is_err());
/// assert!(validate("bad/id").is_err());
/// ```
pub fn validate(raw: &str) -> Result<Identifier, ResolveError> {
    let trimmed = raw.trim();

    if trimmed.is_empty() || trimmed.eq_ignore_ascii_case("none") {
        return Err(ResolveError::MissingIdentifier);
    }

    if !IDENTIFIER_PATTERN.is_match(trimmed) {
        return Err(ResolveError::InvalidFormat);
    }

    Ok(Identifier::new_unchecked(trimmed))
}
