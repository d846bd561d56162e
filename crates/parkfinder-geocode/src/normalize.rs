//! Postcode text clean-up.

use std::sync::LazyLock;

use regex::Regex;

static UK_POSTCODE: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"(?i)^[A-Z]{1,2}[0-9][A-Z0-9]? ?[0-9][A-Z]{2}$").expect("valid postcode regex")
});

/// Uppercases, drops everything but ASCII letters and digits, and puts a
/// single space before the inward code (last three characters).
///
/// `"sw1a1aa"` becomes `"SW1A 1AA"`. Input of three characters or fewer is
/// returned without a space.
#[must_use]
pub fn normalize_postcode(raw: &str) -> String {
    let clean: String = raw
        .chars()
        .filter(char::is_ascii_alphanumeric)
        .map(|c| c.to_ascii_uppercase())
        .collect();

    if clean.len() > 3 {
        let (outward, inward) = clean.split_at(clean.len() - 3);
        format!("{outward} {inward}")
    } else {
        clean
    }
}

/// Whether `raw` looks like a UK postcode. Advisory only: resolution is still
/// attempted for input that fails this check.
#[must_use]
pub fn is_valid_postcode_format(raw: &str) -> bool {
    UK_POSTCODE.is_match(raw.trim())
}
