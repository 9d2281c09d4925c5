// File: src/predicates.rs
// Purpose: Pure string predicates behind the validator rules

use email_address::EmailAddress;
use once_cell::sync::Lazy;
use regex::Regex;

static SLUG_REGEX: Lazy<Regex> = Lazy::new(|| {
    Regex::new(r"^[a-z0-9]+(-[a-z0-9]+)*$").unwrap()
});

static NUMERIC_REGEX: Lazy<Regex> = Lazy::new(|| {
    Regex::new(r"^\s*[+-]?(\d+(\.\d*)?|\.\d+)([eE][+-]?\d+)?\s*$").unwrap()
});

// Hostname label: alphanumerics with inner hyphens
static DOMAIN_LABEL_REGEX: Lazy<Regex> = Lazy::new(|| {
    Regex::new(r"^[A-Za-z0-9]([A-Za-z0-9-]*[A-Za-z0-9])?$").unwrap()
});

/// Lowercase alphanumeric groups joined by single hyphens
pub fn is_slug(value: &str) -> bool {
    SLUG_REGEX.is_match(value)
}

/// Numeric value of a decimal string (optional sign, fraction and exponent,
/// surrounding whitespace allowed)
pub fn parse_numeric(value: &str) -> Option<f64> {
    if !NUMERIC_REGEX.is_match(value) {
        return None;
    }
    value.trim().parse::<f64>().ok()
}

pub fn is_numeric(value: &str) -> bool {
    parse_numeric(value).is_some()
}

/// Validate email address syntax
///
/// RFC 5322 parsing comes from `email_address`, which also accepts quoted
/// local parts and `[ip]` literals. A hostname domain must additionally have
/// at least two labels, no label starting or ending with a hyphen, and a
/// non-numeric top-level label.
pub fn is_valid_email(email: &str) -> bool {
    if !EmailAddress::is_valid(email) {
        return false;
    }

    let Some((_, domain)) = email.rsplit_once('@') else {
        return false;
    };
    if domain.starts_with('[') {
        return domain.ends_with(']');
    }

    let labels: Vec<&str> = domain.split('.').collect();
    if labels.len() < 2 {
        return false;
    }
    if !labels
        .iter()
        .all(|label| label.len() <= 63 && DOMAIN_LABEL_REGEX.is_match(label))
    {
        return false;
    }

    // TLD must not be purely numeric
    labels
        .last()
        .map(|tld| !tld.chars().all(|c| c.is_ascii_digit()))
        .unwrap_or(false)
}
