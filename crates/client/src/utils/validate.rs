//! Form field validation.

use std::sync::LazyLock;

use regex::Regex;

/// Digits with an optional leading `+`, once spaces, dashes, dots and
/// parentheses are removed.
static PHONE_RE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"^\+?[0-9]{7,15}$").expect("Invalid regex"));

static PHONE_SEPARATORS_RE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"[\s\-.()]").expect("Invalid regex"));

/// Lowercase words joined by single hyphens, e.g. `afrobeats-live-2026`.
static SLUG_RE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"^[a-z0-9]+(?:-[a-z0-9]+)*$").expect("Invalid regex"));

static LOWER_RE: LazyLock<Regex> = LazyLock::new(|| Regex::new(r"[a-z]").expect("Invalid regex"));
static UPPER_RE: LazyLock<Regex> = LazyLock::new(|| Regex::new(r"[A-Z]").expect("Invalid regex"));
static DIGIT_RE: LazyLock<Regex> = LazyLock::new(|| Regex::new(r"[0-9]").expect("Invalid regex"));

const MIN_PASSWORD_LENGTH: usize = 8;

/// Loose international phone number check.
#[must_use]
pub fn is_valid_phone(phone: &str) -> bool {
    let compact = PHONE_SEPARATORS_RE.replace_all(phone.trim(), "");
    PHONE_RE.is_match(&compact)
}

/// URL slug check for event pages.
#[must_use]
pub fn is_valid_slug(slug: &str) -> bool {
    SLUG_RE.is_match(slug)
}

/// At least 8 characters with a lowercase letter, an uppercase letter and a digit.
#[must_use]
pub fn is_strong_password(password: &str) -> bool {
    password.chars().count() >= MIN_PASSWORD_LENGTH
        && LOWER_RE.is_match(password)
        && UPPER_RE.is_match(password)
        && DIGIT_RE.is_match(password)
}
