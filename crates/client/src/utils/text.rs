//! Casing helpers for labels.

/// Uppercase the first character, leave the rest alone.
#[must_use]
pub fn capitalize(s: &str) -> String {
    let mut chars = s.chars();
    chars.next().map_or_else(String::new, |first| {
        first.to_uppercase().chain(chars).collect()
    })
}

/// Capitalize every whitespace-separated word, lowercasing the rest of each.
#[must_use]
pub fn title_case(s: &str) -> String {
    s.split_whitespace()
        .map(|word| capitalize(&word.to_lowercase()))
        .collect::<Vec<_>>()
        .join(" ")
}

/// `payout_currency` -> `Payout Currency`.
#[must_use]
pub fn snake_to_title(s: &str) -> String {
    title_case(&s.replace('_', " "))
}
