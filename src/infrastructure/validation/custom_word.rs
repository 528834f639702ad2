//! Custom word validation.

use regex::Regex;
use std::sync::LazyLock;

use crate::domain::services::CustomWordValidator;

/// ASCII letters and digits, at least one character.
static CUSTOM_WORD_REGEX: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"^[a-zA-Z0-9]+$").expect("custom word pattern is a valid regex")
});

/// Accepts only non-empty ASCII alphanumeric words.
#[derive(Debug, Clone, Copy, Default)]
pub struct AlphanumericWordValidator;

impl CustomWordValidator for AlphanumericWordValidator {
    fn is_valid(&self, word: &str) -> bool {
        CUSTOM_WORD_REGEX.is_match(word)
    }
}
