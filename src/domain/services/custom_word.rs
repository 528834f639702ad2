//! Lexical rule for caller-chosen keys.

/// Decides whether a requested custom word may be used as a key.
///
/// The empty string is the "no custom word" sentinel and is handled by the
/// caller; implementations reject it like any other invalid word.
#[cfg_attr(test, mockall::automock)]
pub trait CustomWordValidator: Send + Sync {
    fn is_valid(&self, word: &str) -> bool;
}
