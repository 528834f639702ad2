//! Key derivation contract.

/// Derives the lookup key for a target URL.
#[cfg_attr(test, mockall::automock)]
pub trait IdentifierService: Send + Sync {
    /// Returns `custom_word` unchanged when it is non-empty, otherwise a
    /// deterministic digest of `url`.
    ///
    /// Pure: the same inputs always produce the same key.
    fn derive_key(&self, url: &str, custom_word: &str) -> String;
}
