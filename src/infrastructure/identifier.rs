//! Hash-based key derivation.

use crate::domain::services::IdentifierService;
use crate::utils::key_digest::digest_key;

/// Production [`IdentifierService`]: custom words are used verbatim,
/// everything else gets a MurmurHash3 digest of the URL.
#[derive(Debug, Clone, Copy, Default)]
pub struct HashIdentifierService;

impl IdentifierService for HashIdentifierService {
    fn derive_key(&self, url: &str, custom_word: &str) -> String {
        if custom_word.is_empty() {
            digest_key(url)
        } else {
            custom_word.to_string()
        }
    }
}
