//! Deterministic short digest of target URLs.
//!
//! Keys are lookup tokens, not a security boundary, so a fast
//! non-cryptographic hash is enough. MurmurHash3 (x86, 32-bit, seed 0) is
//! rendered as 8 lowercase hex characters in little-endian byte order.

use std::io::Cursor;

/// Returns the 8-character key derived from `url`.
///
/// # Examples
///
/// ```ignore
/// assert_eq!(digest_key("http://example.com/"), "f684a3c4");
/// ```
pub fn digest_key(url: &str) -> String {
    // Reading from an in-memory cursor cannot fail.
    murmur3::murmur3_32(&mut Cursor::new(url.as_bytes()), 0)
        .unwrap_or_default()
        .to_le_bytes()
        .iter()
        .map(|b| format!("{:02x}", b))
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_known_digests() {
        assert_eq!(digest_key("http://example.com/"), "f684a3c4");
        assert_eq!(digest_key("https://example.com/"), "83f94a17");
        assert_eq!(digest_key("https://rust-lang.org/"), "af3695c6");
    }

    #[test]
    fn test_multibyte_url_digest() {
        assert_eq!(digest_key("https://例え.jp/ruta/ñ"), "9a8a31f4");
    }

    #[test]
    fn test_empty_input() {
        assert_eq!(digest_key(""), "00000000");
    }

    #[test]
    fn test_digest_is_stable() {
        let first = digest_key("https://example.com/some/path?q=1");
        let second = digest_key("https://example.com/some/path?q=1");
        assert_eq!(first, second);
    }

    #[test]
    fn test_digest_shape() {
        let key = digest_key("https://example.com/a");
        assert_eq!(key.len(), 8);
        assert!(key.chars().all(|c| c.is_ascii_hexdigit() && !c.is_ascii_uppercase()));
    }

    #[test]
    fn test_distinct_urls_distinct_keys() {
        assert_ne!(
            digest_key("https://example.com/a"),
            digest_key("https://example.com/b")
        );
    }

    #[test]
    fn test_tail_lengths() {
        let keys: Vec<String> = ["a", "ab", "abc", "abcd", "abcde"]
            .iter()
            .map(|s| digest_key(s))
            .collect();

        for (i, a) in keys.iter().enumerate() {
            for b in keys.iter().skip(i + 1) {
                assert_ne!(a, b);
            }
        }
    }
}
