//! Cryptographic Utilities

use base64::{Engine, engine::general_purpose::URL_SAFE_NO_PAD};
use rand::{RngCore, rngs::OsRng};

/// Smallest accepted token size (128 bits)
pub const MIN_TOKEN_BYTES: usize = 16;

/// Default token size (256 bits)
pub const DEFAULT_TOKEN_BYTES: usize = 32;

/// Generate cryptographically secure random bytes
pub fn random_bytes(len: usize) -> Vec<u8> {
    let mut bytes = vec![0u8; len];
    OsRng.fill_bytes(&mut bytes);
    bytes
}

/// Encode bytes as URL-safe base64 without padding (cookie and JSON safe)
pub fn to_base64url(bytes: &[u8]) -> String {
    URL_SAFE_NO_PAD.encode(bytes)
}

/// Generate an opaque random token from OS entropy
///
/// `bytes` is clamped to at least [`MIN_TOKEN_BYTES`].
pub fn generate_token(bytes: usize) -> String {
    to_base64url(&random_bytes(bytes.max(MIN_TOKEN_BYTES)))
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashSet;

    #[test]
    fn test_random_bytes() {
        let bytes = random_bytes(32);
        assert_eq!(bytes.len(), 32);
        assert!(bytes.iter().any(|&b| b != 0));
        assert!(random_bytes(0).is_empty());
    }

    #[test]
    fn test_base64url_alphabet() {
        let encoded = to_base64url(&[0xfb, 0xff, 0xfe]);
        assert_eq!(encoded, "-__-");
        assert!(!encoded.contains('='));
    }

    #[test]
    fn test_token_length_and_clamp() {
        // 32 bytes -> 43 base64 chars without padding
        assert_eq!(generate_token(DEFAULT_TOKEN_BYTES).len(), 43);
        // below the minimum is raised to 16 bytes -> 22 chars
        assert_eq!(generate_token(4).len(), 22);
    }

    #[test]
    fn test_tokens_do_not_repeat() {
        let tokens: HashSet<String> = (0..1000).map(|_| generate_token(16)).collect();
        assert_eq!(tokens.len(), 1000);
    }
}
