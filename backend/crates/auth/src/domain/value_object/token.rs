//! Opaque Tokens
//!
//! Session and reset tokens are random strings with no structure. They
//! share one representation and differ only in a compile-time marker, the
//! same way `kernel::id::Id<T>` separates ID kinds.

use std::fmt;
use std::hash::{Hash, Hasher};
use std::marker::PhantomData;

use platform::crypto::generate_token;

pub mod markers {
    /// Proves an authenticated session
    pub struct Session;
    /// Authorises one password change
    pub struct Reset;
}

/// Opaque bearer credential
///
/// `Debug` is redacted; use [`Token::as_str`] deliberately when the value
/// has to cross the wire.
pub struct Token<K> {
    value: String,
    _kind: PhantomData<fn() -> K>,
}

pub type SessionToken = Token<markers::Session>;
pub type ResetToken = Token<markers::Reset>;

impl<K> Token<K> {
    /// Fresh random token of `bytes` bytes of entropy (at least 16)
    pub fn generate(bytes: usize) -> Self {
        Self::from_string(generate_token(bytes))
    }

    /// Wrap a value presented by a client or loaded from the store
    pub fn from_string(value: impl Into<String>) -> Self {
        Self {
            value: value.into(),
            _kind: PhantomData,
        }
    }

    pub fn as_str(&self) -> &str {
        &self.value
    }

    pub fn into_string(self) -> String {
        self.value
    }

    pub fn is_empty(&self) -> bool {
        self.value.is_empty()
    }
}

impl<K> Clone for Token<K> {
    fn clone(&self) -> Self {
        Self::from_string(self.value.clone())
    }
}

impl<K> PartialEq for Token<K> {
    fn eq(&self, other: &Self) -> bool {
        self.value == other.value
    }
}

impl<K> Eq for Token<K> {}

impl<K> Hash for Token<K> {
    fn hash<H: Hasher>(&self, state: &mut H) {
        self.value.hash(state);
    }
}

impl<K> fmt::Debug for Token<K> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_tuple("Token").field(&"[REDACTED]").finish()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_generate_is_random_and_non_empty() {
        let a = SessionToken::generate(32);
        let b = SessionToken::generate(32);
        assert!(!a.is_empty());
        assert_ne!(a, b);
        assert_eq!(a.as_str().len(), 43);
    }

    #[test]
    fn test_generate_enforces_minimum_entropy() {
        assert_eq!(ResetToken::generate(1).as_str().len(), 22);
    }

    #[test]
    fn test_debug_is_redacted() {
        let token = ResetToken::from_string("super-secret");
        let out = format!("{:?}", token);
        assert!(!out.contains("super-secret"));
    }

    #[test]
    fn test_equality_by_value() {
        let token = SessionToken::from_string("abc");
        assert_eq!(token.clone(), SessionToken::from_string("abc"));
        assert_eq!(token.into_string(), "abc");
    }
}
