//! User Password Value Object
//!
//! Domain wrappers over `platform::password`. Hashing and verification are
//! async because they run on the blocking thread pool.
//!
//! ```rust,ignore
//! let raw = RawPassword::new("pw1".to_string());
//! let hashed = UserPassword::hash(raw, None, HashCost::default()).await?;
//! assert!(hashed.verify(RawPassword::new("pw1".into()), None).await);
//! ```

use platform::password::{
    self, ClearTextPassword, HashCost, HashedPassword, PasswordHashError,
};
use std::fmt;

// ============================================================================
// Raw Password (User Input)
// ============================================================================

/// Password exactly as the user typed it. Zeroized on drop.
pub struct RawPassword(ClearTextPassword);

impl RawPassword {
    pub fn new(raw: String) -> Self {
        Self(ClearTextPassword::new(raw))
    }
}

impl From<&str> for RawPassword {
    fn from(raw: &str) -> Self {
        Self::new(raw.to_owned())
    }
}

impl fmt::Debug for RawPassword {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_tuple("RawPassword").field(&"[REDACTED]").finish()
    }
}

// ============================================================================
// User Password (Hashed, for storage)
// ============================================================================

/// Salted one-way hash of the current password (Argon2id PHC string)
#[derive(Clone, PartialEq, Eq)]
pub struct UserPassword(HashedPassword);

impl UserPassword {
    /// Hash with a fresh random salt, off the async runtime
    pub async fn hash(
        raw: RawPassword,
        pepper: Option<&[u8]>,
        cost: HashCost,
    ) -> Result<Self, PasswordHashError> {
        password::hash_blocking(raw.0, pepper.map(<[u8]>::to_vec), cost)
            .await
            .map(Self)
    }

    /// Check `raw` against this hash, off the async runtime
    ///
    /// `false` on mismatch, on a corrupt stored value and on worker failure.
    pub async fn verify(&self, raw: RawPassword, pepper: Option<&[u8]>) -> bool {
        password::verify_blocking(self.0.clone(), raw.0, pepper.map(<[u8]>::to_vec)).await
    }

    /// Load whatever the store holds; a corrupt value just never verifies
    pub fn from_db(phc: impl Into<String>) -> Self {
        Self(HashedPassword::from_stored(phc))
    }

    /// PHC string for storage
    pub fn as_phc_string(&self) -> &str {
        self.0.as_phc_string()
    }
}

impl fmt::Debug for UserPassword {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_tuple("UserPassword").field(&"[HASH]").finish()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn test_hash_then_verify() {
        let hashed = UserPassword::hash("pw1".into(), None, HashCost::minimal())
            .await
            .unwrap();
        assert!(hashed.verify("pw1".into(), None).await);
        assert!(!hashed.verify("pw2".into(), None).await);
    }

    #[tokio::test]
    async fn test_pepper_must_match() {
        let pepper: &[u8] = b"pepper";
        let hashed = UserPassword::hash("pw1".into(), Some(pepper), HashCost::minimal())
            .await
            .unwrap();
        assert!(hashed.verify("pw1".into(), Some(pepper)).await);
        assert!(!hashed.verify("pw1".into(), None).await);
    }

    #[tokio::test]
    async fn test_corrupt_db_value_is_false_not_error() {
        let stored = UserPassword::from_db("plaintext-oops");
        assert!(!stored.verify("plaintext-oops".into(), None).await);
    }

    #[test]
    fn test_debug_redaction() {
        assert!(!format!("{:?}", RawPassword::from("hunter2")).contains("hunter2"));
        assert!(!format!("{:?}", UserPassword::from_db("$argon2id$x")).contains("argon2"));
    }
}
