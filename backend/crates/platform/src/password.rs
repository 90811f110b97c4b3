//! Password Hashing and Verification
//!
//! - Argon2id hashing (memory-hard, OWASP recommended)
//! - Random 128-bit salt per hash, embedded in the PHC string
//! - Zeroization of clear text on drop
//! - Optional application-wide pepper
//! - Async wrappers that run the hash on the blocking thread pool
//!
//! Verification always re-derives the hash with the salt and parameters
//! stored in the PHC string, never with a fresh salt.

use std::fmt;

use argon2::{
    Algorithm, Argon2, Params, PasswordHash, PasswordHasher, PasswordVerifier, Version,
    password_hash::SaltString,
};
use rand::rngs::OsRng;
use thiserror::Error;
use zeroize::{Zeroize, ZeroizeOnDrop};

// ============================================================================
// Error Types
// ============================================================================

/// Password hashing errors
#[derive(Debug, Error)]
pub enum PasswordHashError {
    /// Hashing operation failed
    #[error("Password hashing failed: {0}")]
    HashingFailed(String),

    /// Invalid Argon2 cost parameters
    #[error("Invalid hashing parameters: {0}")]
    InvalidParams(String),

    /// Invalid hash format
    #[error("Invalid password hash format")]
    InvalidHashFormat,

    /// The blocking worker running the hash panicked or was cancelled
    #[error("Password hashing task failed: {0}")]
    TaskFailed(String),
}

// ============================================================================
// Hash cost
// ============================================================================

/// Argon2id cost parameters used when creating new hashes
///
/// Existing hashes carry their own parameters, so changing the cost never
/// breaks verification of older records.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct HashCost {
    /// Memory in KiB
    pub memory_kib: u32,
    pub iterations: u32,
    pub parallelism: u32,
}

impl Default for HashCost {
    /// OWASP recommended: m=19456 (19 MiB), t=2, p=1
    fn default() -> Self {
        Self {
            memory_kib: Params::DEFAULT_M_COST,
            iterations: Params::DEFAULT_T_COST,
            parallelism: Params::DEFAULT_P_COST,
        }
    }
}

impl HashCost {
    /// Cheapest parameters Argon2 accepts. Tests and local tooling only.
    pub fn minimal() -> Self {
        Self {
            memory_kib: Params::MIN_M_COST.max(8),
            iterations: Params::MIN_T_COST,
            parallelism: Params::MIN_P_COST,
        }
    }

    fn hasher(&self) -> Result<Argon2<'static>, PasswordHashError> {
        let params = Params::new(self.memory_kib, self.iterations, self.parallelism, None)
            .map_err(|e| PasswordHashError::InvalidParams(e.to_string()))?;
        Ok(Argon2::new(Algorithm::Argon2id, Version::V0x13, params))
    }
}

// ============================================================================
// Clear Text Password (Zeroized on drop)
// ============================================================================

/// Clear text password with automatic memory zeroization
///
/// No policy is applied here; any string, including an empty one, is a
/// password. Does not implement `Clone`, and `Debug` is redacted.
#[derive(Zeroize, ZeroizeOnDrop)]
pub struct ClearTextPassword(String);

impl ClearTextPassword {
    pub fn new(raw: String) -> Self {
        Self(raw)
    }

    /// Password bytes with the pepper appended, if any
    fn peppered(&self, pepper: Option<&[u8]>) -> Vec<u8> {
        let mut bytes = self.0.as_bytes().to_vec();
        if let Some(p) = pepper {
            bytes.extend_from_slice(p);
        }
        bytes
    }

    /// Hash the password with a fresh random salt
    ///
    /// Returns a PHC-formatted hash wrapped in `HashedPassword`.
    pub fn hash(
        &self,
        pepper: Option<&[u8]>,
        cost: HashCost,
    ) -> Result<HashedPassword, PasswordHashError> {
        let mut password_bytes = self.peppered(pepper);
        let salt = SaltString::generate(&mut OsRng);

        let result = cost
            .hasher()?
            .hash_password(&password_bytes, &salt)
            .map(|hash| HashedPassword {
                hash: hash.to_string(),
            })
            .map_err(|e| PasswordHashError::HashingFailed(e.to_string()));

        password_bytes.zeroize();
        result
    }
}

impl fmt::Debug for ClearTextPassword {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_tuple("ClearTextPassword")
            .field(&"[REDACTED]")
            .finish()
    }
}

// ============================================================================
// Hashed Password (Safe to store)
// ============================================================================

/// Hashed password in PHC string format
///
/// The PHC string carries algorithm, version, cost parameters, salt and
/// digest, so it is self-describing for verification.
#[derive(Clone, PartialEq, Eq)]
pub struct HashedPassword {
    hash: String,
}

impl HashedPassword {
    /// Create from a PHC string, rejecting anything that does not parse
    pub fn from_phc_string(s: impl Into<String>) -> Result<Self, PasswordHashError> {
        let hash = s.into();
        PasswordHash::new(&hash).map_err(|_| PasswordHashError::InvalidHashFormat)?;
        Ok(Self { hash })
    }

    /// Wrap whatever the store holds without validating it
    ///
    /// A corrupt value simply never verifies.
    pub fn from_stored(s: impl Into<String>) -> Self {
        Self { hash: s.into() }
    }

    /// Get the PHC string for storage
    pub fn as_phc_string(&self) -> &str {
        &self.hash
    }

    /// Verify a password against this hash
    ///
    /// Returns `false` for a wrong password and for a malformed hash alike.
    /// Argon2 compares digests in constant time.
    pub fn verify(&self, password: &ClearTextPassword, pepper: Option<&[u8]>) -> bool {
        let Ok(parsed_hash) = PasswordHash::new(&self.hash) else {
            return false;
        };

        let mut password_bytes = password.peppered(pepper);
        // Parameters come from the PHC string, not from the current cost.
        let ok = Argon2::default()
            .verify_password(&password_bytes, &parsed_hash)
            .is_ok();
        password_bytes.zeroize();
        ok
    }
}

impl fmt::Debug for HashedPassword {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("HashedPassword")
            .field("hash", &"[HASH]")
            .finish()
    }
}

// ============================================================================
// Off-runtime helpers
// ============================================================================

/// Hash on the blocking thread pool
pub async fn hash_blocking(
    password: ClearTextPassword,
    pepper: Option<Vec<u8>>,
    cost: HashCost,
) -> Result<HashedPassword, PasswordHashError> {
    tokio::task::spawn_blocking(move || password.hash(pepper.as_deref(), cost))
        .await
        .map_err(|e| PasswordHashError::TaskFailed(e.to_string()))?
}

/// Verify on the blocking thread pool. A failed worker counts as a mismatch.
pub async fn verify_blocking(
    hashed: HashedPassword,
    password: ClearTextPassword,
    pepper: Option<Vec<u8>>,
) -> bool {
    match tokio::task::spawn_blocking(move || hashed.verify(&password, pepper.as_deref())).await {
        Ok(ok) => ok,
        Err(e) => {
            tracing::error!(error = %e, "password verification task failed");
            false
        }
    }
}

// ============================================================================
// Tests
// ============================================================================

#[cfg(test)]
mod tests {
    use super::*;

    fn pw(s: &str) -> ClearTextPassword {
        ClearTextPassword::new(s.to_string())
    }

    #[test]
    fn test_hash_and_verify() {
        let hashed = pw("TestPassword123!").hash(None, HashCost::minimal()).unwrap();

        assert!(hashed.verify(&pw("TestPassword123!"), None));
        assert!(!hashed.verify(&pw("WrongPassword123!"), None));
    }

    #[test]
    fn test_short_and_empty_passwords_are_accepted() {
        let hashed = pw("pw1").hash(None, HashCost::minimal()).unwrap();
        assert!(hashed.verify(&pw("pw1"), None));

        let empty = pw("").hash(None, HashCost::minimal()).unwrap();
        assert!(empty.verify(&pw(""), None));
        assert!(!empty.verify(&pw(" "), None));
    }

    #[test]
    fn test_same_password_gets_different_salts() {
        let a = pw("same-secret").hash(None, HashCost::minimal()).unwrap();
        let b = pw("same-secret").hash(None, HashCost::minimal()).unwrap();
        assert_ne!(a.as_phc_string(), b.as_phc_string());
        assert!(a.verify(&pw("same-secret"), None));
        assert!(b.verify(&pw("same-secret"), None));
    }

    #[test]
    fn test_hash_uses_argon2id() {
        let hashed = pw("whatever").hash(None, HashCost::minimal()).unwrap();
        assert!(hashed.as_phc_string().starts_with("$argon2id$"));
    }

    #[test]
    fn test_hash_with_pepper() {
        let pepper = b"my_secret_pepper";
        let hashed = pw("TestPassword123!")
            .hash(Some(pepper), HashCost::minimal())
            .unwrap();

        assert!(hashed.verify(&pw("TestPassword123!"), Some(pepper)));
        assert!(!hashed.verify(&pw("TestPassword123!"), None));
        assert!(!hashed.verify(&pw("TestPassword123!"), Some(b"wrong_pepper")));
    }

    #[test]
    fn test_phc_string_roundtrip() {
        let hashed = pw("TestPassword123!").hash(None, HashCost::minimal()).unwrap();

        let restored = HashedPassword::from_phc_string(hashed.as_phc_string()).unwrap();
        assert!(restored.verify(&pw("TestPassword123!"), None));
    }

    #[test]
    fn test_invalid_phc_string() {
        assert!(matches!(
            HashedPassword::from_phc_string("not_a_valid_hash"),
            Err(PasswordHashError::InvalidHashFormat)
        ));
    }

    #[test]
    fn test_malformed_stored_hash_never_verifies() {
        let stored = HashedPassword::from_stored("$argon2id$garbage");
        assert!(!stored.verify(&pw("anything"), None));
        assert!(!HashedPassword::from_stored("").verify(&pw(""), None));
    }

    #[test]
    fn test_invalid_cost_is_reported() {
        let cost = HashCost {
            memory_kib: 0,
            iterations: 0,
            parallelism: 0,
        };
        assert!(matches!(
            pw("x").hash(None, cost),
            Err(PasswordHashError::InvalidParams(_))
        ));
    }

    #[test]
    fn test_debug_redaction() {
        let debug_output = format!("{:?}", pw("secret"));
        assert!(debug_output.contains("REDACTED"));
        assert!(!debug_output.contains("secret"));

        let hashed = pw("secret").hash(None, HashCost::minimal()).unwrap();
        assert!(!format!("{:?}", hashed).contains("argon2"));
    }

    #[tokio::test]
    async fn test_blocking_helpers() {
        let hashed = hash_blocking(pw("off-thread"), None, HashCost::minimal())
            .await
            .unwrap();
        assert!(verify_blocking(hashed.clone(), pw("off-thread"), None).await);
        assert!(!verify_blocking(hashed, pw("nope"), None).await);
    }
}
