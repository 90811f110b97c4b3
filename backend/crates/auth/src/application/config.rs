//! Application Configuration
//!
//! Configuration for the Auth application layer.

use platform::cookie::CookieSpec;
use platform::crypto::{DEFAULT_TOKEN_BYTES, MIN_TOKEN_BYTES};

/// Re-export from platform
pub use platform::cookie::SameSite;
pub use platform::password::HashCost;

/// Auth application configuration
#[derive(Debug, Clone)]
pub struct AuthConfig {
    /// Cookie carrying the session token
    pub session_cookie_name: String,
    /// Whether to require Secure cookie
    pub cookie_secure: bool,
    /// SameSite policy
    pub cookie_same_site: SameSite,
    /// Password pepper (optional, application-wide secret)
    pub password_pepper: Option<Vec<u8>>,
    /// Argon2 cost for newly created hashes
    pub hash_cost: HashCost,
    /// Entropy of session and reset tokens, in bytes
    pub token_bytes: usize,
}

impl Default for AuthConfig {
    fn default() -> Self {
        Self {
            session_cookie_name: "session_id".to_string(),
            cookie_secure: true,
            cookie_same_site: SameSite::Lax,
            password_pepper: None,
            hash_cost: HashCost::default(),
            token_bytes: DEFAULT_TOKEN_BYTES,
        }
    }
}

impl AuthConfig {
    /// Create config for development (insecure cookie)
    pub fn development() -> Self {
        Self {
            cookie_secure: false,
            ..Default::default()
        }
    }

    /// Get password pepper as slice
    pub fn pepper(&self) -> Option<&[u8]> {
        self.password_pepper.as_deref()
    }

    /// Token size actually used (never below 128 bits)
    pub fn token_bytes(&self) -> usize {
        self.token_bytes.max(MIN_TOKEN_BYTES)
    }

    /// Attributes of the session cookie
    pub fn session_cookie(&self) -> CookieSpec {
        CookieSpec::new(&self.session_cookie_name)
            .secure(self.cookie_secure)
            .same_site(self.cookie_same_site)
    }
}
