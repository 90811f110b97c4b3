//! Auth (Authentication) Backend Module
//!
//! Clean Architecture structure:
//! - `domain/` - Entities, value objects, repository trait
//! - `application/` - `AuthCore` and its configuration
//! - `infra/` - In-memory and PostgreSQL repositories
//! - `presentation/` - HTTP handlers, DTOs, router
//!
//! ## Features
//! - Registration with email + password
//! - Login check and cookie-based sessions (one per user)
//! - Password reset through a one-shot reset token
//!
//! ## Security Model
//! - Passwords hashed with Argon2id and a per-hash random salt
//! - Session and reset tokens are opaque, OS-random, URL-safe strings
//! - Credential material is redacted from `Debug` and never logged

pub mod application;
pub mod domain;
pub mod error;
pub mod infra;
pub mod presentation;


// Re-exports for convenience
pub use application::{AuthConfig, AuthCore};
pub use error::{AuthError, AuthResult};
pub use infra::{InMemoryUserRepository, PgUserRepository};
pub use presentation::router::auth_router;

// Re-export kernel error types for unified error handling
pub use kernel::error::{
    app_error::{AppError, AppResult},
    kind::ErrorKind,
};

pub mod models {
    pub use crate::domain::entity::user::{User, UserUpdate};
    pub use crate::domain::value_object::*;
    pub use crate::presentation::dto::*;
}
