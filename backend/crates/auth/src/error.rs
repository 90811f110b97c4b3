//! Auth Error Types
//!
//! Auth-specific error variants that integrate with the unified
//! `kernel::error::AppError` system.

use axum::response::{IntoResponse, Response};
use kernel::error::{app_error::AppError, kind::ErrorKind};
use platform::password::PasswordHashError;
use thiserror::Error;

/// Auth-specific result type alias
pub type AuthResult<T> = Result<T, AuthError>;

/// Auth-specific error variants
#[derive(Debug, Error)]
pub enum AuthError {
    /// Registration with an email that already has an account
    #[error("User already exists")]
    AlreadyExists,

    /// No account for the given email (or ID, from the store)
    #[error("User not found")]
    UserNotFound,

    /// Reset token unknown or already used
    #[error("Invalid reset token")]
    InvalidResetToken,

    /// Registration with a malformed email
    #[error("Invalid email: {0}")]
    InvalidEmail(String),

    /// Login rejected at the HTTP edge
    #[error("Invalid credentials")]
    InvalidCredentials,

    /// Route needs a valid session cookie
    #[error("A valid session is required")]
    SessionRequired,

    /// Database error
    #[error("Database error: {0}")]
    Database(#[from] sqlx::Error),

    /// Internal error
    #[error("Internal error: {0}")]
    Internal(String),
}

impl AuthError {
    /// Get the ErrorKind for this error
    ///
    /// Reset-flow failures answer 403 rather than 404 so the endpoint does
    /// not distinguish "no such account" from other refusals.
    pub fn kind(&self) -> ErrorKind {
        match self {
            AuthError::AlreadyExists => ErrorKind::Conflict,
            AuthError::UserNotFound
            | AuthError::InvalidResetToken
            | AuthError::SessionRequired => ErrorKind::Forbidden,
            AuthError::InvalidEmail(_) => ErrorKind::BadRequest,
            AuthError::InvalidCredentials => ErrorKind::Unauthorized,
            AuthError::Database(_) | AuthError::Internal(_) => ErrorKind::InternalServerError,
        }
    }

    /// Convert to AppError
    pub fn to_app_error(&self) -> AppError {
        match self {
            // Never leak driver messages to clients
            AuthError::Database(_) | AuthError::Internal(_) => {
                AppError::internal("Internal server error")
            }
            _ => AppError::new(self.kind(), self.to_string()),
        }
    }

    /// Log the error with appropriate level
    fn log(&self) {
        match self {
            AuthError::Database(e) => {
                tracing::error!(error = %e, "Auth database error");
            }
            AuthError::Internal(msg) => {
                tracing::error!(message = %msg, "Auth internal error");
            }
            AuthError::InvalidCredentials => {
                tracing::warn!("Invalid login attempt");
            }
            AuthError::InvalidResetToken => {
                tracing::warn!("Password update with unknown reset token");
            }
            _ => {
                tracing::debug!(error = %self, "Auth error");
            }
        }
    }
}

impl IntoResponse for AuthError {
    fn into_response(self) -> Response {
        self.log();
        self.to_app_error().into_response()
    }
}

impl From<AppError> for AuthError {
    fn from(err: AppError) -> Self {
        AuthError::Internal(err.to_string())
    }
}

impl From<PasswordHashError> for AuthError {
    fn from(err: PasswordHashError) -> Self {
        AuthError::Internal(err.to_string())
    }
}
