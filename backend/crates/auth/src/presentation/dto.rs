//! API DTOs (Data Transfer Objects)

use serde::{Deserialize, Serialize};

// ============================================================================
// Requests
// ============================================================================

/// Sign-up and login request
#[derive(Debug, Clone, Deserialize)]
pub struct CredentialsRequest {
    pub email: String,
    pub password: String,
}

/// Reset token request
#[derive(Debug, Clone, Deserialize)]
pub struct ResetTokenRequest {
    pub email: String,
}

/// Password update request
#[derive(Debug, Clone, Deserialize)]
pub struct UpdatePasswordRequest {
    pub email: String,
    pub reset_token: String,
    pub new_password: String,
}

// ============================================================================
// Responses
// ============================================================================

/// Acknowledgement carrying the affected email
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct MessageResponse {
    pub email: String,
    pub message: String,
}

impl MessageResponse {
    pub fn new(email: impl Into<String>, message: impl Into<String>) -> Self {
        Self {
            email: email.into(),
            message: message.into(),
        }
    }
}

/// Profile of the session owner
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ProfileResponse {
    pub email: String,
}

/// Freshly issued reset token
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ResetTokenResponse {
    pub email: String,
    pub reset_token: String,
}
