//! HTTP Handlers

use axum::extract::{Extension, State};
use axum::http::{StatusCode, header};
use axum::response::IntoResponse;
use axum::Json;

use crate::application::AuthCore;
use crate::domain::repository::UserRepository;
use crate::domain::value_object::email::Email;
use crate::error::{AuthError, AuthResult};
use crate::presentation::dto::{
    CredentialsRequest, MessageResponse, ProfileResponse, ResetTokenRequest, ResetTokenResponse,
    UpdatePasswordRequest,
};
use crate::presentation::middleware::CurrentUser;

/// Shared state for auth handlers
pub struct AuthAppState<R>
where
    R: UserRepository + Send + Sync + 'static,
{
    pub core: AuthCore<R>,
}

impl<R> Clone for AuthAppState<R>
where
    R: UserRepository + Send + Sync + 'static,
{
    fn clone(&self) -> Self {
        Self {
            core: self.core.clone(),
        }
    }
}

/// Email as stored (trimmed, lower-cased); input that does not parse is
/// echoed unchanged
fn normalized_email(raw: String) -> String {
    Email::new(&raw).map(|email| email.to_string()).unwrap_or(raw)
}

// ============================================================================
// Registration
// ============================================================================

/// POST /users
pub async fn register<R>(
    State(state): State<AuthAppState<R>>,
    Json(req): Json<CredentialsRequest>,
) -> AuthResult<impl IntoResponse>
where
    R: UserRepository + Send + Sync + 'static,
{
    let user = state.core.register_user(&req.email, &req.password).await?;

    Ok((
        StatusCode::CREATED,
        Json(MessageResponse::new(user.email.as_str(), "user created")),
    ))
}

// ============================================================================
// Sessions
// ============================================================================

/// POST /sessions
pub async fn login<R>(
    State(state): State<AuthAppState<R>>,
    Json(req): Json<CredentialsRequest>,
) -> AuthResult<impl IntoResponse>
where
    R: UserRepository + Send + Sync + 'static,
{
    if !state.core.valid_login(&req.email, &req.password).await {
        return Err(AuthError::InvalidCredentials);
    }

    // The account can vanish between the check and here; treat it as a
    // failed login rather than a server fault.
    let token = state
        .core
        .create_session(&req.email)
        .await?
        .ok_or(AuthError::InvalidCredentials)?;

    let cookie = state
        .core
        .config()
        .session_cookie()
        .set_header(token.as_str())
        .ok_or_else(|| AuthError::Internal("Session token is not a valid header value".into()))?;

    Ok((
        StatusCode::OK,
        [(header::SET_COOKIE, cookie)],
        Json(MessageResponse::new(normalized_email(req.email), "logged in")),
    ))
}

/// DELETE /sessions
pub async fn logout<R>(
    State(state): State<AuthAppState<R>>,
    Extension(current): Extension<CurrentUser>,
) -> AuthResult<impl IntoResponse>
where
    R: UserRepository + Send + Sync + 'static,
{
    state.core.destroy_session(&current.user_id).await?;

    let cookie = state.core.config().session_cookie().clear();

    Ok((StatusCode::NO_CONTENT, [(header::SET_COOKIE, cookie)]))
}

/// GET /profile
pub async fn profile(Extension(current): Extension<CurrentUser>) -> Json<ProfileResponse> {
    Json(ProfileResponse {
        email: current.email.to_string(),
    })
}

// ============================================================================
// Password Reset
// ============================================================================

/// POST /reset_password
pub async fn get_reset_password_token<R>(
    State(state): State<AuthAppState<R>>,
    Json(req): Json<ResetTokenRequest>,
) -> AuthResult<Json<ResetTokenResponse>>
where
    R: UserRepository + Send + Sync + 'static,
{
    let token = state.core.get_reset_password_token(&req.email).await?;

    Ok(Json(ResetTokenResponse {
        email: normalized_email(req.email),
        reset_token: token.into_string(),
    }))
}

/// PUT /reset_password
pub async fn update_password<R>(
    State(state): State<AuthAppState<R>>,
    Json(req): Json<UpdatePasswordRequest>,
) -> AuthResult<Json<MessageResponse>>
where
    R: UserRepository + Send + Sync + 'static,
{
    state
        .core
        .update_password(&req.reset_token, &req.new_password)
        .await?;

    Ok(Json(MessageResponse::new(
        normalized_email(req.email),
        "Password updated",
    )))
}
