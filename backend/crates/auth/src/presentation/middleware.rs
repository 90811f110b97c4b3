//! Auth Middleware
//!
//! Middleware for requiring a session on protected routes.

use axum::extract::{Request, State};
use axum::middleware::Next;
use axum::response::Response;
use platform::cookie::extract_cookie;

use crate::domain::repository::UserRepository;
use crate::domain::value_object::{email::Email, user_id::UserId};
use crate::error::AuthError;
use crate::presentation::handlers::AuthAppState;

/// Owner of the request's session, stored in request extensions
#[derive(Debug, Clone)]
pub struct CurrentUser {
    pub user_id: UserId,
    pub email: Email,
}

/// Middleware that requires a valid session cookie
///
/// Rejects with `SessionRequired` (403) when the cookie is missing or
/// resolves to no user.
pub async fn require_session<R>(
    State(state): State<AuthAppState<R>>,
    mut req: Request,
    next: Next,
) -> Result<Response, AuthError>
where
    R: UserRepository + Send + Sync + 'static,
{
    let cookie_name = &state.core.config().session_cookie_name;
    let Some(token) = extract_cookie(req.headers(), cookie_name) else {
        return Err(AuthError::SessionRequired);
    };

    let Some(user) = state.core.get_user_from_session_id(&token).await else {
        return Err(AuthError::SessionRequired);
    };

    req.extensions_mut().insert(CurrentUser {
        user_id: user.user_id,
        email: user.email,
    });

    Ok(next.run(req).await)
}
