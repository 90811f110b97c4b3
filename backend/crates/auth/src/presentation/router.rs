//! Auth Router

use axum::{
    Router, middleware,
    routing::{delete, get, post},
};
use std::sync::Arc;

use crate::application::{AuthConfig, AuthCore};
use crate::domain::repository::UserRepository;
use crate::presentation::handlers::{self, AuthAppState};
use crate::presentation::middleware::require_session;

/// Create the Auth router for any repository implementation
///
/// `DELETE /sessions` and `GET /profile` sit behind [`require_session`].
pub fn auth_router<R>(repo: R, config: AuthConfig) -> Router
where
    R: UserRepository + Send + Sync + 'static,
{
    let state = AuthAppState {
        core: AuthCore::new(Arc::new(repo), Arc::new(config)),
    };

    let session_required = middleware::from_fn_with_state(state.clone(), require_session::<R>);

    Router::new()
        .route("/users", post(handlers::register::<R>))
        .route(
            "/sessions",
            post(handlers::login::<R>)
                .merge(delete(handlers::logout::<R>).route_layer(session_required.clone())),
        )
        .route(
            "/profile",
            get(handlers::profile).route_layer(session_required),
        )
        .route(
            "/reset_password",
            post(handlers::get_reset_password_token::<R>).put(handlers::update_password::<R>),
        )
        .with_state(state)
}
