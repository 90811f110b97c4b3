//! Session Lifecycle
//!
//! A session is one random token stored on the user record. Creating a
//! session replaces any previous token, so a user has at most one.

use crate::application::auth_core::AuthCore;
use crate::domain::entity::user::{User, UserUpdate};
use crate::domain::repository::UserRepository;
use crate::domain::value_object::{email::Email, token::SessionToken, user_id::UserId};
use crate::error::AuthResult;

impl<R> AuthCore<R>
where
    R: UserRepository,
{
    /// Start a session for `email`
    ///
    /// `Ok(None)` when there is no such account. Any earlier token of the
    /// same user stops resolving.
    pub async fn create_session(&self, email: &str) -> AuthResult<Option<SessionToken>> {
        let Ok(email) = Email::new(email) else {
            return Ok(None);
        };

        let Some(user) = self.repo.find_by_email(&email).await? else {
            return Ok(None);
        };

        let token: SessionToken = self.new_token();
        self.repo
            .update(
                &user.user_id,
                UserUpdate::new().session_token(Some(token.clone())),
            )
            .await?;

        tracing::info!(user_id = %user.user_id, "Session created");

        Ok(Some(token))
    }

    /// Resolve a session token to its user
    ///
    /// An empty token short-circuits without touching the store. Store
    /// faults are logged and reported as "no user".
    pub async fn get_user_from_session_id(&self, session_token: &str) -> Option<User> {
        if session_token.is_empty() {
            return None;
        }

        let token = SessionToken::from_string(session_token);
        match self.repo.find_by_session_token(&token).await {
            Ok(user) => user,
            Err(e) => {
                tracing::warn!(error = %e, "Session lookup failed");
                None
            }
        }
    }

    /// End the session of `user_id`; unknown IDs are a silent no-op
    pub async fn destroy_session(&self, user_id: &UserId) -> AuthResult<()> {
        let Some(user) = self.repo.find_by_id(user_id).await? else {
            tracing::debug!(user_id = %user_id, "No user to sign out");
            return Ok(());
        };

        self.repo
            .update(&user.user_id, UserUpdate::new().session_token(None))
            .await?;

        tracing::info!(user_id = %user.user_id, "Session destroyed");

        Ok(())
    }
}
