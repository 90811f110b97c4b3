//! Password Reset
//!
//! Issuing a reset token and redeeming it for a new password. The token is
//! one-shot: redeeming it clears it in the same update that stores the new
//! hash.

use crate::application::auth_core::AuthCore;
use crate::domain::entity::user::UserUpdate;
use crate::domain::repository::UserRepository;
use crate::domain::value_object::{email::Email, token::ResetToken};
use crate::error::{AuthError, AuthResult};

impl<R> AuthCore<R>
where
    R: UserRepository,
{
    /// Issue a reset token for `email`, replacing any pending one
    ///
    /// Fails with `UserNotFound` when there is no such account.
    pub async fn get_reset_password_token(&self, email: &str) -> AuthResult<ResetToken> {
        let email = Email::new(email).map_err(|_| AuthError::UserNotFound)?;

        let user = self
            .repo
            .find_by_email(&email)
            .await?
            .ok_or(AuthError::UserNotFound)?;

        let token: ResetToken = self.new_token();
        self.repo
            .update(
                &user.user_id,
                UserUpdate::new().reset_token(Some(token.clone())),
            )
            .await?;

        tracing::info!(user_id = %user.user_id, "Reset token issued");

        Ok(token)
    }

    /// Redeem `reset_token` for `new_password`
    ///
    /// Fails with `InvalidResetToken` when the token is unknown or already
    /// used, including when a concurrent call redeemed or replaced it while
    /// the new hash was being computed. The session token, if any, is left
    /// as it is.
    pub async fn update_password(&self, reset_token: &str, new_password: &str) -> AuthResult<()> {
        if reset_token.is_empty() {
            return Err(AuthError::InvalidResetToken);
        }

        let token = ResetToken::from_string(reset_token);

        // Cheap rejection before paying for a hash
        let Some(user) = self.repo.find_by_reset_token(&token).await? else {
            return Err(AuthError::InvalidResetToken);
        };

        let password_hash = self.hash_password(new_password).await?;

        if !self.repo.redeem_reset_token(&token, &password_hash).await? {
            tracing::warn!(user_id = %user.user_id, "Reset token consumed concurrently");
            return Err(AuthError::InvalidResetToken);
        }

        tracing::info!(user_id = %user.user_id, "Password updated");

        Ok(())
    }
}
