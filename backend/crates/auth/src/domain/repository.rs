//! Repository Traits
//!
//! The user-record store. Implementations live in the infra layer; the
//! store holds records, policy lives in the application layer.

use crate::domain::entity::user::{User, UserUpdate};
use crate::domain::value_object::{
    email::Email,
    token::{ResetToken, SessionToken},
    user_id::UserId,
    user_password::UserPassword,
};
use crate::error::AuthResult;

/// User record store
///
/// Lookups return `Ok(None)` when nothing matches; `Err` is reserved for
/// store faults. Every lookup key is unique, so a lookup never sees more
/// than one record.
#[trait_variant::make(UserRepository: Send)]
pub trait LocalUserRepository {
    /// Insert a new record and assign its ID
    ///
    /// Fails with `AuthError::AlreadyExists` if the email is taken.
    async fn create(&self, email: &Email, password_hash: &UserPassword) -> AuthResult<User>;

    async fn find_by_email(&self, email: &Email) -> AuthResult<Option<User>>;

    async fn find_by_id(&self, user_id: &UserId) -> AuthResult<Option<User>>;

    async fn find_by_session_token(&self, token: &SessionToken) -> AuthResult<Option<User>>;

    async fn find_by_reset_token(&self, token: &ResetToken) -> AuthResult<Option<User>>;

    /// Apply `update` to one record as a single atomic step
    ///
    /// Fails with `AuthError::UserNotFound` if the ID does not exist.
    async fn update(&self, user_id: &UserId, update: UserUpdate) -> AuthResult<()>;

    /// Swap in `password_hash` and clear the reset token, but only while
    /// `token` is still the record's pending reset token
    ///
    /// Check and write are one atomic step. `Ok(false)` when no record
    /// holds `token` at that moment.
    async fn redeem_reset_token(
        &self,
        token: &ResetToken,
        password_hash: &UserPassword,
    ) -> AuthResult<bool>;
}
