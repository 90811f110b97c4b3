//! User Entity
//!
//! One account: identity plus credential state.

use chrono::{DateTime, Utc};

use crate::domain::value_object::{
    email::Email,
    token::{ResetToken, SessionToken},
    user_id::UserId,
    user_password::UserPassword,
};

/// User record
///
/// `user_id` and `email` never change after creation. The two tokens are
/// independent: setting or clearing one never touches the other.
#[derive(Debug, Clone)]
pub struct User {
    pub user_id: UserId,
    pub email: Email,
    pub password_hash: UserPassword,
    /// Present iff the user has an active session
    pub session_token: Option<SessionToken>,
    /// Present iff a password reset is pending
    pub reset_token: Option<ResetToken>,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

impl User {
    /// Fresh account: no session, no pending reset
    pub fn new(email: Email, password_hash: UserPassword) -> Self {
        let now = Utc::now();
        Self {
            user_id: UserId::new(),
            email,
            password_hash,
            session_token: None,
            reset_token: None,
            created_at: now,
            updated_at: now,
        }
    }

    pub fn has_session(&self) -> bool {
        self.session_token.is_some()
    }

    pub fn has_pending_reset(&self) -> bool {
        self.reset_token.is_some()
    }

    /// Apply a partial update in place
    ///
    /// Only the fields named in `update` change. An empty update is a no-op
    /// and leaves `updated_at` alone.
    pub fn apply(&mut self, update: UserUpdate) {
        if update.is_empty() {
            return;
        }
        if let Some(hash) = update.password_hash {
            self.password_hash = hash;
        }
        if let Some(token) = update.session_token {
            self.session_token = token;
        }
        if let Some(token) = update.reset_token {
            self.reset_token = token;
        }
        self.updated_at = Utc::now();
    }
}

/// Partial update of a [`User`]
///
/// The outer `Option` says whether a field is touched; for the tokens the
/// inner `Option` is the new value (`None` clears it).
#[derive(Debug, Clone, Default)]
pub struct UserUpdate {
    pub password_hash: Option<UserPassword>,
    pub session_token: Option<Option<SessionToken>>,
    pub reset_token: Option<Option<ResetToken>>,
}

impl UserUpdate {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn password_hash(mut self, hash: UserPassword) -> Self {
        self.password_hash = Some(hash);
        self
    }

    pub fn session_token(mut self, token: Option<SessionToken>) -> Self {
        self.session_token = Some(token);
        self
    }

    pub fn reset_token(mut self, token: Option<ResetToken>) -> Self {
        self.reset_token = Some(token);
        self
    }

    pub fn is_empty(&self) -> bool {
        self.password_hash.is_none() && self.session_token.is_none() && self.reset_token.is_none()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn user() -> User {
        User::new(
            Email::new("a@x.com").unwrap(),
            UserPassword::from_db("$argon2id$old"),
        )
    }

    #[test]
    fn test_new_user_has_no_tokens() {
        let user = user();
        assert!(!user.has_session());
        assert!(!user.has_pending_reset());
        assert_eq!(user.created_at, user.updated_at);
    }

    #[test]
    fn test_apply_touches_only_named_fields() {
        let mut user = user();
        user.reset_token = Some(ResetToken::from_string("r1"));

        user.apply(UserUpdate::new().session_token(Some(SessionToken::from_string("s1"))));

        assert_eq!(user.session_token, Some(SessionToken::from_string("s1")));
        assert_eq!(user.reset_token, Some(ResetToken::from_string("r1")));
        assert_eq!(user.password_hash.as_phc_string(), "$argon2id$old");
    }

    #[test]
    fn test_apply_password_and_clear_reset_together() {
        let mut user = user();
        user.reset_token = Some(ResetToken::from_string("r1"));
        user.session_token = Some(SessionToken::from_string("s1"));

        user.apply(
            UserUpdate::new()
                .password_hash(UserPassword::from_db("$argon2id$new"))
                .reset_token(None),
        );

        assert_eq!(user.password_hash.as_phc_string(), "$argon2id$new");
        assert!(user.reset_token.is_none());
        assert!(user.has_session());
    }

    #[test]
    fn test_empty_update() {
        let mut user = user();
        let before = user.updated_at;
        assert!(UserUpdate::new().is_empty());
        user.apply(UserUpdate::new());
        assert_eq!(user.updated_at, before);
    }
}
