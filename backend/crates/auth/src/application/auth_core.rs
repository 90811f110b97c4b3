//! AuthCore
//!
//! The authentication policy object. It owns no state of its own: the
//! store is injected once at startup and every operation is a short
//! sequence of store lookups and at most one update.
//!
//! Operations are grouped by flow in sibling modules:
//! - `register` - `register_user`
//! - `login` - `valid_login`
//! - `session` - `create_session`, `get_user_from_session_id`, `destroy_session`
//! - `reset_password` - `get_reset_password_token`, `update_password`

use std::sync::Arc;

use crate::application::config::AuthConfig;
use crate::domain::repository::UserRepository;
use crate::domain::value_object::{
    token::Token,
    user_password::{RawPassword, UserPassword},
};
use crate::error::AuthResult;

pub struct AuthCore<R>
where
    R: UserRepository,
{
    pub(super) repo: Arc<R>,
    pub(super) config: Arc<AuthConfig>,
}

impl<R> Clone for AuthCore<R>
where
    R: UserRepository,
{
    fn clone(&self) -> Self {
        Self {
            repo: self.repo.clone(),
            config: self.config.clone(),
        }
    }
}

impl<R> AuthCore<R>
where
    R: UserRepository,
{
    pub fn new(repo: Arc<R>, config: Arc<AuthConfig>) -> Self {
        Self { repo, config }
    }

    pub fn config(&self) -> &AuthConfig {
        &self.config
    }

    /// Salted hash of `password` with the configured pepper and cost
    pub(super) async fn hash_password(&self, password: &str) -> AuthResult<UserPassword> {
        let raw = RawPassword::new(password.to_owned());
        Ok(UserPassword::hash(raw, self.config.pepper(), self.config.hash_cost).await?)
    }

    pub(super) fn new_token<K>(&self) -> Token<K> {
        Token::generate(self.config.token_bytes())
    }
}
