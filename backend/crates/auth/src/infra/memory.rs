//! In-Memory Repository
//!
//! Process-local store for development and tests. Records and their
//! lookup indexes sit behind one `RwLock`, so every update (and the index
//! maintenance it implies) is a single critical section.

use std::collections::HashMap;
use std::sync::Arc;

use tokio::sync::RwLock;

use crate::domain::entity::user::{User, UserUpdate};
use crate::domain::repository::UserRepository;
use crate::domain::value_object::{
    email::Email,
    token::{ResetToken, SessionToken},
    user_id::UserId,
    user_password::UserPassword,
};
use crate::error::{AuthError, AuthResult};

#[derive(Default)]
struct Tables {
    users: HashMap<UserId, User>,
    by_email: HashMap<Email, UserId>,
    by_session: HashMap<String, UserId>,
    by_reset: HashMap<String, UserId>,
}

impl Tables {
    fn lookup(&self, index: &HashMap<String, UserId>, key: &str) -> Option<User> {
        index.get(key).and_then(|id| self.users.get(id)).cloned()
    }
}

/// A token owned by another record is refused before anything changes
fn check_token_free(
    index: &HashMap<String, UserId>,
    user_id: &UserId,
    new: Option<&str>,
) -> AuthResult<()> {
    match new.and_then(|t| index.get(t)) {
        Some(owner) if owner != user_id => {
            Err(AuthError::Internal("token already assigned".to_string()))
        }
        _ => Ok(()),
    }
}

/// Re-point a token index entry from `old` to `new` for `user_id`
fn reindex(
    index: &mut HashMap<String, UserId>,
    user_id: UserId,
    old: Option<&str>,
    new: Option<&str>,
) {
    if let Some(old) = old {
        index.remove(old);
    }
    if let Some(new) = new {
        index.insert(new.to_owned(), user_id);
    }
}

/// `HashMap`-backed user store
#[derive(Clone, Default)]
pub struct InMemoryUserRepository {
    inner: Arc<RwLock<Tables>>,
}

impl InMemoryUserRepository {
    pub fn new() -> Self {
        Self::default()
    }

    /// Number of stored records
    pub async fn len(&self) -> usize {
        self.inner.read().await.users.len()
    }

    pub async fn is_empty(&self) -> bool {
        self.len().await == 0
    }
}

impl UserRepository for InMemoryUserRepository {
    async fn create(&self, email: &Email, password_hash: &UserPassword) -> AuthResult<User> {
        let mut tables = self.inner.write().await;

        if tables.by_email.contains_key(email) {
            return Err(AuthError::AlreadyExists);
        }

        let user = User::new(email.clone(), password_hash.clone());
        tables.by_email.insert(user.email.clone(), user.user_id);
        tables.users.insert(user.user_id, user.clone());

        Ok(user)
    }

    async fn find_by_email(&self, email: &Email) -> AuthResult<Option<User>> {
        let tables = self.inner.read().await;
        Ok(tables
            .by_email
            .get(email)
            .and_then(|id| tables.users.get(id))
            .cloned())
    }

    async fn find_by_id(&self, user_id: &UserId) -> AuthResult<Option<User>> {
        Ok(self.inner.read().await.users.get(user_id).cloned())
    }

    async fn find_by_session_token(&self, token: &SessionToken) -> AuthResult<Option<User>> {
        if token.is_empty() {
            return Ok(None);
        }
        let tables = self.inner.read().await;
        Ok(tables.lookup(&tables.by_session, token.as_str()))
    }

    async fn find_by_reset_token(&self, token: &ResetToken) -> AuthResult<Option<User>> {
        if token.is_empty() {
            return Ok(None);
        }
        let tables = self.inner.read().await;
        Ok(tables.lookup(&tables.by_reset, token.as_str()))
    }

    async fn update(&self, user_id: &UserId, update: UserUpdate) -> AuthResult<()> {
        let mut guard = self.inner.write().await;
        let tables = &mut *guard;

        let Some(user) = tables.users.get_mut(user_id) else {
            return Err(AuthError::UserNotFound);
        };

        let new_session = update
            .session_token
            .as_ref()
            .map(|t| t.as_ref().map(|t| t.as_str().to_owned()));
        let new_reset = update
            .reset_token
            .as_ref()
            .map(|t| t.as_ref().map(|t| t.as_str().to_owned()));

        if let Some(new) = &new_session {
            check_token_free(&tables.by_session, user_id, new.as_deref())?;
        }
        if let Some(new) = &new_reset {
            check_token_free(&tables.by_reset, user_id, new.as_deref())?;
        }

        let old_session = user.session_token.as_ref().map(|t| t.as_str().to_owned());
        let old_reset = user.reset_token.as_ref().map(|t| t.as_str().to_owned());

        user.apply(update);

        if let Some(new) = new_session {
            reindex(
                &mut tables.by_session,
                *user_id,
                old_session.as_deref(),
                new.as_deref(),
            );
        }
        if let Some(new) = new_reset {
            reindex(
                &mut tables.by_reset,
                *user_id,
                old_reset.as_deref(),
                new.as_deref(),
            );
        }

        Ok(())
    }

    async fn redeem_reset_token(
        &self,
        token: &ResetToken,
        password_hash: &UserPassword,
    ) -> AuthResult<bool> {
        if token.is_empty() {
            return Ok(false);
        }

        let mut guard = self.inner.write().await;
        let tables = &mut *guard;

        let Some(user_id) = tables.by_reset.remove(token.as_str()) else {
            return Ok(false);
        };
        let Some(user) = tables.users.get_mut(&user_id) else {
            return Ok(false);
        };

        user.apply(
            UserUpdate::new()
                .password_hash(password_hash.clone())
                .reset_token(None),
        );

        Ok(true)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn email(s: &str) -> Email {
        Email::new(s).unwrap()
    }

    fn hash() -> UserPassword {
        UserPassword::from_db("$argon2id$v=19$m=8,t=1,p=1$c2FsdHNhbHQ$aGFzaA")
    }

    #[tokio::test]
    async fn test_create_rejects_duplicate_email() {
        let repo = InMemoryUserRepository::new();
        repo.create(&email("a@x.io"), &hash()).await.unwrap();
        let err = repo.create(&email("A@X.io"), &hash()).await.unwrap_err();
        assert!(matches!(err, AuthError::AlreadyExists));
        assert_eq!(repo.len().await, 1);
    }

    #[tokio::test]
    async fn test_session_index_follows_updates() {
        let repo = InMemoryUserRepository::new();
        let user = repo.create(&email("a@x.io"), &hash()).await.unwrap();

        let first = SessionToken::from_string("first");
        repo.update(&user.user_id, UserUpdate::new().session_token(Some(first.clone())))
            .await
            .unwrap();
        assert!(repo.find_by_session_token(&first).await.unwrap().is_some());

        let second = SessionToken::from_string("second");
        repo.update(&user.user_id, UserUpdate::new().session_token(Some(second.clone())))
            .await
            .unwrap();
        assert!(repo.find_by_session_token(&first).await.unwrap().is_none());
        assert!(repo.find_by_session_token(&second).await.unwrap().is_some());

        repo.update(&user.user_id, UserUpdate::new().session_token(None))
            .await
            .unwrap();
        assert!(repo.find_by_session_token(&second).await.unwrap().is_none());
    }

    #[tokio::test]
    async fn test_session_and_reset_indexes_are_independent() {
        let repo = InMemoryUserRepository::new();
        let user = repo.create(&email("a@x.io"), &hash()).await.unwrap();

        let session = SessionToken::from_string("same-value");
        let reset = ResetToken::from_string("same-value");
        repo.update(
            &user.user_id,
            UserUpdate::new()
                .session_token(Some(session.clone()))
                .reset_token(Some(reset.clone())),
        )
        .await
        .unwrap();

        repo.update(&user.user_id, UserUpdate::new().reset_token(None))
            .await
            .unwrap();
        assert!(repo.find_by_reset_token(&reset).await.unwrap().is_none());
        assert!(repo.find_by_session_token(&session).await.unwrap().is_some());
    }

    #[tokio::test]
    async fn test_token_of_other_user_is_refused() {
        let repo = InMemoryUserRepository::new();
        let a = repo.create(&email("a@x.io"), &hash()).await.unwrap();
        let b = repo.create(&email("b@x.io"), &hash()).await.unwrap();

        let token = SessionToken::from_string("shared");
        repo.update(&a.user_id, UserUpdate::new().session_token(Some(token.clone())))
            .await
            .unwrap();
        let err = repo
            .update(&b.user_id, UserUpdate::new().session_token(Some(token.clone())))
            .await
            .unwrap_err();
        assert!(matches!(err, AuthError::Internal(_)));

        let owner = repo.find_by_session_token(&token).await.unwrap().unwrap();
        assert_eq!(owner.user_id, a.user_id);
    }

    #[tokio::test]
    async fn test_update_unknown_id() {
        let repo = InMemoryUserRepository::new();
        let err = repo
            .update(&UserId::new(), UserUpdate::new().session_token(None))
            .await
            .unwrap_err();
        assert!(matches!(err, AuthError::UserNotFound));
    }

    #[tokio::test]
    async fn test_empty_token_never_matches() {
        let repo = InMemoryUserRepository::new();
        repo.create(&email("a@x.io"), &hash()).await.unwrap();
        assert!(
            repo.find_by_session_token(&SessionToken::from_string(""))
                .await
                .unwrap()
                .is_none()
        );
    }

    #[tokio::test]
    async fn test_redeem_reset_token_is_one_shot() {
        let repo = InMemoryUserRepository::new();
        let user = repo.create(&email("a@x.io"), &hash()).await.unwrap();

        let reset = ResetToken::from_string("reset-1");
        repo.update(&user.user_id, UserUpdate::new().reset_token(Some(reset.clone())))
            .await
            .unwrap();

        let new_hash = UserPassword::from_db("$argon2id$new");
        assert!(repo.redeem_reset_token(&reset, &new_hash).await.unwrap());
        assert!(!repo.redeem_reset_token(&reset, &hash()).await.unwrap());

        let stored = repo.find_by_id(&user.user_id).await.unwrap().unwrap();
        assert!(stored.reset_token.is_none());
        assert_eq!(stored.password_hash, new_hash);
        assert!(repo.find_by_reset_token(&reset).await.unwrap().is_none());
    }

    #[tokio::test]
    async fn test_redeem_stale_token_keeps_newer_one() {
        let repo = InMemoryUserRepository::new();
        let user = repo.create(&email("a@x.io"), &hash()).await.unwrap();

        let old = ResetToken::from_string("old");
        let newer = ResetToken::from_string("newer");
        repo.update(&user.user_id, UserUpdate::new().reset_token(Some(old.clone())))
            .await
            .unwrap();
        repo.update(&user.user_id, UserUpdate::new().reset_token(Some(newer.clone())))
            .await
            .unwrap();

        assert!(!repo.redeem_reset_token(&old, &hash()).await.unwrap());
        let stored = repo.find_by_reset_token(&newer).await.unwrap().unwrap();
        assert_eq!(stored.user_id, user.user_id);
    }
}
