//! PostgreSQL Repository Implementation

use chrono::{DateTime, Utc};
use sqlx::PgPool;
use uuid::Uuid;

use crate::domain::entity::user::{User, UserUpdate};
use crate::domain::repository::UserRepository;
use crate::domain::value_object::{
    email::Email,
    token::{ResetToken, SessionToken},
    user_id::UserId,
    user_password::UserPassword,
};
use crate::error::{AuthError, AuthResult};

const SELECT_USER: &str = r#"
    SELECT
        user_id,
        email,
        password_hash,
        session_token,
        reset_token,
        created_at,
        updated_at
    FROM users
"#;

/// PostgreSQL-backed user store
#[derive(Clone)]
pub struct PgUserRepository {
    pool: PgPool,
}

impl PgUserRepository {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }

    async fn find_one(&self, column: &str, value: &str) -> AuthResult<Option<User>> {
        let sql = format!("{SELECT_USER} WHERE {column} = $1");
        let row = sqlx::query_as::<_, UserRow>(&sql)
            .bind(value)
            .fetch_optional(&self.pool)
            .await?;

        Ok(row.map(UserRow::into_user))
    }
}

impl UserRepository for PgUserRepository {
    async fn create(&self, email: &Email, password_hash: &UserPassword) -> AuthResult<User> {
        let user = User::new(email.clone(), password_hash.clone());

        let result = sqlx::query(
            r#"
            INSERT INTO users (
                user_id,
                email,
                password_hash,
                created_at,
                updated_at
            ) VALUES ($1, $2, $3, $4, $5)
            "#,
        )
        .bind(user.user_id.as_uuid())
        .bind(user.email.as_str())
        .bind(user.password_hash.as_phc_string())
        .bind(user.created_at)
        .bind(user.updated_at)
        .execute(&self.pool)
        .await;

        match result {
            Ok(_) => Ok(user),
            Err(sqlx::Error::Database(e)) if e.is_unique_violation() => {
                Err(AuthError::AlreadyExists)
            }
            Err(e) => Err(e.into()),
        }
    }

    async fn find_by_email(&self, email: &Email) -> AuthResult<Option<User>> {
        self.find_one("email", email.as_str()).await
    }

    async fn find_by_id(&self, user_id: &UserId) -> AuthResult<Option<User>> {
        let sql = format!("{SELECT_USER} WHERE user_id = $1");
        let row = sqlx::query_as::<_, UserRow>(&sql)
            .bind(user_id.as_uuid())
            .fetch_optional(&self.pool)
            .await?;

        Ok(row.map(UserRow::into_user))
    }

    async fn find_by_session_token(&self, token: &SessionToken) -> AuthResult<Option<User>> {
        if token.is_empty() {
            return Ok(None);
        }
        self.find_one("session_token", token.as_str()).await
    }

    async fn find_by_reset_token(&self, token: &ResetToken) -> AuthResult<Option<User>> {
        if token.is_empty() {
            return Ok(None);
        }
        self.find_one("reset_token", token.as_str()).await
    }

    async fn update(&self, user_id: &UserId, update: UserUpdate) -> AuthResult<()> {
        if update.is_empty() {
            return match self.find_by_id(user_id).await? {
                Some(_) => Ok(()),
                None => Err(AuthError::UserNotFound),
            };
        }

        let set_password = update.password_hash.is_some();
        let password_hash = update
            .password_hash
            .as_ref()
            .map(|h| h.as_phc_string().to_owned());

        let set_session = update.session_token.is_some();
        let session_token = update
            .session_token
            .flatten()
            .map(SessionToken::into_string);

        let set_reset = update.reset_token.is_some();
        let reset_token = update.reset_token.flatten().map(ResetToken::into_string);

        let affected = sqlx::query(
            r#"
            UPDATE users SET
                password_hash = CASE WHEN $2 THEN $3 ELSE password_hash END,
                session_token = CASE WHEN $4 THEN $5 ELSE session_token END,
                reset_token = CASE WHEN $6 THEN $7 ELSE reset_token END,
                updated_at = $8
            WHERE user_id = $1
            "#,
        )
        .bind(user_id.as_uuid())
        .bind(set_password)
        .bind(password_hash)
        .bind(set_session)
        .bind(session_token)
        .bind(set_reset)
        .bind(reset_token)
        .bind(Utc::now())
        .execute(&self.pool)
        .await?
        .rows_affected();

        if affected == 0 {
            return Err(AuthError::UserNotFound);
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

        // Token check and write in one statement
        let affected = sqlx::query(
            r#"
            UPDATE users SET
                password_hash = $2,
                reset_token = NULL,
                updated_at = $3
            WHERE reset_token = $1
            "#,
        )
        .bind(token.as_str())
        .bind(password_hash.as_phc_string())
        .bind(Utc::now())
        .execute(&self.pool)
        .await?
        .rows_affected();

        Ok(affected == 1)
    }
}

// ============================================================================
// Row Types
// ============================================================================

#[derive(sqlx::FromRow)]
struct UserRow {
    user_id: Uuid,
    email: String,
    password_hash: String,
    session_token: Option<String>,
    reset_token: Option<String>,
    created_at: DateTime<Utc>,
    updated_at: DateTime<Utc>,
}

impl UserRow {
    /// Stored values are trusted as written; a corrupt hash simply never
    /// verifies.
    fn into_user(self) -> User {
        User {
            user_id: UserId::from_uuid(self.user_id),
            email: Email::from_db(self.email),
            password_hash: UserPassword::from_db(self.password_hash),
            session_token: self.session_token.map(SessionToken::from_string),
            reset_token: self.reset_token.map(ResetToken::from_string),
            created_at: self.created_at,
            updated_at: self.updated_at,
        }
    }
}
