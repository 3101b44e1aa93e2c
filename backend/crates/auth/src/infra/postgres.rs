//! PostgreSQL Credential Store

use chrono::{DateTime, Utc};
use platform::retry::RetryPolicy;
use sqlx::PgPool;

use crate::domain::entity::user::{NewUser, User};
use crate::domain::repository::UserRepository;
use crate::domain::value_object::{
    balance::Balance, email::Email, user_id::UserId, user_name::UserName,
    user_password::UserPassword, user_role::UserRole,
};
use crate::error::{AuthError, AuthResult};

/// Unique constraint names from the `users` migration
const EMAIL_UNIQUE_CONSTRAINT: &str = "users_email_key";
const USERNAME_UNIQUE_CONSTRAINT: &str = "users_username_key";

/// PostgreSQL-backed user repository
#[derive(Clone)]
pub struct PgUserRepository {
    pool: PgPool,
    policy: RetryPolicy,
}

impl PgUserRepository {
    pub fn new(pool: PgPool, policy: RetryPolicy) -> Self {
        Self { pool, policy }
    }
}

// ============================================================================
// User Repository Implementation
// ============================================================================

impl UserRepository for PgUserRepository {
    async fn create(&self, user: &NewUser) -> AuthResult<UserId> {
        let pool = &self.pool;

        // Single statement: either the whole row lands or nothing does.
        // Uniqueness is decided by the constraints, so two concurrent
        // registrations cannot both pass.
        let id = self
            .policy
            .run("user.create", || async move {
                sqlx::query_scalar::<_, i64>(
                    r#"
                    INSERT INTO users (
                        username,
                        email,
                        password_hash,
                        description,
                        role
                    ) VALUES ($1, $2, $3, $4, $5)
                    RETURNING id
                    "#,
                )
                .bind(user.user_name.as_str())
                .bind(user.email.as_str())
                .bind(user.password.as_phc_string())
                .bind(user.description.as_str())
                .bind(user.user_role.id())
                .fetch_one(pool)
                .await
                .map_err(map_insert_error)
            })
            .await?;

        Ok(UserId::from_i64(id))
    }

    async fn get_by_id(&self, user_id: UserId) -> AuthResult<User> {
        let pool = &self.pool;
        let row = self
            .policy
            .run("user.get_by_id", || async move {
                sqlx::query_as::<_, UserRow>(
                    r#"
                    SELECT
                        id,
                        username,
                        email,
                        password_hash,
                        description,
                        balance_minor,
                        role,
                        created_at
                    FROM users
                    WHERE id = $1
                    "#,
                )
                .bind(user_id.as_i64())
                .fetch_optional(pool)
                .await
                .map_err(AuthError::db("user.get_by_id"))
            })
            .await?;

        row.ok_or(AuthError::UserNotFound)?.into_user()
    }

    async fn get_by_email(&self, email: &Email) -> AuthResult<User> {
        let pool = &self.pool;
        let row = self
            .policy
            .run("user.get_by_email", || async move {
                sqlx::query_as::<_, UserRow>(
                    r#"
                    SELECT
                        id,
                        username,
                        email,
                        password_hash,
                        description,
                        balance_minor,
                        role,
                        created_at
                    FROM users
                    WHERE email = $1
                    "#,
                )
                .bind(email.as_str())
                .fetch_optional(pool)
                .await
                .map_err(AuthError::db("user.get_by_email"))
            })
            .await?;

        row.ok_or(AuthError::UserNotFound)?.into_user()
    }

    async fn get_by_user_name(&self, user_name: &UserName) -> AuthResult<User> {
        let pool = &self.pool;
        let row = self
            .policy
            .run("user.get_by_user_name", || async move {
                sqlx::query_as::<_, UserRow>(
                    r#"
                    SELECT
                        id,
                        username,
                        email,
                        password_hash,
                        description,
                        balance_minor,
                        role,
                        created_at
                    FROM users
                    WHERE username = $1
                    "#,
                )
                .bind(user_name.as_str())
                .fetch_optional(pool)
                .await
                .map_err(AuthError::db("user.get_by_user_name"))
            })
            .await?;

        row.ok_or(AuthError::UserNotFound)?.into_user()
    }

    async fn exists_by_email(&self, email: &Email) -> AuthResult<bool> {
        let pool = &self.pool;
        self.policy
            .run("user.exists_by_email", || async move {
                sqlx::query_scalar::<_, bool>("SELECT EXISTS(SELECT 1 FROM users WHERE email = $1)")
                    .bind(email.as_str())
                    .fetch_one(pool)
                    .await
                    .map_err(AuthError::db("user.exists_by_email"))
            })
            .await
    }

    async fn exists_by_user_name(&self, user_name: &UserName) -> AuthResult<bool> {
        let pool = &self.pool;
        self.policy
            .run("user.exists_by_user_name", || async move {
                sqlx::query_scalar::<_, bool>(
                    "SELECT EXISTS(SELECT 1 FROM users WHERE username = $1)",
                )
                .bind(user_name.as_str())
                .fetch_one(pool)
                .await
                .map_err(AuthError::db("user.exists_by_user_name"))
            })
            .await
    }
}

/// Unique violations become domain errors; everything else stays a store error
fn map_insert_error(err: sqlx::Error) -> AuthError {
    if let sqlx::Error::Database(db_err) = &err {
        if db_err.is_unique_violation() {
            match db_err.constraint() {
                Some(EMAIL_UNIQUE_CONSTRAINT) => return AuthError::EmailTaken,
                Some(USERNAME_UNIQUE_CONSTRAINT) => return AuthError::UserNameTaken,
                _ => {}
            }
        }
    }
    AuthError::db("user.create")(err)
}

// ============================================================================
// Row Types
// ============================================================================

#[derive(sqlx::FromRow)]
struct UserRow {
    id: i64,
    username: String,
    email: String,
    password_hash: String,
    description: String,
    balance_minor: i64,
    role: i16,
    created_at: DateTime<Utc>,
}

impl UserRow {
    fn into_user(self) -> AuthResult<User> {
        let user_role = UserRole::from_id(self.role).ok_or_else(|| {
            AuthError::Internal(format!("Invalid role id {} for user {}", self.role, self.id))
        })?;
        let balance = Balance::from_minor(self.balance_minor)
            .map_err(|_| AuthError::Internal(format!("Negative balance for user {}", self.id)))?;

        Ok(User {
            user_id: UserId::from_i64(self.id),
            user_name: UserName::from_db(self.username),
            email: Email::from_db(self.email),
            password: UserPassword::from_db(self.password_hash)?,
            description: self.description,
            balance,
            user_role,
            created_at: self.created_at,
        })
    }
}
