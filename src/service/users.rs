//! `users` table: registration, credential lookup, contact updates, customer listing.

use crate::error::AppError;
use crate::models::{CustomerSummary, Role, User};
use sqlx::PgPool;

pub struct UserRepository;

/// Fields for a new account. `password` is already hashed.
pub struct NewUser<'a> {
    pub username: &'a str,
    pub email: &'a str,
    pub phone: &'a str,
    pub password: &'a str,
    pub role: Role,
}

impl UserRepository {
    pub async fn exists_by_username(pool: &PgPool, username: &str) -> Result<bool, AppError> {
        tracing::debug!(%username, "user exists?");
        let row: (bool,) = sqlx::query_as("SELECT EXISTS(SELECT 1 FROM users WHERE username = $1)")
            .bind(username)
            .fetch_one(pool)
            .await?;
        Ok(row.0)
    }

    /// Insert one user. A unique violation on username is reported as [`AppError::Conflict`],
    /// covering registrations that race past the `exists_by_username` pre-check.
    pub async fn create(pool: &PgPool, user: &NewUser<'_>, conflict_message: &str) -> Result<(), AppError> {
        tracing::debug!(username = %user.username, role = user.role.as_str(), "insert user");
        sqlx::query("INSERT INTO users (username, email, phone, password, role) VALUES ($1, $2, $3, $4, $5)")
            .bind(user.username)
            .bind(user.email)
            .bind(user.phone)
            .bind(user.password)
            .bind(user.role.as_str())
            .execute(pool)
            .await
            .map_err(|e| match e {
                sqlx::Error::Database(ref db) if db.is_unique_violation() => {
                    AppError::Conflict(conflict_message.to_string())
                }
                other => AppError::Db(other),
            })?;
        Ok(())
    }

    /// Full row including the stored password hash, for credential checks.
    pub async fn find_by_username(pool: &PgPool, username: &str) -> Result<Option<User>, AppError> {
        let user = sqlx::query_as::<_, User>(
            "SELECT username, email, phone, password, role, address FROM users WHERE username = $1",
        )
        .bind(username)
        .fetch_optional(pool)
        .await?;
        Ok(user)
    }

    /// Unconditional update; a username with no row is a silent no-op.
    pub async fn update_address(pool: &PgPool, username: &str, address: &str) -> Result<(), AppError> {
        let res = sqlx::query("UPDATE users SET address = $1 WHERE username = $2")
            .bind(address)
            .bind(username)
            .execute(pool)
            .await?;
        tracing::debug!(%username, rows = res.rows_affected(), "update address");
        Ok(())
    }

    /// Unconditional update; a username with no row is a silent no-op.
    pub async fn update_phone(pool: &PgPool, username: &str, phone: &str) -> Result<(), AppError> {
        let res = sqlx::query("UPDATE users SET phone = $1 WHERE username = $2")
            .bind(phone)
            .bind(username)
            .execute(pool)
            .await?;
        tracing::debug!(%username, rows = res.rows_affected(), "update phone");
        Ok(())
    }

    /// Customers only, sorted by username.
    pub async fn list_customers(pool: &PgPool) -> Result<Vec<CustomerSummary>, AppError> {
        let rows = sqlx::query_as::<_, CustomerSummary>(
            "SELECT username, email, phone, address FROM users WHERE role = $1 ORDER BY username ASC",
        )
        .bind(Role::Customer.as_str())
        .fetch_all(pool)
        .await?;
        Ok(rows)
    }

    pub async fn role_of<'e, E>(executor: E, username: &str) -> Result<Option<Role>, AppError>
    where
        E: sqlx::PgExecutor<'e>,
    {
        let role: Option<(String,)> = sqlx::query_as("SELECT role FROM users WHERE username = $1")
            .bind(username)
            .fetch_optional(executor)
            .await?;
        match role {
            Some((r,)) => Role::try_from(r)
                .map(Some)
                .map_err(|e| AppError::Db(sqlx::Error::Decode(Box::new(e)))),
            None => Ok(None),
        }
    }
}
