use chrono::{DateTime, Utc};
use sqlx::PgPool;
use uuid::Uuid;

use crate::database::manager::DatabaseError;
use crate::database::models::user::User;
use crate::database::repositories::Page;
use crate::types::{Plan, Role};

const COLUMNS: &str = "id, name, email, password_hash, role, administrator_id, condominium_id, \
                       plan, email_verified, onboarded, google_id, verification_token_hash, \
                       verification_expires_at, reset_token_hash, reset_expires_at, created_at, updated_at";

/// Insert payload. Registration sets the verification token; users created by
/// an administrator or through OAuth arrive pre-verified.
pub struct NewUser<'a> {
    pub name: &'a str,
    pub email: &'a str,
    pub password_hash: Option<&'a str>,
    pub role: Role,
    pub administrator_id: Option<Uuid>,
    pub condominium_id: Option<Uuid>,
    pub plan: Plan,
    pub email_verified: bool,
    pub google_id: Option<&'a str>,
    pub verification_token_hash: Option<&'a str>,
    pub verification_expires_at: Option<DateTime<Utc>>,
}

pub async fn create(pool: &PgPool, new_user: NewUser<'_>) -> Result<User, DatabaseError> {
    let sql = format!(
        "INSERT INTO users (name, email, password_hash, role, administrator_id, condominium_id,
                            plan, email_verified, google_id, verification_token_hash, verification_expires_at)
         VALUES ($1, lower($2), $3, $4, $5, $6, $7, $8, $9, $10, $11)
         RETURNING {COLUMNS}"
    );
    let row = sqlx::query_as::<_, User>(&sql)
        .bind(new_user.name)
        .bind(new_user.email)
        .bind(new_user.password_hash)
        .bind(new_user.role.as_str())
        .bind(new_user.administrator_id)
        .bind(new_user.condominium_id)
        .bind(new_user.plan.as_str())
        .bind(new_user.email_verified)
        .bind(new_user.google_id)
        .bind(new_user.verification_token_hash)
        .bind(new_user.verification_expires_at)
        .fetch_one(pool)
        .await?;

    Ok(row)
}

pub async fn find(pool: &PgPool, id: Uuid) -> Result<Option<User>, DatabaseError> {
    let sql = format!("SELECT {COLUMNS} FROM users WHERE id = $1");
    let row = sqlx::query_as::<_, User>(&sql)
        .bind(id)
        .fetch_optional(pool)
        .await?;

    Ok(row)
}

pub async fn find_by_email(pool: &PgPool, email: &str) -> Result<Option<User>, DatabaseError> {
    let sql = format!("SELECT {COLUMNS} FROM users WHERE email = lower($1)");
    let row = sqlx::query_as::<_, User>(&sql)
        .bind(email)
        .fetch_optional(pool)
        .await?;

    Ok(row)
}

pub async fn find_by_google_id(pool: &PgPool, google_id: &str) -> Result<Option<User>, DatabaseError> {
    let sql = format!("SELECT {COLUMNS} FROM users WHERE google_id = $1");
    let row = sqlx::query_as::<_, User>(&sql)
        .bind(google_id)
        .fetch_optional(pool)
        .await?;

    Ok(row)
}

pub async fn find_by_verification_hash(
    pool: &PgPool,
    token_hash: &str,
) -> Result<Option<User>, DatabaseError> {
    let sql = format!("SELECT {COLUMNS} FROM users WHERE verification_token_hash = $1");
    let row = sqlx::query_as::<_, User>(&sql)
        .bind(token_hash)
        .fetch_optional(pool)
        .await?;

    Ok(row)
}

pub async fn find_by_reset_hash(pool: &PgPool, token_hash: &str) -> Result<Option<User>, DatabaseError> {
    let sql = format!("SELECT {COLUMNS} FROM users WHERE reset_token_hash = $1");
    let row = sqlx::query_as::<_, User>(&sql)
        .bind(token_hash)
        .fetch_optional(pool)
        .await?;

    Ok(row)
}

pub async fn list_for_tenant(
    pool: &PgPool,
    administrator_id: Uuid,
    page: Page,
) -> Result<Vec<User>, DatabaseError> {
    let sql = format!(
        "SELECT {COLUMNS} FROM users
         WHERE administrator_id = $1
         ORDER BY name ASC
         LIMIT $2 OFFSET $3"
    );
    let rows = sqlx::query_as::<_, User>(&sql)
        .bind(administrator_id)
        .bind(page.limit)
        .bind(page.offset)
        .fetch_all(pool)
        .await?;

    Ok(rows)
}

/// Redeem the verification token: mark verified and consume the token in one
/// statement so it cannot be replayed.
pub async fn mark_verified(pool: &PgPool, id: Uuid) -> Result<User, DatabaseError> {
    let sql = format!(
        "UPDATE users
         SET email_verified = TRUE,
             verification_token_hash = NULL,
             verification_expires_at = NULL,
             updated_at = NOW()
         WHERE id = $1
         RETURNING {COLUMNS}"
    );
    let row = sqlx::query_as::<_, User>(&sql)
        .bind(id)
        .fetch_optional(pool)
        .await?;

    row.ok_or_else(|| DatabaseError::NotFound("User not found".to_string()))
}

pub async fn set_reset_token(
    pool: &PgPool,
    id: Uuid,
    token_hash: &str,
    expires_at: DateTime<Utc>,
) -> Result<(), DatabaseError> {
    sqlx::query(
        "UPDATE users SET reset_token_hash = $2, reset_expires_at = $3, updated_at = NOW()
         WHERE id = $1",
    )
    .bind(id)
    .bind(token_hash)
    .bind(expires_at)
    .execute(pool)
    .await?;

    Ok(())
}

/// Redeem the reset token: swap the password hash and consume the token.
pub async fn set_password(pool: &PgPool, id: Uuid, password_hash: &str) -> Result<(), DatabaseError> {
    sqlx::query(
        "UPDATE users
         SET password_hash = $2, reset_token_hash = NULL, reset_expires_at = NULL, updated_at = NOW()
         WHERE id = $1",
    )
    .bind(id)
    .bind(password_hash)
    .execute(pool)
    .await?;

    Ok(())
}

pub async fn link_google(pool: &PgPool, id: Uuid, google_id: &str) -> Result<User, DatabaseError> {
    let sql = format!(
        "UPDATE users SET google_id = $2, updated_at = NOW() WHERE id = $1 RETURNING {COLUMNS}"
    );
    let row = sqlx::query_as::<_, User>(&sql)
        .bind(id)
        .bind(google_id)
        .fetch_optional(pool)
        .await?;

    row.ok_or_else(|| DatabaseError::NotFound("User not found".to_string()))
}

pub async fn set_onboarded(pool: &PgPool, id: Uuid) -> Result<User, DatabaseError> {
    let sql = format!(
        "UPDATE users SET onboarded = TRUE, updated_at = NOW() WHERE id = $1 RETURNING {COLUMNS}"
    );
    let row = sqlx::query_as::<_, User>(&sql)
        .bind(id)
        .fetch_optional(pool)
        .await?;

    row.ok_or_else(|| DatabaseError::NotFound("User not found".to_string()))
}
