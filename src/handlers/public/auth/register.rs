use axum::{http::StatusCode, response::IntoResponse, Json};
use chrono::Utc;
use serde::Deserialize;
use serde_json::json;

use super::utils::{validate_email, validate_password};
use crate::auth::{password, tokens};
use crate::database::manager::DatabaseManager;
use crate::database::repositories::{administrators, users};
use crate::error::ApiError;
use crate::types::{Plan, Role};

#[derive(Debug, Deserialize)]
pub struct RegisterRequest {
    pub name: String,
    pub email: String,
    pub password: String,
    /// Display name for the administradora; defaults to the user's name.
    pub company_name: Option<String>,
}

/// POST /auth/register - Create an administradora tenant and its first user
///
/// The new user starts on the free plan with role `administrator` and an
/// unverified email. A verification token (24 h, single-use) is issued and
/// returned in the response; only its hash is stored.
pub async fn register(Json(payload): Json<RegisterRequest>) -> Result<impl IntoResponse, ApiError> {
    if payload.name.trim().is_empty() {
        return Err(ApiError::missing_field("name"));
    }
    validate_email(&payload.email)?;
    validate_password(&payload.password)?;

    let pool = DatabaseManager::pool().await?;

    // Friendly duplicate check; the unique index still backstops races.
    if users::find_by_email(&pool, &payload.email).await?.is_some() {
        return Err(ApiError::conflict("An account with this email already exists"));
    }

    let company_name = payload
        .company_name
        .as_deref()
        .filter(|s| !s.trim().is_empty())
        .unwrap_or(&payload.name);
    let administrator = administrators::create(&pool, company_name).await?;

    let password_hash = password::hash_password(&payload.password)?;
    let verification = tokens::issue();

    let user = users::create(
        &pool,
        users::NewUser {
            name: payload.name.trim(),
            email: payload.email.trim(),
            password_hash: Some(&password_hash),
            role: Role::Administrator,
            administrator_id: Some(administrator.id),
            condominium_id: None,
            plan: Plan::Free,
            email_verified: false,
            google_id: None,
            verification_token_hash: Some(&verification.token_hash),
            verification_expires_at: Some(tokens::verification_expires_at(Utc::now())),
        },
    )
    .await?;

    tracing::info!("Registered user {} under administradora {}", user.id, administrator.id);

    // Mail delivery is out of scope; the raw token goes back to the caller
    // exactly once and only its hash is stored.
    Ok((
        StatusCode::CREATED,
        Json(json!({
            "success": true,
            "data": {
                "user": user.to_public_json(),
                "administrator": administrator,
                "verification_token": verification.raw,
            }
        })),
    ))
}
