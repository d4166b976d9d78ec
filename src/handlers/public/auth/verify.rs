use axum::{response::IntoResponse, Json};
use chrono::Utc;
use serde::Deserialize;
use serde_json::json;

use crate::auth::tokens;
use crate::database::manager::DatabaseManager;
use crate::database::repositories::users;
use crate::error::ApiError;

#[derive(Debug, Deserialize)]
pub struct VerifyRequest {
    pub token: String,
}

/// POST /auth/verify - Redeem the email-verification token
///
/// Single-use: redemption clears the stored hash, so replaying the same token
/// fails with `INVALID_TOKEN`, exactly like an expired or unknown one.
pub async fn verify_email(Json(payload): Json<VerifyRequest>) -> Result<impl IntoResponse, ApiError> {
    if payload.token.trim().is_empty() {
        return Err(ApiError::missing_field("token"));
    }

    let pool = DatabaseManager::pool().await?;
    let raw = payload.token.trim();

    let user = users::find_by_verification_hash(&pool, &tokens::hash_token(raw))
        .await?
        .ok_or_else(|| ApiError::invalid_token("Token is invalid or has expired"))?;

    tokens::validate(
        raw,
        user.verification_token_hash.as_deref(),
        user.verification_expires_at,
        Utc::now(),
    )?;

    let user = users::mark_verified(&pool, user.id).await?;
    tracing::info!("User {} verified their email", user.id);

    Ok(Json(json!({
        "success": true,
        "data": { "user": user.to_public_json() }
    })))
}
