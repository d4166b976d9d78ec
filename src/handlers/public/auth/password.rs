use axum::{response::IntoResponse, Json};
use chrono::Utc;
use serde::Deserialize;
use serde_json::json;

use super::utils::{validate_email, validate_password};
use crate::auth::{password, tokens};
use crate::database::manager::DatabaseManager;
use crate::database::repositories::users;
use crate::error::ApiError;

#[derive(Debug, Deserialize)]
pub struct ForgotPasswordRequest {
    pub email: String,
}

#[derive(Debug, Deserialize)]
pub struct ResetPasswordRequest {
    pub token: String,
    pub password: String,
}

/// POST /auth/password/forgot - Issue a password-reset token
///
/// Answers identically whether or not the email exists, so the endpoint
/// cannot be used to enumerate accounts. The token lives for one hour and is
/// independent of the verification token.
pub async fn forgot_password(
    Json(payload): Json<ForgotPasswordRequest>,
) -> Result<impl IntoResponse, ApiError> {
    validate_email(&payload.email)?;

    let pool = DatabaseManager::pool().await?;

    if let Some(user) = users::find_by_email(&pool, payload.email.trim()).await? {
        let reset = tokens::issue();
        users::set_reset_token(&pool, user.id, &reset.token_hash, tokens::reset_expires_at(Utc::now()))
            .await?;
        tracing::info!("Issued password reset token for user {}", user.id);
        // Raw token goes to the delivery channel, never into the response:
        // the uniform body below is what keeps account existence private.
        deliver_reset_token(&user.email, &reset.raw);
    }

    Ok(Json(json!({
        "success": true,
        "data": { "message": "If the email exists, reset instructions have been sent" }
    })))
}

/// Mail delivery is out of scope; surface the token to the operator in
/// development builds only.
fn deliver_reset_token(email: &str, raw_token: &str) {
    if matches!(
        crate::config::config().environment,
        crate::config::Environment::Development
    ) {
        tracing::debug!("reset token for {}: {}", email, raw_token);
    }
}

/// POST /auth/password/reset - Redeem the reset token and set a new password
pub async fn reset_password(
    Json(payload): Json<ResetPasswordRequest>,
) -> Result<impl IntoResponse, ApiError> {
    if payload.token.trim().is_empty() {
        return Err(ApiError::missing_field("token"));
    }
    validate_password(&payload.password)?;

    let pool = DatabaseManager::pool().await?;
    let raw = payload.token.trim();

    let user = users::find_by_reset_hash(&pool, &tokens::hash_token(raw))
        .await?
        .ok_or_else(|| ApiError::invalid_token("Token is invalid or has expired"))?;

    tokens::validate(raw, user.reset_token_hash.as_deref(), user.reset_expires_at, Utc::now())?;

    let password_hash = password::hash_password(&payload.password)?;
    users::set_password(&pool, user.id, &password_hash).await?;
    tracing::info!("User {} reset their password", user.id);

    Ok(Json(json!({
        "success": true,
        "data": { "message": "Password updated" }
    })))
}
