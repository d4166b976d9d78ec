use axum::{extract::ConnectInfo, response::IntoResponse, Extension, Json};
use serde::Deserialize;
use std::net::SocketAddr;
use std::sync::Arc;

use super::utils::session_payload;
use crate::auth::password;
use crate::auth::rate_limit::{login_key, RateLimitStore};
use crate::database::manager::DatabaseManager;
use crate::database::repositories::users;
use crate::error::ApiError;

#[derive(Debug, Deserialize)]
pub struct LoginRequest {
    pub email: String,
    pub password: String,
}

/// POST /auth/login - Authenticate with email/password and receive a JWT
///
/// Failures are deliberately uniform: unknown email, wrong password and
/// passwordless (OAuth-only) accounts all answer with the same 401, and the
/// rate limiter answers 429 without consulting the database at all.
pub async fn login(
    ConnectInfo(addr): ConnectInfo<SocketAddr>,
    Extension(rate_limit): Extension<Arc<dyn RateLimitStore>>,
    Json(payload): Json<LoginRequest>,
) -> Result<impl IntoResponse, ApiError> {
    if payload.email.trim().is_empty() {
        return Err(ApiError::missing_field("email"));
    }
    if payload.password.is_empty() {
        return Err(ApiError::missing_field("password"));
    }

    let key = login_key(&addr.ip().to_string(), payload.email.trim());
    if !rate_limit.check(&key).await {
        return Err(ApiError::too_many_requests("Too many login attempts; try again later"));
    }

    let pool = DatabaseManager::pool().await?;
    let user = users::find_by_email(&pool, payload.email.trim()).await?;

    let user = match user {
        Some(user) => user,
        None => return Err(invalid_credentials()),
    };

    let verified = user
        .password_hash
        .as_deref()
        .map(|hash| password::verify_password(&payload.password, hash))
        .unwrap_or(false);
    if !verified {
        return Err(invalid_credentials());
    }

    if !user.email_verified {
        return Err(ApiError::unverified_email("Confirm your email before signing in"));
    }

    rate_limit.reset(&key).await;
    tracing::info!("User {} signed in", user.id);

    Ok(Json(session_payload(&user)?))
}

fn invalid_credentials() -> ApiError {
    ApiError::unauthorized("Invalid email or password")
}
