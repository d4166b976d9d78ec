use axum::{response::IntoResponse, Extension, Json};
use serde::Deserialize;
use serde_json::json;

use crate::access::Actor;
use crate::database::manager::DatabaseManager;
use crate::database::repositories::users;
use crate::error::ApiError;
use crate::services::OAuthService;

#[derive(Debug, Deserialize)]
pub struct LinkGoogleRequest {
    pub code: String,
}

/// GET /api/auth/whoami - Current user's profile
pub async fn whoami(Extension(actor): Extension<Actor>) -> Result<impl IntoResponse, ApiError> {
    let pool = DatabaseManager::pool().await?;
    let user = users::find(&pool, actor.user_id)
        .await?
        .ok_or_else(|| ApiError::unauthorized("Account no longer exists"))?;

    Ok(Json(json!({ "success": true, "data": user.to_public_json() })))
}

/// POST /api/auth/onboarding - Mark the first-run setup as completed
pub async fn complete_onboarding(
    Extension(actor): Extension<Actor>,
) -> Result<impl IntoResponse, ApiError> {
    let pool = DatabaseManager::pool().await?;
    let user = users::set_onboarded(&pool, actor.user_id).await?;

    Ok(Json(json!({ "success": true, "data": user.to_public_json() })))
}

/// POST /api/auth/link/google - Attach a Google identity to the current account
///
/// Requires an authenticated session (proves account ownership). An account
/// carries at most one external identity, and a Google subject can back at
/// most one account; either collision is a conflict.
pub async fn link_google(
    Extension(actor): Extension<Actor>,
    Json(payload): Json<LinkGoogleRequest>,
) -> Result<impl IntoResponse, ApiError> {
    if payload.code.trim().is_empty() {
        return Err(ApiError::missing_field("code"));
    }

    let profile = OAuthService::new().authenticate(payload.code.trim()).await?;
    let pool = DatabaseManager::pool().await?;

    if let Some(owner) = users::find_by_google_id(&pool, &profile.id).await? {
        if owner.id == actor.user_id {
            return Ok(Json(json!({ "success": true, "data": owner.to_public_json() })));
        }
        return Err(ApiError::conflict(
            "This Google account is already linked to a different user",
        ));
    }

    let user = users::find(&pool, actor.user_id)
        .await?
        .ok_or_else(|| ApiError::unauthorized("Account no longer exists"))?;
    if user.google_id.is_some() {
        return Err(ApiError::conflict("This account is already linked to a Google identity"));
    }

    let user = users::link_google(&pool, actor.user_id, &profile.id).await?;
    tracing::info!("User {} linked a Google identity", user.id);

    Ok(Json(json!({ "success": true, "data": user.to_public_json() })))
}
