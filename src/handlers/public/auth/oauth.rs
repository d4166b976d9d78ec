use axum::{extract::Query, response::IntoResponse, Json};
use serde::Deserialize;

use super::utils::session_payload;
use crate::database::manager::DatabaseManager;
use crate::database::repositories::{administrators, users};
use crate::error::ApiError;
use crate::services::OAuthService;
use crate::types::{Plan, Role};

#[derive(Debug, Deserialize)]
pub struct CallbackQuery {
    pub code: Option<String>,
    pub error: Option<String>,
}

/// GET /auth/google/callback - Sign in with a Google authorization code
///
/// Known subjects sign straight in. Unknown subjects with an unclaimed email
/// get a fresh administradora tenant (free plan, verified — Google vouches
/// for the address). An email already owned by a local-credential account is
/// rejected: linking requires an authenticated session, never an OAuth
/// round-trip alone.
pub async fn google_callback(
    Query(query): Query<CallbackQuery>,
) -> Result<impl IntoResponse, ApiError> {
    if let Some(err) = query.error {
        tracing::warn!("OAuth callback returned error: {}", err);
        return Err(ApiError::bad_request("Authorization was denied"));
    }
    let code = query
        .code
        .filter(|c| !c.trim().is_empty())
        .ok_or_else(|| ApiError::missing_field("code"))?;

    let profile = OAuthService::new().authenticate(code.trim()).await?;
    let pool = DatabaseManager::pool().await?;

    // Already linked: plain sign-in
    if let Some(user) = users::find_by_google_id(&pool, &profile.id).await? {
        tracing::info!("User {} signed in via Google", user.id);
        return Ok(Json(session_payload(&user)?));
    }

    let email = profile
        .email
        .as_deref()
        .filter(|e| !e.is_empty())
        .ok_or_else(|| ApiError::bad_gateway("Identity provider returned no email"))?;

    if users::find_by_email(&pool, email).await?.is_some() {
        return Err(ApiError::conflict(
            "An account with this email already exists; sign in and link Google from your account",
        ));
    }

    // First sight of this subject: provision a tenant
    let display_name = profile.name.as_deref().unwrap_or(email);
    let administrator = administrators::create(&pool, display_name).await?;
    let user = users::create(
        &pool,
        users::NewUser {
            name: display_name,
            email,
            password_hash: None,
            role: Role::Administrator,
            administrator_id: Some(administrator.id),
            condominium_id: None,
            plan: Plan::Free,
            email_verified: true,
            google_id: Some(&profile.id),
            verification_token_hash: None,
            verification_expires_at: None,
        },
    )
    .await?;

    tracing::info!("Provisioned user {} via Google sign-in", user.id);
    Ok(Json(session_payload(&user)?))
}
