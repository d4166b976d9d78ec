use axum::{
    extract::Query,
    http::StatusCode,
    response::IntoResponse,
    Extension, Json,
};
use serde::Deserialize;
use serde_json::json;
use uuid::Uuid;

use super::PageParams;
use crate::access::{ensure_access, Actor};
use crate::auth::password;
use crate::database::manager::DatabaseManager;
use crate::database::repositories::{condominiums, users};
use crate::error::ApiError;
use crate::handlers::public::auth::{validate_email, validate_password};
use crate::types::Role;

#[derive(Debug, Deserialize)]
pub struct CreateUserRequest {
    pub name: String,
    pub email: String,
    pub password: String,
    /// `operator` or `board_member`; administrators only arrive via registration.
    pub role: String,
    /// Required for board members, forbidden otherwise.
    pub condominium_id: Option<Uuid>,
}

/// GET /api/users - List the tenant's users
pub async fn list(
    Extension(actor): Extension<Actor>,
    Query(params): Query<PageParams>,
) -> Result<impl IntoResponse, ApiError> {
    if actor.role == Role::BoardMember {
        return Err(ApiError::forbidden("This role cannot manage users"));
    }
    let tenant = actor
        .administrator_id
        .ok_or_else(|| ApiError::forbidden("Account is not attached to an administradora"))?;

    let pool = DatabaseManager::pool().await?;
    let records = users::list_for_tenant(&pool, tenant, params.page()).await?;
    let records: Vec<_> = records.iter().map(|u| u.to_public_json()).collect();

    Ok(Json(json!({ "success": true, "data": records })))
}

/// POST /api/users - Create an operator or board-member user in the tenant
///
/// Administrator-only. Board members must point at a condominium the actor
/// can access; operators must not carry one. Created accounts are verified
/// up front (the administrator vouches for the address).
pub async fn create(
    Extension(actor): Extension<Actor>,
    Json(payload): Json<CreateUserRequest>,
) -> Result<impl IntoResponse, ApiError> {
    // Input validation resolves before any access evaluation
    if payload.name.trim().is_empty() {
        return Err(ApiError::missing_field("name"));
    }
    validate_email(&payload.email)?;
    validate_password(&payload.password)?;

    let role: Role = payload.role.parse().map_err(|_| {
        let mut field_errors = std::collections::HashMap::new();
        field_errors.insert(
            "role".to_string(),
            "Must be 'operator' or 'board_member'".to_string(),
        );
        ApiError::validation_error("Invalid field format", Some(field_errors))
    })?;

    if actor.role != Role::Administrator {
        return Err(ApiError::forbidden("Only administrators can create users"));
    }
    let tenant = actor
        .administrator_id
        .ok_or_else(|| ApiError::forbidden("Account is not attached to an administradora"))?;

    let pool = DatabaseManager::pool().await?;

    let condominium_id = match (role, payload.condominium_id) {
        (Role::Administrator, _) => {
            return Err(ApiError::forbidden("Administrators are created through registration"));
        }
        (Role::BoardMember, Some(condominium_id)) => {
            // The condominium must belong to the actor's own tenant
            let condominium = condominiums::find(&pool, condominium_id)
                .await?
                .ok_or_else(|| ApiError::not_found("Condominium not found"))?;
            ensure_access(&actor, &condominium)?;
            Some(condominium_id)
        }
        (Role::BoardMember, None) => {
            return Err(ApiError::missing_field("condominium_id"));
        }
        (Role::Operator, Some(_)) => {
            return Err(ApiError::bad_request("Operators are not scoped to a condominium"));
        }
        (Role::Operator, None) => None,
    };

    if users::find_by_email(&pool, &payload.email).await?.is_some() {
        return Err(ApiError::conflict("An account with this email already exists"));
    }

    let password_hash = password::hash_password(&payload.password)?;
    let user = users::create(
        &pool,
        users::NewUser {
            name: payload.name.trim(),
            email: payload.email.trim(),
            password_hash: Some(&password_hash),
            role,
            administrator_id: Some(tenant),
            condominium_id,
            plan: actor.plan,
            email_verified: true,
            google_id: None,
            verification_token_hash: None,
            verification_expires_at: None,
        },
    )
    .await?;

    tracing::info!("User {} ({}) created in tenant {}", user.id, role, tenant);
    Ok((
        StatusCode::CREATED,
        Json(json!({ "success": true, "data": user.to_public_json() })),
    ))
}
