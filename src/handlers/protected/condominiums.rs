use axum::{
    extract::{Path, Query},
    http::StatusCode,
    response::IntoResponse,
    Extension, Json,
};
use serde::Deserialize;
use serde_json::json;
use uuid::Uuid;

use super::PageParams;
use crate::access::{ensure_access, ensure_mutate, Actor};
use crate::database::manager::DatabaseManager;
use crate::database::models::condominium::Condominium;
use crate::database::repositories::condominiums;
use crate::error::ApiError;
use crate::plan;
use crate::types::Role;

#[derive(Debug, Deserialize)]
pub struct CondominiumRequest {
    pub name: String,
    pub tax_id: Option<String>,
    pub address: Option<String>,
}

/// Resolve the target condominium, answering 404 before any access
/// evaluation so error codes never reveal existence across tenants.
async fn find_scoped(pool: &sqlx::PgPool, actor: &Actor, id: Uuid) -> Result<Condominium, ApiError> {
    let condominium = condominiums::find(pool, id)
        .await?
        .ok_or_else(|| ApiError::not_found("Condominium not found"))?;
    ensure_access(actor, &condominium)?;
    Ok(condominium)
}

/// GET /api/condominiums - List condominiums visible to the actor
pub async fn list(
    Extension(actor): Extension<Actor>,
    Query(params): Query<PageParams>,
) -> Result<impl IntoResponse, ApiError> {
    let pool = DatabaseManager::pool().await?;

    let records = match actor.role {
        // A board member's scope is exactly one condominium
        Role::BoardMember => match actor.condominium_id {
            Some(id) => condominiums::find(&pool, id).await?.into_iter().collect(),
            None => vec![],
        },
        Role::Administrator | Role::Operator => match actor.administrator_id {
            Some(tenant) => condominiums::list_for_tenant(&pool, tenant, params.page()).await?,
            None => vec![],
        },
    };

    Ok(Json(json!({ "success": true, "data": records })))
}

/// POST /api/condominiums - Create a condominium under the actor's tenant
pub async fn create(
    Extension(actor): Extension<Actor>,
    Json(payload): Json<CondominiumRequest>,
) -> Result<impl IntoResponse, ApiError> {
    // Input validation resolves before any access evaluation
    if payload.name.trim().is_empty() {
        return Err(ApiError::missing_field("name"));
    }
    ensure_mutate(&actor)?;
    let tenant = actor
        .administrator_id
        .ok_or_else(|| ApiError::forbidden("Account is not attached to an administradora"))?;

    let pool = DatabaseManager::pool().await?;

    // Quota check immediately before the insert; see plan module for the
    // accepted race at the boundary count.
    let current = condominiums::count_for_tenant(&pool, tenant).await?;
    plan::ensure_condominium_quota(actor.plan, current)?;

    let record = condominiums::create(
        &pool,
        payload.name.trim(),
        payload.tax_id.as_deref(),
        payload.address.as_deref(),
        tenant,
    )
    .await?;

    tracing::info!("Condominium {} created under tenant {}", record.id, tenant);
    Ok((StatusCode::CREATED, Json(json!({ "success": true, "data": record }))))
}

/// GET /api/condominiums/:id
pub async fn get(
    Extension(actor): Extension<Actor>,
    Path(id): Path<Uuid>,
) -> Result<impl IntoResponse, ApiError> {
    let pool = DatabaseManager::pool().await?;
    let record = find_scoped(&pool, &actor, id).await?;
    Ok(Json(json!({ "success": true, "data": record })))
}

/// PUT /api/condominiums/:id - Update name/tax id/address
///
/// The owning administradora is immutable once set.
pub async fn update(
    Extension(actor): Extension<Actor>,
    Path(id): Path<Uuid>,
    Json(payload): Json<CondominiumRequest>,
) -> Result<impl IntoResponse, ApiError> {
    if payload.name.trim().is_empty() {
        return Err(ApiError::missing_field("name"));
    }

    let pool = DatabaseManager::pool().await?;
    find_scoped(&pool, &actor, id).await?;
    ensure_mutate(&actor)?;

    let record = condominiums::update(
        &pool,
        id,
        payload.name.trim(),
        payload.tax_id.as_deref(),
        payload.address.as_deref(),
    )
    .await?;

    Ok(Json(json!({ "success": true, "data": record })))
}

/// DELETE /api/condominiums/:id
pub async fn delete(
    Extension(actor): Extension<Actor>,
    Path(id): Path<Uuid>,
) -> Result<impl IntoResponse, ApiError> {
    let pool = DatabaseManager::pool().await?;
    find_scoped(&pool, &actor, id).await?;
    ensure_mutate(&actor)?;

    condominiums::delete(&pool, id).await?;
    tracing::info!("Condominium {} deleted by user {}", id, actor.user_id);

    Ok(Json(json!({ "success": true, "data": { "id": id } })))
}
