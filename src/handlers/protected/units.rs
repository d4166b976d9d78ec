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
use crate::database::models::unit::Unit;
use crate::database::repositories::{condominiums, units};
use crate::error::ApiError;
use crate::plan;

#[derive(Debug, Deserialize)]
pub struct UnitRequest {
    pub identifier: String,
    pub unit_type: Option<String>,
}

/// Resolve a unit and authorize through its condominium: 404 first, then the
/// access guard against the owning condominium.
async fn find_scoped(pool: &sqlx::PgPool, actor: &Actor, id: Uuid) -> Result<Unit, ApiError> {
    let unit = units::find(pool, id)
        .await?
        .ok_or_else(|| ApiError::not_found("Unit not found"))?;
    let condominium = condominiums::find(pool, unit.condominium_id)
        .await?
        .ok_or_else(|| ApiError::not_found("Unit not found"))?;
    ensure_access(actor, &condominium)?;
    Ok(unit)
}

/// GET /api/condominiums/:id/units
pub async fn list(
    Extension(actor): Extension<Actor>,
    Path(condominium_id): Path<Uuid>,
    Query(params): Query<PageParams>,
) -> Result<impl IntoResponse, ApiError> {
    let pool = DatabaseManager::pool().await?;

    let condominium = condominiums::find(&pool, condominium_id)
        .await?
        .ok_or_else(|| ApiError::not_found("Condominium not found"))?;
    ensure_access(&actor, &condominium)?;

    let records = units::list_for_condominium(&pool, condominium_id, params.page()).await?;
    Ok(Json(json!({ "success": true, "data": records })))
}

/// POST /api/condominiums/:id/units - Create a unit (plan-limited per condominium)
pub async fn create(
    Extension(actor): Extension<Actor>,
    Path(condominium_id): Path<Uuid>,
    Json(payload): Json<UnitRequest>,
) -> Result<impl IntoResponse, ApiError> {
    if payload.identifier.trim().is_empty() {
        return Err(ApiError::missing_field("identifier"));
    }

    let pool = DatabaseManager::pool().await?;

    let condominium = condominiums::find(&pool, condominium_id)
        .await?
        .ok_or_else(|| ApiError::not_found("Condominium not found"))?;
    ensure_access(&actor, &condominium)?;
    ensure_mutate(&actor)?;

    // Counter is per condominium; a sibling condominium under the same
    // tenant does not consume this quota.
    let current = units::count_for_condominium(&pool, condominium_id).await?;
    plan::ensure_unit_quota(actor.plan, current)?;

    let record = units::create(
        &pool,
        payload.identifier.trim(),
        payload.unit_type.as_deref(),
        condominium_id,
    )
    .await?;

    Ok((StatusCode::CREATED, Json(json!({ "success": true, "data": record }))))
}

/// PUT /api/units/:id
pub async fn update(
    Extension(actor): Extension<Actor>,
    Path(id): Path<Uuid>,
    Json(payload): Json<UnitRequest>,
) -> Result<impl IntoResponse, ApiError> {
    if payload.identifier.trim().is_empty() {
        return Err(ApiError::missing_field("identifier"));
    }

    let pool = DatabaseManager::pool().await?;
    find_scoped(&pool, &actor, id).await?;
    ensure_mutate(&actor)?;

    let record = units::update(&pool, id, payload.identifier.trim(), payload.unit_type.as_deref()).await?;
    Ok(Json(json!({ "success": true, "data": record })))
}

/// DELETE /api/units/:id
pub async fn delete(
    Extension(actor): Extension<Actor>,
    Path(id): Path<Uuid>,
) -> Result<impl IntoResponse, ApiError> {
    let pool = DatabaseManager::pool().await?;
    find_scoped(&pool, &actor, id).await?;
    ensure_mutate(&actor)?;

    units::delete(&pool, id).await?;
    Ok(Json(json!({ "success": true, "data": { "id": id } })))
}
