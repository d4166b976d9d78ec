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
use crate::database::repositories::{condominiums, residents, units};
use crate::error::ApiError;

#[derive(Debug, Deserialize)]
pub struct ResidentRequest {
    pub name: String,
    pub document: Option<String>,
    pub contact: Option<String>,
}

/// Residents are authorized through unit → condominium ownership.
async fn find_unit_scoped(pool: &sqlx::PgPool, actor: &Actor, unit_id: Uuid) -> Result<Unit, ApiError> {
    let unit = units::find(pool, unit_id)
        .await?
        .ok_or_else(|| ApiError::not_found("Unit not found"))?;
    let condominium = condominiums::find(pool, unit.condominium_id)
        .await?
        .ok_or_else(|| ApiError::not_found("Unit not found"))?;
    ensure_access(actor, &condominium)?;
    Ok(unit)
}

/// GET /api/units/:id/residents
pub async fn list(
    Extension(actor): Extension<Actor>,
    Path(unit_id): Path<Uuid>,
    Query(params): Query<PageParams>,
) -> Result<impl IntoResponse, ApiError> {
    let pool = DatabaseManager::pool().await?;
    find_unit_scoped(&pool, &actor, unit_id).await?;

    let records = residents::list_for_unit(&pool, unit_id, params.page()).await?;
    Ok(Json(json!({ "success": true, "data": records })))
}

/// POST /api/units/:id/residents
pub async fn create(
    Extension(actor): Extension<Actor>,
    Path(unit_id): Path<Uuid>,
    Json(payload): Json<ResidentRequest>,
) -> Result<impl IntoResponse, ApiError> {
    if payload.name.trim().is_empty() {
        return Err(ApiError::missing_field("name"));
    }

    let pool = DatabaseManager::pool().await?;
    find_unit_scoped(&pool, &actor, unit_id).await?;
    ensure_mutate(&actor)?;

    let record = residents::create(
        &pool,
        payload.name.trim(),
        payload.document.as_deref(),
        payload.contact.as_deref(),
        unit_id,
    )
    .await?;

    Ok((StatusCode::CREATED, Json(json!({ "success": true, "data": record }))))
}

/// PUT /api/residents/:id
pub async fn update(
    Extension(actor): Extension<Actor>,
    Path(id): Path<Uuid>,
    Json(payload): Json<ResidentRequest>,
) -> Result<impl IntoResponse, ApiError> {
    if payload.name.trim().is_empty() {
        return Err(ApiError::missing_field("name"));
    }

    let pool = DatabaseManager::pool().await?;
    let resident = residents::find(&pool, id)
        .await?
        .ok_or_else(|| ApiError::not_found("Resident not found"))?;
    find_unit_scoped(&pool, &actor, resident.unit_id).await?;
    ensure_mutate(&actor)?;

    let record = residents::update(
        &pool,
        id,
        payload.name.trim(),
        payload.document.as_deref(),
        payload.contact.as_deref(),
    )
    .await?;

    Ok(Json(json!({ "success": true, "data": record })))
}

/// DELETE /api/residents/:id
pub async fn delete(
    Extension(actor): Extension<Actor>,
    Path(id): Path<Uuid>,
) -> Result<impl IntoResponse, ApiError> {
    let pool = DatabaseManager::pool().await?;
    let resident = residents::find(&pool, id)
        .await?
        .ok_or_else(|| ApiError::not_found("Resident not found"))?;
    find_unit_scoped(&pool, &actor, resident.unit_id).await?;
    ensure_mutate(&actor)?;

    residents::delete(&pool, id).await?;
    Ok(Json(json!({ "success": true, "data": { "id": id } })))
}
