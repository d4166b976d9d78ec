use axum::{
    extract::{Path, Query},
    http::StatusCode,
    response::IntoResponse,
    Extension, Json,
};
use chrono::NaiveDate;
use rust_decimal::Decimal;
use serde::Deserialize;
use serde_json::json;
use uuid::Uuid;

use super::PageParams;
use crate::access::{ensure_access, ensure_mutate, Actor};
use crate::database::manager::DatabaseManager;
use crate::database::models::financial_entry::FinancialEntry;
use crate::database::repositories::{condominiums, financial_entries};
use crate::error::ApiError;
use crate::types::EntryKind;

#[derive(Debug, Deserialize)]
pub struct EntryRequest {
    pub kind: String,
    pub amount: Decimal,
    pub entry_date: NaiveDate,
    pub category: Option<String>,
    pub description: Option<String>,
}

impl EntryRequest {
    fn validated_kind(&self) -> Result<EntryKind, ApiError> {
        self.kind.parse().map_err(|_| {
            let mut field_errors = std::collections::HashMap::new();
            field_errors.insert(
                "kind".to_string(),
                "Must be 'income' or 'expense'".to_string(),
            );
            ApiError::validation_error("Invalid field format", Some(field_errors))
        })
    }

    fn validated_amount(&self) -> Result<Decimal, ApiError> {
        if self.amount <= Decimal::ZERO {
            let mut field_errors = std::collections::HashMap::new();
            field_errors.insert("amount".to_string(), "Must be greater than zero".to_string());
            return Err(ApiError::validation_error("Invalid field format", Some(field_errors)));
        }
        Ok(self.amount)
    }
}

async fn find_scoped(
    pool: &sqlx::PgPool,
    actor: &Actor,
    id: Uuid,
) -> Result<FinancialEntry, ApiError> {
    let entry = financial_entries::find(pool, id)
        .await?
        .ok_or_else(|| ApiError::not_found("Financial entry not found"))?;
    let condominium = condominiums::find(pool, entry.condominium_id)
        .await?
        .ok_or_else(|| ApiError::not_found("Financial entry not found"))?;
    ensure_access(actor, &condominium)?;
    Ok(entry)
}

/// GET /api/condominiums/:id/entries - Newest first, paginated
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

    let records = financial_entries::list_for_condominium(&pool, condominium_id, params.page()).await?;
    Ok(Json(json!({ "success": true, "data": records })))
}

/// POST /api/condominiums/:id/entries
pub async fn create(
    Extension(actor): Extension<Actor>,
    Path(condominium_id): Path<Uuid>,
    Json(payload): Json<EntryRequest>,
) -> Result<impl IntoResponse, ApiError> {
    let kind = payload.validated_kind()?;
    let amount = payload.validated_amount()?;

    let pool = DatabaseManager::pool().await?;

    let condominium = condominiums::find(&pool, condominium_id)
        .await?
        .ok_or_else(|| ApiError::not_found("Condominium not found"))?;
    ensure_access(&actor, &condominium)?;
    ensure_mutate(&actor)?;

    let record = financial_entries::create(
        &pool,
        kind,
        amount,
        payload.entry_date,
        payload.category.as_deref(),
        payload.description.as_deref(),
        condominium_id,
    )
    .await?;

    Ok((StatusCode::CREATED, Json(json!({ "success": true, "data": record }))))
}

/// PUT /api/entries/:id
pub async fn update(
    Extension(actor): Extension<Actor>,
    Path(id): Path<Uuid>,
    Json(payload): Json<EntryRequest>,
) -> Result<impl IntoResponse, ApiError> {
    let kind = payload.validated_kind()?;
    let amount = payload.validated_amount()?;

    let pool = DatabaseManager::pool().await?;
    find_scoped(&pool, &actor, id).await?;
    ensure_mutate(&actor)?;

    let record = financial_entries::update(
        &pool,
        id,
        kind,
        amount,
        payload.entry_date,
        payload.category.as_deref(),
        payload.description.as_deref(),
    )
    .await?;

    Ok(Json(json!({ "success": true, "data": record })))
}

/// DELETE /api/entries/:id
pub async fn delete(
    Extension(actor): Extension<Actor>,
    Path(id): Path<Uuid>,
) -> Result<impl IntoResponse, ApiError> {
    let pool = DatabaseManager::pool().await?;
    find_scoped(&pool, &actor, id).await?;
    ensure_mutate(&actor)?;

    financial_entries::delete(&pool, id).await?;
    Ok(Json(json!({ "success": true, "data": { "id": id } })))
}
