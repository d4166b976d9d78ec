use chrono::NaiveDate;
use rust_decimal::Decimal;
use sqlx::PgPool;
use uuid::Uuid;

use crate::database::manager::DatabaseError;
use crate::database::models::financial_entry::FinancialEntry;
use crate::database::repositories::Page;
use crate::types::EntryKind;

const COLUMNS: &str =
    "id, kind, amount, entry_date, category, description, condominium_id, created_at, updated_at";

pub async fn create(
    pool: &PgPool,
    kind: EntryKind,
    amount: Decimal,
    entry_date: NaiveDate,
    category: Option<&str>,
    description: Option<&str>,
    condominium_id: Uuid,
) -> Result<FinancialEntry, DatabaseError> {
    let sql = format!(
        "INSERT INTO financial_entries (kind, amount, entry_date, category, description, condominium_id)
         VALUES ($1, $2, $3, $4, $5, $6)
         RETURNING {COLUMNS}"
    );
    let row = sqlx::query_as::<_, FinancialEntry>(&sql)
        .bind(kind.as_str())
        .bind(amount)
        .bind(entry_date)
        .bind(category)
        .bind(description)
        .bind(condominium_id)
        .fetch_one(pool)
        .await?;

    Ok(row)
}

pub async fn find(pool: &PgPool, id: Uuid) -> Result<Option<FinancialEntry>, DatabaseError> {
    let sql = format!("SELECT {COLUMNS} FROM financial_entries WHERE id = $1");
    let row = sqlx::query_as::<_, FinancialEntry>(&sql)
        .bind(id)
        .fetch_optional(pool)
        .await?;

    Ok(row)
}

/// Newest entries first, then insertion order for same-day entries.
pub async fn list_for_condominium(
    pool: &PgPool,
    condominium_id: Uuid,
    page: Page,
) -> Result<Vec<FinancialEntry>, DatabaseError> {
    let sql = format!(
        "SELECT {COLUMNS} FROM financial_entries
         WHERE condominium_id = $1
         ORDER BY entry_date DESC, created_at DESC
         LIMIT $2 OFFSET $3"
    );
    let rows = sqlx::query_as::<_, FinancialEntry>(&sql)
        .bind(condominium_id)
        .bind(page.limit)
        .bind(page.offset)
        .fetch_all(pool)
        .await?;

    Ok(rows)
}

pub async fn update(
    pool: &PgPool,
    id: Uuid,
    kind: EntryKind,
    amount: Decimal,
    entry_date: NaiveDate,
    category: Option<&str>,
    description: Option<&str>,
) -> Result<FinancialEntry, DatabaseError> {
    let sql = format!(
        "UPDATE financial_entries
         SET kind = $2, amount = $3, entry_date = $4, category = $5, description = $6, updated_at = NOW()
         WHERE id = $1
         RETURNING {COLUMNS}"
    );
    let row = sqlx::query_as::<_, FinancialEntry>(&sql)
        .bind(id)
        .bind(kind.as_str())
        .bind(amount)
        .bind(entry_date)
        .bind(category)
        .bind(description)
        .fetch_optional(pool)
        .await?;

    row.ok_or_else(|| DatabaseError::NotFound("Financial entry not found".to_string()))
}

pub async fn delete(pool: &PgPool, id: Uuid) -> Result<(), DatabaseError> {
    sqlx::query("DELETE FROM financial_entries WHERE id = $1")
        .bind(id)
        .execute(pool)
        .await?;

    Ok(())
}
