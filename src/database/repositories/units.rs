use sqlx::PgPool;
use uuid::Uuid;

use crate::database::manager::DatabaseError;
use crate::database::models::unit::Unit;
use crate::database::repositories::Page;

const COLUMNS: &str = "id, identifier, unit_type, condominium_id, created_at";

pub async fn create(
    pool: &PgPool,
    identifier: &str,
    unit_type: Option<&str>,
    condominium_id: Uuid,
) -> Result<Unit, DatabaseError> {
    let sql = format!(
        "INSERT INTO units (identifier, unit_type, condominium_id)
         VALUES ($1, $2, $3)
         RETURNING {COLUMNS}"
    );
    let row = sqlx::query_as::<_, Unit>(&sql)
        .bind(identifier)
        .bind(unit_type)
        .bind(condominium_id)
        .fetch_one(pool)
        .await?;

    Ok(row)
}

pub async fn find(pool: &PgPool, id: Uuid) -> Result<Option<Unit>, DatabaseError> {
    let sql = format!("SELECT {COLUMNS} FROM units WHERE id = $1");
    let row = sqlx::query_as::<_, Unit>(&sql)
        .bind(id)
        .fetch_optional(pool)
        .await?;

    Ok(row)
}

pub async fn list_for_condominium(
    pool: &PgPool,
    condominium_id: Uuid,
    page: Page,
) -> Result<Vec<Unit>, DatabaseError> {
    let sql = format!(
        "SELECT {COLUMNS} FROM units
         WHERE condominium_id = $1
         ORDER BY identifier ASC
         LIMIT $2 OFFSET $3"
    );
    let rows = sqlx::query_as::<_, Unit>(&sql)
        .bind(condominium_id)
        .bind(page.limit)
        .bind(page.offset)
        .fetch_all(pool)
        .await?;

    Ok(rows)
}

/// Per-condominium count backing the unit plan quota.
pub async fn count_for_condominium(
    pool: &PgPool,
    condominium_id: Uuid,
) -> Result<i64, DatabaseError> {
    let count: (i64,) = sqlx::query_as("SELECT COUNT(*) FROM units WHERE condominium_id = $1")
        .bind(condominium_id)
        .fetch_one(pool)
        .await?;

    Ok(count.0)
}

pub async fn update(
    pool: &PgPool,
    id: Uuid,
    identifier: &str,
    unit_type: Option<&str>,
) -> Result<Unit, DatabaseError> {
    let sql = format!(
        "UPDATE units SET identifier = $2, unit_type = $3 WHERE id = $1 RETURNING {COLUMNS}"
    );
    let row = sqlx::query_as::<_, Unit>(&sql)
        .bind(id)
        .bind(identifier)
        .bind(unit_type)
        .fetch_optional(pool)
        .await?;

    row.ok_or_else(|| DatabaseError::NotFound("Unit not found".to_string()))
}

pub async fn delete(pool: &PgPool, id: Uuid) -> Result<(), DatabaseError> {
    sqlx::query("DELETE FROM units WHERE id = $1")
        .bind(id)
        .execute(pool)
        .await?;

    Ok(())
}
