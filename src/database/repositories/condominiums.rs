use sqlx::PgPool;
use uuid::Uuid;

use crate::database::manager::DatabaseError;
use crate::database::models::condominium::Condominium;
use crate::database::repositories::Page;

const COLUMNS: &str = "id, name, tax_id, address, administrator_id, created_at, updated_at";

pub async fn create(
    pool: &PgPool,
    name: &str,
    tax_id: Option<&str>,
    address: Option<&str>,
    administrator_id: Uuid,
) -> Result<Condominium, DatabaseError> {
    let sql = format!(
        "INSERT INTO condominiums (name, tax_id, address, administrator_id)
         VALUES ($1, $2, $3, $4)
         RETURNING {COLUMNS}"
    );
    let row = sqlx::query_as::<_, Condominium>(&sql)
        .bind(name)
        .bind(tax_id)
        .bind(address)
        .bind(administrator_id)
        .fetch_one(pool)
        .await?;

    Ok(row)
}

pub async fn find(pool: &PgPool, id: Uuid) -> Result<Option<Condominium>, DatabaseError> {
    let sql = format!("SELECT {COLUMNS} FROM condominiums WHERE id = $1");
    let row = sqlx::query_as::<_, Condominium>(&sql)
        .bind(id)
        .fetch_optional(pool)
        .await?;

    Ok(row)
}

pub async fn list_for_tenant(
    pool: &PgPool,
    administrator_id: Uuid,
    page: Page,
) -> Result<Vec<Condominium>, DatabaseError> {
    let sql = format!(
        "SELECT {COLUMNS} FROM condominiums
         WHERE administrator_id = $1
         ORDER BY name ASC
         LIMIT $2 OFFSET $3"
    );
    let rows = sqlx::query_as::<_, Condominium>(&sql)
        .bind(administrator_id)
        .bind(page.limit)
        .bind(page.offset)
        .fetch_all(pool)
        .await?;

    Ok(rows)
}

/// Tenant-scoped count backing the condominium plan quota.
pub async fn count_for_tenant(pool: &PgPool, administrator_id: Uuid) -> Result<i64, DatabaseError> {
    let count: (i64,) =
        sqlx::query_as("SELECT COUNT(*) FROM condominiums WHERE administrator_id = $1")
            .bind(administrator_id)
            .fetch_one(pool)
            .await?;

    Ok(count.0)
}

/// Full update of the mutable columns. The owning administrator is assigned
/// at creation and never changes.
pub async fn update(
    pool: &PgPool,
    id: Uuid,
    name: &str,
    tax_id: Option<&str>,
    address: Option<&str>,
) -> Result<Condominium, DatabaseError> {
    let sql = format!(
        "UPDATE condominiums
         SET name = $2, tax_id = $3, address = $4, updated_at = NOW()
         WHERE id = $1
         RETURNING {COLUMNS}"
    );
    let row = sqlx::query_as::<_, Condominium>(&sql)
        .bind(id)
        .bind(name)
        .bind(tax_id)
        .bind(address)
        .fetch_optional(pool)
        .await?;

    row.ok_or_else(|| DatabaseError::NotFound("Condominium not found".to_string()))
}

pub async fn delete(pool: &PgPool, id: Uuid) -> Result<(), DatabaseError> {
    sqlx::query("DELETE FROM condominiums WHERE id = $1")
        .bind(id)
        .execute(pool)
        .await?;

    Ok(())
}
