use sqlx::PgPool;
use uuid::Uuid;

use crate::database::manager::DatabaseError;
use crate::database::models::resident::Resident;
use crate::database::repositories::Page;

const COLUMNS: &str = "id, name, document, contact, unit_id, created_at";

pub async fn create(
    pool: &PgPool,
    name: &str,
    document: Option<&str>,
    contact: Option<&str>,
    unit_id: Uuid,
) -> Result<Resident, DatabaseError> {
    let sql = format!(
        "INSERT INTO residents (name, document, contact, unit_id)
         VALUES ($1, $2, $3, $4)
         RETURNING {COLUMNS}"
    );
    let row = sqlx::query_as::<_, Resident>(&sql)
        .bind(name)
        .bind(document)
        .bind(contact)
        .bind(unit_id)
        .fetch_one(pool)
        .await?;

    Ok(row)
}

pub async fn find(pool: &PgPool, id: Uuid) -> Result<Option<Resident>, DatabaseError> {
    let sql = format!("SELECT {COLUMNS} FROM residents WHERE id = $1");
    let row = sqlx::query_as::<_, Resident>(&sql)
        .bind(id)
        .fetch_optional(pool)
        .await?;

    Ok(row)
}

pub async fn list_for_unit(
    pool: &PgPool,
    unit_id: Uuid,
    page: Page,
) -> Result<Vec<Resident>, DatabaseError> {
    let sql = format!(
        "SELECT {COLUMNS} FROM residents
         WHERE unit_id = $1
         ORDER BY name ASC
         LIMIT $2 OFFSET $3"
    );
    let rows = sqlx::query_as::<_, Resident>(&sql)
        .bind(unit_id)
        .bind(page.limit)
        .bind(page.offset)
        .fetch_all(pool)
        .await?;

    Ok(rows)
}

pub async fn update(
    pool: &PgPool,
    id: Uuid,
    name: &str,
    document: Option<&str>,
    contact: Option<&str>,
) -> Result<Resident, DatabaseError> {
    let sql = format!(
        "UPDATE residents SET name = $2, document = $3, contact = $4
         WHERE id = $1
         RETURNING {COLUMNS}"
    );
    let row = sqlx::query_as::<_, Resident>(&sql)
        .bind(id)
        .bind(name)
        .bind(document)
        .bind(contact)
        .fetch_optional(pool)
        .await?;

    row.ok_or_else(|| DatabaseError::NotFound("Resident not found".to_string()))
}

pub async fn delete(pool: &PgPool, id: Uuid) -> Result<(), DatabaseError> {
    sqlx::query("DELETE FROM residents WHERE id = $1")
        .bind(id)
        .execute(pool)
        .await?;

    Ok(())
}
