use sqlx::PgPool;

use crate::database::manager::DatabaseError;
use crate::database::models::administrator::Administrator;

pub async fn create(pool: &PgPool, name: &str) -> Result<Administrator, DatabaseError> {
    let row = sqlx::query_as::<_, Administrator>(
        "INSERT INTO administrators (name) VALUES ($1) RETURNING id, name, created_at",
    )
    .bind(name)
    .fetch_one(pool)
    .await?;

    Ok(row)
}
