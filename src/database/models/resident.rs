use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use sqlx::FromRow;
use uuid::Uuid;

#[derive(Debug, Clone, Serialize, Deserialize, FromRow)]
pub struct Resident {
    pub id: Uuid,
    pub name: String,
    pub document: Option<String>,
    pub contact: Option<String>,
    pub unit_id: Uuid,
    pub created_at: DateTime<Utc>,
}
