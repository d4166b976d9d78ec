use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use sqlx::FromRow;
use uuid::Uuid;

#[derive(Debug, Clone, Serialize, Deserialize, FromRow)]
pub struct Unit {
    pub id: Uuid,
    pub identifier: String,
    pub unit_type: Option<String>,
    pub condominium_id: Uuid,
    pub created_at: DateTime<Utc>,
}
