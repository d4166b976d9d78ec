use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use sqlx::FromRow;
use uuid::Uuid;

/// Tenant root: owns condominiums and the tenant's users.
#[derive(Debug, Clone, Serialize, Deserialize, FromRow)]
pub struct Administrator {
    pub id: Uuid,
    pub name: String,
    pub created_at: DateTime<Utc>,
}
