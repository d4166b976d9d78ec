use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use sqlx::FromRow;
use uuid::Uuid;

/// Condominium owned by at most one administradora. The owner is assigned at
/// creation and never reassigned afterwards.
#[derive(Debug, Clone, Serialize, Deserialize, FromRow)]
pub struct Condominium {
    pub id: Uuid,
    pub name: String,
    pub tax_id: Option<String>,
    pub address: Option<String>,
    pub administrator_id: Option<Uuid>,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}
