use chrono::{DateTime, NaiveDate, Utc};
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use sqlx::FromRow;
use uuid::Uuid;

/// Income or expense entry booked against a condominium. `kind` is stored as
/// text and validated against [`crate::types::EntryKind`] on the way in.
#[derive(Debug, Clone, Serialize, Deserialize, FromRow)]
pub struct FinancialEntry {
    pub id: Uuid,
    pub kind: String,
    pub amount: Decimal,
    pub entry_date: NaiveDate,
    pub category: Option<String>,
    pub description: Option<String>,
    pub condominium_id: Uuid,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}
