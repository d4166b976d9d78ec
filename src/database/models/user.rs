use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use sqlx::FromRow;
use uuid::Uuid;

use crate::error::ApiError;
use crate::types::{Plan, Role};

/// Account row. `role` and `plan` are stored as text; [`User::role`] and
/// [`User::plan`] parse them into the closed enums. Token hashes are sha256
/// of the raw tokens and are cleared on redemption.
#[derive(Debug, Clone, Serialize, Deserialize, FromRow)]
pub struct User {
    pub id: Uuid,
    pub name: String,
    pub email: String,
    #[serde(skip_serializing)]
    pub password_hash: Option<String>,
    pub role: String,
    pub administrator_id: Option<Uuid>,
    pub condominium_id: Option<Uuid>,
    pub plan: String,
    pub email_verified: bool,
    pub onboarded: bool,
    pub google_id: Option<String>,
    #[serde(skip_serializing)]
    pub verification_token_hash: Option<String>,
    #[serde(skip_serializing)]
    pub verification_expires_at: Option<DateTime<Utc>>,
    #[serde(skip_serializing)]
    pub reset_token_hash: Option<String>,
    #[serde(skip_serializing)]
    pub reset_expires_at: Option<DateTime<Utc>>,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

impl User {
    pub fn role(&self) -> Result<Role, ApiError> {
        self.role.parse().map_err(|_| {
            tracing::error!("User {} has unrecognized role '{}'", self.id, self.role);
            ApiError::internal_server_error("Account is misconfigured")
        })
    }

    pub fn plan(&self) -> Result<Plan, ApiError> {
        self.plan.parse().map_err(|_| {
            tracing::error!("User {} has unrecognized plan '{}'", self.id, self.plan);
            ApiError::internal_server_error("Account is misconfigured")
        })
    }

    /// Public profile shape returned by auth and account endpoints.
    pub fn to_public_json(&self) -> serde_json::Value {
        serde_json::json!({
            "id": self.id,
            "name": self.name,
            "email": self.email,
            "role": self.role,
            "administrator_id": self.administrator_id,
            "condominium_id": self.condominium_id,
            "plan": self.plan,
            "email_verified": self.email_verified,
            "onboarded": self.onboarded,
            "has_google": self.google_id.is_some(),
        })
    }
}
