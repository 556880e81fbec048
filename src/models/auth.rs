// src/models/auth.rs

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use sqlx::FromRow;
use utoipa::ToSchema;
use uuid::Uuid;
use validator::Validate;

// Back-office user
#[derive(Debug, Clone, Serialize, FromRow, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct Admin {
    pub id: Uuid,

    #[schema(example = "admin")]
    pub username: String,

    #[serde(skip_serializing)]
    #[schema(ignore)]
    pub password_hash: String,

    pub created_at: DateTime<Utc>,
}

// Server-side session. Only the SHA-256 of the cookie value is ever stored.
#[derive(Debug, Clone, FromRow)]
pub struct AdminSession {
    pub token_hash: String,
    pub admin_id: Uuid,
    pub created_at: DateTime<Utc>,
    pub expires_at: DateTime<Utc>,
}

impl AdminSession {
    pub fn is_expired(&self, now: DateTime<Utc>) -> bool {
        self.expires_at <= now
    }
}

#[derive(Debug, Deserialize, Validate, ToSchema)]
pub struct LoginPayload {
    #[validate(length(min = 1, message = "Username is required."))]
    #[schema(example = "admin")]
    pub username: String,

    #[validate(length(min = 1, message = "Password is required."))]
    #[schema(example = "change-me")]
    pub password: String,
}

#[derive(Debug, Serialize, ToSchema)]
pub struct LogoutResponse {
    pub success: bool,
}
