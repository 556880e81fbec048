// src/models/brochures.rs

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use sqlx::FromRow;
use utoipa::ToSchema;
use uuid::Uuid;
use validator::Validate;

#[derive(Debug, Clone, Serialize, Deserialize, FromRow, ToSchema, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct Brochure {
    pub id: Uuid,
    pub title: String,
    pub description: String,

    #[schema(example = "/brochures/2025-collection.pdf")]
    pub pdf_path: String,

    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

#[derive(Debug, Clone, Deserialize, Validate, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct CreateBrochurePayload {
    #[validate(length(min = 1, max = 255, message = "Title must have between 1 and 255 characters."))]
    pub title: String,

    #[validate(length(min = 1, message = "Description is required."))]
    pub description: String,

    #[validate(length(min = 1, max = 500, message = "PDF path must have between 1 and 500 characters."))]
    pub pdf_path: String,
}

#[derive(Debug, Clone, Default, Deserialize, Validate, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct UpdateBrochurePayload {
    #[validate(length(min = 1, max = 255, message = "Title must have between 1 and 255 characters."))]
    pub title: Option<String>,

    #[validate(length(min = 1, message = "Description cannot be empty."))]
    pub description: Option<String>,

    #[validate(length(min = 1, max = 500, message = "PDF path must have between 1 and 500 characters."))]
    pub pdf_path: Option<String>,
}

#[derive(Debug, Clone, Serialize, Deserialize, ToSchema, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct BrochureStats {
    pub total_brochures: i64,
}
