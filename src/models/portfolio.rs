// src/models/portfolio.rs

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use sqlx::FromRow;
use utoipa::{IntoParams, ToSchema};
use uuid::Uuid;
use validator::Validate;

// A showcased past project
#[derive(Debug, Clone, Serialize, Deserialize, FromRow, ToSchema, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct PortfolioItem {
    pub id: Uuid,

    #[schema(example = "Harbour View Apartment")]
    pub title: String,

    pub description: Option<String>,
    pub image: Option<String>,
    pub client: Option<String>,
    pub location: Option<String>,
    pub category: Option<String>,

    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

#[derive(Debug, Clone, Deserialize, Validate, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct CreatePortfolioPayload {
    #[validate(length(min = 1, max = 255, message = "Title must have between 1 and 255 characters."))]
    pub title: String,

    pub description: Option<String>,

    #[validate(length(max = 500, message = "Image path must have at most 500 characters."))]
    pub image: Option<String>,

    #[validate(length(max = 255))]
    pub client: Option<String>,

    #[validate(length(max = 255))]
    pub location: Option<String>,

    #[validate(length(max = 100))]
    pub category: Option<String>,
}

// Absent fields are kept; an empty string clears a nullable field.
#[derive(Debug, Clone, Default, Deserialize, Validate, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct UpdatePortfolioPayload {
    #[validate(length(min = 1, max = 255, message = "Title must have between 1 and 255 characters."))]
    pub title: Option<String>,

    pub description: Option<String>,

    #[validate(length(max = 500, message = "Image path must have at most 500 characters."))]
    pub image: Option<String>,

    #[validate(length(max = 255))]
    pub client: Option<String>,

    #[validate(length(max = 255))]
    pub location: Option<String>,

    #[validate(length(max = 100))]
    pub category: Option<String>,
}

#[derive(Debug, Default, Deserialize, IntoParams)]
#[into_params(parameter_in = Query)]
pub struct PortfolioQuery {
    /// Only return items of this category
    pub category: Option<String>,
}
