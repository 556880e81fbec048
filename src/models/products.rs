// src/models/products.rs

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use sqlx::FromRow;
use utoipa::{IntoParams, ToSchema};
use uuid::Uuid;
use validator::Validate;

#[derive(Debug, Clone, Serialize, Deserialize, FromRow, ToSchema, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct Product {
    pub id: Uuid,

    // 'blinds', 'curtains', 'commercial'
    #[schema(example = "blinds")]
    pub category: String,

    #[schema(example = "Roller Blind")]
    pub name: String,

    pub description: String,

    #[schema(example = "/uploads/roller-blind.jpg")]
    pub image: Option<String>,

    #[schema(example = json!(["Blackout fabric", "Motorised option"]))]
    pub features: Vec<String>,

    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

#[derive(Debug, Clone, Deserialize, Validate, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct CreateProductPayload {
    #[validate(length(min = 1, max = 50, message = "Category must have between 1 and 50 characters."))]
    #[schema(example = "curtains")]
    pub category: String,

    #[validate(length(min = 1, max = 255, message = "Name must have between 1 and 255 characters."))]
    pub name: String,

    #[validate(length(min = 1, message = "Description is required."))]
    pub description: String,

    #[validate(length(max = 500, message = "Image path must have at most 500 characters."))]
    pub image: Option<String>,

    #[serde(default)]
    pub features: Vec<String>,
}

// Partial update: absent fields are left untouched, an empty `image` clears it.
#[derive(Debug, Clone, Default, Deserialize, Validate, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct UpdateProductPayload {
    #[validate(length(min = 1, max = 50, message = "Category must have between 1 and 50 characters."))]
    pub category: Option<String>,

    #[validate(length(min = 1, max = 255, message = "Name must have between 1 and 255 characters."))]
    pub name: Option<String>,

    #[validate(length(min = 1, message = "Description cannot be empty."))]
    pub description: Option<String>,

    #[validate(length(max = 500, message = "Image path must have at most 500 characters."))]
    pub image: Option<String>,

    pub features: Option<Vec<String>>,
}

#[derive(Debug, Deserialize, IntoParams)]
#[into_params(parameter_in = Query)]
pub struct ProductQuery {
    /// Only return products of this category
    pub category: Option<String>,
}
