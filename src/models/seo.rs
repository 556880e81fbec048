// src/models/seo.rs

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use sqlx::FromRow;
use utoipa::ToSchema;
use uuid::Uuid;
use validator::Validate;

// One row per page ('home', 'about', 'products', 'portfolio', 'contact', ...)
#[derive(Debug, Clone, Serialize, Deserialize, FromRow, ToSchema, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct SeoSettings {
    pub id: Uuid,

    #[schema(example = "home")]
    pub page: String,

    pub title: String,
    pub description: String,
    pub og_title: Option<String>,
    pub og_description: Option<String>,

    #[schema(example = json!(["curtains", "blinds", "shutters"]))]
    pub keywords: Vec<String>,

    pub updated_at: DateTime<Utc>,
}

#[derive(Debug, Clone, Deserialize, Validate, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct UpsertSeoPayload {
    #[validate(length(min = 1, max = 50, message = "Page must have between 1 and 50 characters."))]
    pub page: String,

    #[validate(length(min = 1, max = 255, message = "Title must have between 1 and 255 characters."))]
    pub title: String,

    #[validate(length(min = 1, message = "Description is required."))]
    pub description: String,

    #[validate(length(max = 255))]
    pub og_title: Option<String>,

    pub og_description: Option<String>,

    #[serde(default)]
    pub keywords: Vec<String>,
}

#[derive(Debug, Clone, Default, Deserialize, Validate, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct UpdateSeoPayload {
    #[validate(length(min = 1, max = 255, message = "Title must have between 1 and 255 characters."))]
    pub title: Option<String>,

    #[validate(length(min = 1, message = "Description cannot be empty."))]
    pub description: Option<String>,

    #[validate(length(max = 255))]
    pub og_title: Option<String>,

    pub og_description: Option<String>,

    pub keywords: Option<Vec<String>>,
}

// Returned by the admin panel for a page that has no settings yet
#[derive(Debug, Clone, Serialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct SeoTemplate {
    pub page: String,
    pub title: String,
    pub description: String,
    pub og_title: Option<String>,
    pub og_description: Option<String>,
    pub keywords: Vec<String>,
}

impl SeoTemplate {
    pub fn empty(page: &str) -> Self {
        Self {
            page: page.to_string(),
            title: String::new(),
            description: String::new(),
            og_title: None,
            og_description: None,
            keywords: Vec::new(),
        }
    }
}

#[derive(Debug, Clone, Serialize, ToSchema)]
#[serde(untagged)]
pub enum AdminSeoView {
    Stored(SeoSettings),
    Empty(SeoTemplate),
}

// Keys of every page that has settings, sorted
#[derive(Debug, Clone, Serialize, Deserialize, ToSchema, PartialEq)]
pub struct SeoPages {
    #[schema(example = json!(["about", "home"]))]
    pub pages: Vec<String>,
}
