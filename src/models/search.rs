// src/models/search.rs

use serde::{Deserialize, Serialize};
use utoipa::{IntoParams, ToSchema};
use validator::Validate;

#[derive(Debug, Clone, Deserialize, Validate, IntoParams)]
#[into_params(parameter_in = Query)]
pub struct SearchQuery {
    /// Case-insensitive text to look for
    #[validate(length(min = 1, max = 100, message = "Search text must have between 1 and 100 characters."))]
    pub q: String,
}

// Distinct categories in use, sorted
#[derive(Debug, Clone, Serialize, Deserialize, ToSchema, PartialEq)]
pub struct CategoryList {
    #[schema(example = json!(["blinds", "curtains"]))]
    pub categories: Vec<String>,
}
