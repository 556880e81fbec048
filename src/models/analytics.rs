// src/models/analytics.rs

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use sqlx::FromRow;
use utoipa::{IntoParams, ToSchema};
use uuid::Uuid;
use validator::Validate;

#[derive(Debug, Clone, Serialize, Deserialize, FromRow, ToSchema, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct PageView {
    pub id: Uuid,

    #[schema(example = "/portfolio")]
    pub page: String,

    pub user_agent: Option<String>,
    pub referrer: Option<String>,
    pub timestamp: DateTime<Utc>,
}

#[derive(Debug, Clone, Deserialize, Validate, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct PageViewPayload {
    #[validate(length(min = 1, max = 255, message = "Page must have between 1 and 255 characters."))]
    pub page: String,

    // Falls back to the request's User-Agent header
    pub user_agent: Option<String>,

    #[validate(length(max = 500, message = "Referrer must have at most 500 characters."))]
    pub referrer: Option<String>,
}

// Insert-ready page view once the user agent has been resolved
#[derive(Debug, Clone)]
pub struct NewPageView {
    pub page: String,
    pub user_agent: String,
    pub referrer: Option<String>,
}

#[derive(Debug, Clone, Serialize, Deserialize, FromRow, ToSchema, PartialEq)]
pub struct PageCount {
    pub page: String,
    pub count: i64,
}

#[derive(Debug, Clone, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct AnalyticsStats {
    pub total_products: i64,
    pub total_portfolio: i64,
    pub new_leads: i64,
    pub page_views_30_days: i64,
    pub unique_visitors: i64,
}

#[derive(Debug, Clone, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct AnalyticsOverview {
    pub total_views: i64,
    pub top_pages: Vec<PageCount>,
    pub total_leads: i64,
}

// Either the raw views of one page or the ranking of all pages
#[derive(Debug, Clone, Serialize, ToSchema)]
#[serde(untagged)]
pub enum PageViewsReport {
    Views(Vec<PageView>),
    TopPages(Vec<PageCount>),
}

#[derive(Debug, Default, Deserialize, IntoParams)]
#[into_params(parameter_in = Query)]
pub struct AnalyticsQuery {
    /// Restrict to views of this page
    pub page: Option<String>,

    /// RFC 3339 timestamp or YYYY-MM-DD date
    pub since: Option<String>,
}

#[derive(Debug, Clone, Serialize, Deserialize, ToSchema, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct UniqueVisitors {
    pub unique_visitors: i64,
}

#[derive(Debug, Default, Deserialize, Validate, IntoParams)]
#[into_params(parameter_in = Query)]
pub struct CleanupQuery {
    /// Views newer than this many days are kept (default 90)
    #[validate(range(min = 1, max = 3650, message = "days_to_keep must be between 1 and 3650."))]
    pub days_to_keep: Option<u32>,
}

#[derive(Debug, Clone, Serialize, Deserialize, ToSchema, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct CleanupResult {
    pub deleted_records: u64,
    pub days_kept: u32,
}
