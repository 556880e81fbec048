// src/services/analytics_service.rs

use std::sync::Arc;

use chrono::{DateTime, Duration, NaiveDate, Utc};

use crate::{
    common::error::AppError,
    db::Storage,
    models::{
        analytics::{
            AnalyticsOverview, AnalyticsStats, CleanupResult, NewPageView, PageView, PageViewsReport,
            UniqueVisitors,
        },
        leads::LeadStatus,
    },
};

const STATS_WINDOW_DAYS: i64 = 30;
const RECENT_VIEWS_LIMIT: i64 = 50;
const OVERVIEW_TOP_PAGES: i64 = 10;
const REPORT_TOP_PAGES: i64 = 20;
pub const DEFAULT_DAYS_TO_KEEP: u32 = 90;

#[derive(Clone)]
pub struct AnalyticsService {
    storage: Arc<dyn Storage>,
}

impl AnalyticsService {
    pub fn new(storage: Arc<dyn Storage>) -> Self {
        Self { storage }
    }

    pub async fn track(&self, view: NewPageView) -> Result<PageView, AppError> {
        let view = self.storage.create_page_view(view).await?;
        tracing::debug!(page = %view.page, "page view recorded");
        Ok(view)
    }

    /// Dashboard cards: catalog sizes, untouched leads and the last 30 days of traffic.
    pub async fn stats(&self) -> Result<AnalyticsStats, AppError> {
        let since = Some(Utc::now() - Duration::days(STATS_WINDOW_DAYS));

        Ok(AnalyticsStats {
            total_products: self.storage.count_products().await?,
            total_portfolio: self.storage.count_portfolio().await?,
            new_leads: self.storage.count_leads(Some(LeadStatus::New)).await?,
            page_views_30_days: self.storage.count_page_views(since).await?,
            unique_visitors: self.storage.count_unique_visitors(since).await?,
        })
    }

    pub async fn overview(&self, since: Option<&str>) -> Result<AnalyticsOverview, AppError> {
        let since = since.map(parse_since).transpose()?;

        Ok(AnalyticsOverview {
            total_views: self.storage.count_page_views(since).await?,
            top_pages: self.storage.top_pages(OVERVIEW_TOP_PAGES, since).await?,
            total_leads: self.storage.count_leads(None).await?,
        })
    }

    pub async fn page_views(
        &self,
        page: Option<&str>,
        since: Option<&str>,
    ) -> Result<PageViewsReport, AppError> {
        let since = since.map(parse_since).transpose()?;

        match page {
            Some(page) => Ok(PageViewsReport::Views(
                self.storage.page_views_for_page(page, since).await?,
            )),
            None => Ok(PageViewsReport::TopPages(
                self.storage.top_pages(REPORT_TOP_PAGES, since).await?,
            )),
        }
    }

    pub async fn recent(&self) -> Result<Vec<PageView>, AppError> {
        self.storage.recent_page_views(RECENT_VIEWS_LIMIT).await
    }

    pub async fn unique_visitors(&self, since: Option<&str>) -> Result<UniqueVisitors, AppError> {
        let since = since.map(parse_since).transpose()?;
        Ok(UniqueVisitors {
            unique_visitors: self.storage.count_unique_visitors(since).await?,
        })
    }

    /// Drops page views older than `days_to_keep` days.
    pub async fn cleanup(&self, days_to_keep: u32) -> Result<CleanupResult, AppError> {
        let cutoff = Utc::now() - Duration::days(i64::from(days_to_keep));
        let deleted = self.storage.delete_page_views_before(cutoff).await?;
        tracing::info!(deleted, days_to_keep, "old page views removed");

        Ok(CleanupResult {
            deleted_records: deleted,
            days_kept: days_to_keep,
        })
    }
}

/// Accepts an RFC 3339 timestamp or a bare `YYYY-MM-DD` date (midnight UTC).
pub fn parse_since(raw: &str) -> Result<DateTime<Utc>, AppError> {
    if let Ok(ts) = DateTime::parse_from_rfc3339(raw) {
        return Ok(ts.with_timezone(&Utc));
    }

    NaiveDate::parse_from_str(raw, "%Y-%m-%d")
        .ok()
        .and_then(|date| date.and_hms_opt(0, 0, 0))
        .map(|dt| dt.and_utc())
        .ok_or_else(|| AppError::BadRequest(format!("Invalid 'since' value: {}", raw)))
}
