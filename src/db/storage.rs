// src/db/storage.rs

//! The single repository-style interface consumed by the services and
//! handlers. [`PgStorage`](super::PgStorage) backs it with Postgres,
//! [`MemoryStorage`](super::MemoryStorage) keeps everything in memory.

use async_trait::async_trait;
use chrono::{DateTime, Utc};
use uuid::Uuid;

use crate::{
    common::error::AppError,
    models::{
        analytics::{NewPageView, PageCount, PageView},
        auth::{Admin, AdminSession},
        brochures::{Brochure, CreateBrochurePayload, UpdateBrochurePayload},
        leads::{CreateLeadPayload, Lead, LeadChanges, LeadStatus},
        portfolio::{CreatePortfolioPayload, PortfolioItem, UpdatePortfolioPayload},
        products::{CreateProductPayload, Product, UpdateProductPayload},
        seo::{SeoSettings, UpsertSeoPayload},
    },
};

pub type StorageResult<T> = Result<T, AppError>;

/// Typed CRUD over the seven tables of the site.
///
/// Lists and searches come back newest first. Searches match `term`
/// case-insensitively anywhere in the text columns of the row. `update_*`
/// and `delete_*` fail with [`AppError::NotFound`] when the row does not exist.
#[async_trait]
pub trait Storage: Send + Sync {
    /// Round-trip to the backing store, used by the health check.
    async fn ping(&self) -> StorageResult<()>;

    // --- Admins ---
    async fn get_admin(&self, id: Uuid) -> StorageResult<Option<Admin>>;
    async fn get_admin_by_username(&self, username: &str) -> StorageResult<Option<Admin>>;
    async fn create_admin(&self, username: &str, password_hash: &str) -> StorageResult<Admin>;

    // --- Sessions ---
    async fn create_session(&self, session: AdminSession) -> StorageResult<()>;
    async fn get_session(&self, token_hash: &str) -> StorageResult<Option<AdminSession>>;
    async fn delete_session(&self, token_hash: &str) -> StorageResult<()>;
    /// Returns how many sessions were removed.
    async fn delete_expired_sessions(&self, now: DateTime<Utc>) -> StorageResult<u64>;

    // --- Products ---
    async fn list_products(&self, category: Option<&str>) -> StorageResult<Vec<Product>>;
    async fn get_product(&self, id: Uuid) -> StorageResult<Option<Product>>;
    async fn create_product(&self, input: CreateProductPayload) -> StorageResult<Product>;
    async fn update_product(&self, id: Uuid, patch: UpdateProductPayload) -> StorageResult<Product>;
    async fn delete_product(&self, id: Uuid) -> StorageResult<()>;
    async fn count_products(&self) -> StorageResult<i64>;
    async fn search_products(&self, term: &str) -> StorageResult<Vec<Product>>;
    /// Distinct categories, ascending.
    async fn product_categories(&self) -> StorageResult<Vec<String>>;

    // --- Portfolio ---
    async fn list_portfolio(&self, category: Option<&str>) -> StorageResult<Vec<PortfolioItem>>;
    async fn get_portfolio_item(&self, id: Uuid) -> StorageResult<Option<PortfolioItem>>;
    async fn create_portfolio_item(&self, input: CreatePortfolioPayload) -> StorageResult<PortfolioItem>;
    async fn update_portfolio_item(
        &self,
        id: Uuid,
        patch: UpdatePortfolioPayload,
    ) -> StorageResult<PortfolioItem>;
    async fn delete_portfolio_item(&self, id: Uuid) -> StorageResult<()>;
    async fn count_portfolio(&self) -> StorageResult<i64>;
    async fn search_portfolio(&self, term: &str) -> StorageResult<Vec<PortfolioItem>>;
    /// Distinct non-null categories, ascending.
    async fn portfolio_categories(&self) -> StorageResult<Vec<String>>;

    // --- Leads ---
    async fn list_leads(&self, status: Option<LeadStatus>) -> StorageResult<Vec<Lead>>;
    async fn get_lead(&self, id: Uuid) -> StorageResult<Option<Lead>>;
    async fn create_lead(&self, input: CreateLeadPayload) -> StorageResult<Lead>;
    async fn update_lead_status(&self, id: Uuid, status: LeadStatus) -> StorageResult<Lead>;
    /// Absent fields are kept; an empty `phone` or `project_details` clears the column.
    async fn update_lead(&self, id: Uuid, changes: LeadChanges) -> StorageResult<Lead>;
    async fn delete_lead(&self, id: Uuid) -> StorageResult<()>;
    async fn count_leads(&self, status: Option<LeadStatus>) -> StorageResult<i64>;
    async fn search_leads(&self, term: &str) -> StorageResult<Vec<Lead>>;

    // --- SEO ---
    async fn list_seo_settings(&self) -> StorageResult<Vec<SeoSettings>>;
    async fn get_seo_settings(&self, page: &str) -> StorageResult<Option<SeoSettings>>;
    /// Inserts the page or replaces every field of the existing row.
    async fn upsert_seo_settings(&self, input: UpsertSeoPayload) -> StorageResult<SeoSettings>;
    async fn delete_seo_settings(&self, page: &str) -> StorageResult<()>;

    // --- Page views ---
    async fn create_page_view(&self, input: NewPageView) -> StorageResult<PageView>;
    async fn recent_page_views(&self, limit: i64) -> StorageResult<Vec<PageView>>;
    async fn page_views_for_page(
        &self,
        page: &str,
        since: Option<DateTime<Utc>>,
    ) -> StorageResult<Vec<PageView>>;
    async fn count_page_views(&self, since: Option<DateTime<Utc>>) -> StorageResult<i64>;
    /// Distinct user agents, the closest thing to a visitor we record.
    async fn count_unique_visitors(&self, since: Option<DateTime<Utc>>) -> StorageResult<i64>;
    /// Pages ranked by view count, highest first.
    async fn top_pages(&self, limit: i64, since: Option<DateTime<Utc>>) -> StorageResult<Vec<PageCount>>;
    /// Removes views recorded strictly before `cutoff`; returns how many went.
    async fn delete_page_views_before(&self, cutoff: DateTime<Utc>) -> StorageResult<u64>;

    // --- Brochures ---
    async fn list_brochures(&self) -> StorageResult<Vec<Brochure>>;
    async fn get_brochure(&self, id: Uuid) -> StorageResult<Option<Brochure>>;
    async fn create_brochure(&self, input: CreateBrochurePayload) -> StorageResult<Brochure>;
    async fn update_brochure(&self, id: Uuid, patch: UpdateBrochurePayload) -> StorageResult<Brochure>;
    async fn delete_brochure(&self, id: Uuid) -> StorageResult<()>;
    async fn count_brochures(&self) -> StorageResult<i64>;
    async fn search_brochures(&self, term: &str) -> StorageResult<Vec<Brochure>>;
}
