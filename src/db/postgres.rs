// src/db/postgres.rs

use async_trait::async_trait;
use chrono::{DateTime, Utc};
use sqlx::PgPool;
use uuid::Uuid;

use super::{
    storage::{Storage, StorageResult},
    AdminRepository, AnalyticsRepository, BrochureRepository, LeadRepository, PortfolioRepository,
    ProductRepository, SeoRepository,
};
use crate::models::{
    analytics::{NewPageView, PageCount, PageView},
    auth::{Admin, AdminSession},
    brochures::{Brochure, CreateBrochurePayload, UpdateBrochurePayload},
    leads::{CreateLeadPayload, Lead, LeadChanges, LeadStatus},
    portfolio::{CreatePortfolioPayload, PortfolioItem, UpdatePortfolioPayload},
    products::{CreateProductPayload, Product, UpdateProductPayload},
    seo::{SeoSettings, UpsertSeoPayload},
};

/// Postgres-backed [`Storage`], one repository per table.
#[derive(Clone)]
pub struct PgStorage {
    pool: PgPool,
    admins: AdminRepository,
    products: ProductRepository,
    portfolio: PortfolioRepository,
    leads: LeadRepository,
    seo: SeoRepository,
    analytics: AnalyticsRepository,
    brochures: BrochureRepository,
}

impl PgStorage {
    pub fn new(pool: PgPool) -> Self {
        Self {
            admins: AdminRepository::new(pool.clone()),
            products: ProductRepository::new(pool.clone()),
            portfolio: PortfolioRepository::new(pool.clone()),
            leads: LeadRepository::new(pool.clone()),
            seo: SeoRepository::new(pool.clone()),
            analytics: AnalyticsRepository::new(pool.clone()),
            brochures: BrochureRepository::new(pool.clone()),
            pool,
        }
    }
}

#[async_trait]
impl Storage for PgStorage {
    async fn ping(&self) -> StorageResult<()> {
        sqlx::query("SELECT 1").execute(&self.pool).await?;
        Ok(())
    }

    async fn get_admin(&self, id: Uuid) -> StorageResult<Option<Admin>> {
        self.admins.find_by_id(id).await
    }

    async fn get_admin_by_username(&self, username: &str) -> StorageResult<Option<Admin>> {
        self.admins.find_by_username(username).await
    }

    async fn create_admin(&self, username: &str, password_hash: &str) -> StorageResult<Admin> {
        self.admins.create_admin(username, password_hash).await
    }

    async fn create_session(&self, session: AdminSession) -> StorageResult<()> {
        self.admins.insert_session(&session).await
    }

    async fn get_session(&self, token_hash: &str) -> StorageResult<Option<AdminSession>> {
        self.admins.find_session(token_hash).await
    }

    async fn delete_session(&self, token_hash: &str) -> StorageResult<()> {
        self.admins.delete_session(token_hash).await
    }

    async fn delete_expired_sessions(&self, now: DateTime<Utc>) -> StorageResult<u64> {
        self.admins.delete_expired_sessions(now).await
    }

    async fn list_products(&self, category: Option<&str>) -> StorageResult<Vec<Product>> {
        self.products.list(category).await
    }

    async fn get_product(&self, id: Uuid) -> StorageResult<Option<Product>> {
        self.products.find_by_id(id).await
    }

    async fn create_product(&self, input: CreateProductPayload) -> StorageResult<Product> {
        self.products.create(input).await
    }

    async fn update_product(&self, id: Uuid, patch: UpdateProductPayload) -> StorageResult<Product> {
        self.products.update(id, patch).await
    }

    async fn delete_product(&self, id: Uuid) -> StorageResult<()> {
        self.products.delete(id).await
    }

    async fn count_products(&self) -> StorageResult<i64> {
        self.products.count().await
    }

    async fn search_products(&self, term: &str) -> StorageResult<Vec<Product>> {
        self.products.search(term).await
    }

    async fn product_categories(&self) -> StorageResult<Vec<String>> {
        self.products.categories().await
    }

    async fn list_portfolio(&self, category: Option<&str>) -> StorageResult<Vec<PortfolioItem>> {
        self.portfolio.list(category).await
    }

    async fn get_portfolio_item(&self, id: Uuid) -> StorageResult<Option<PortfolioItem>> {
        self.portfolio.find_by_id(id).await
    }

    async fn create_portfolio_item(&self, input: CreatePortfolioPayload) -> StorageResult<PortfolioItem> {
        self.portfolio.create(input).await
    }

    async fn update_portfolio_item(
        &self,
        id: Uuid,
        patch: UpdatePortfolioPayload,
    ) -> StorageResult<PortfolioItem> {
        self.portfolio.update(id, patch).await
    }

    async fn delete_portfolio_item(&self, id: Uuid) -> StorageResult<()> {
        self.portfolio.delete(id).await
    }

    async fn count_portfolio(&self) -> StorageResult<i64> {
        self.portfolio.count().await
    }

    async fn search_portfolio(&self, term: &str) -> StorageResult<Vec<PortfolioItem>> {
        self.portfolio.search(term).await
    }

    async fn portfolio_categories(&self) -> StorageResult<Vec<String>> {
        self.portfolio.categories().await
    }

    async fn list_leads(&self, status: Option<LeadStatus>) -> StorageResult<Vec<Lead>> {
        self.leads.list(status).await
    }

    async fn get_lead(&self, id: Uuid) -> StorageResult<Option<Lead>> {
        self.leads.find_by_id(id).await
    }

    async fn create_lead(&self, input: CreateLeadPayload) -> StorageResult<Lead> {
        self.leads.create(input).await
    }

    async fn update_lead_status(&self, id: Uuid, status: LeadStatus) -> StorageResult<Lead> {
        self.leads.update_status(id, status).await
    }

    async fn update_lead(&self, id: Uuid, changes: LeadChanges) -> StorageResult<Lead> {
        self.leads.update(id, changes).await
    }

    async fn delete_lead(&self, id: Uuid) -> StorageResult<()> {
        self.leads.delete(id).await
    }

    async fn count_leads(&self, status: Option<LeadStatus>) -> StorageResult<i64> {
        self.leads.count(status).await
    }

    async fn search_leads(&self, term: &str) -> StorageResult<Vec<Lead>> {
        self.leads.search(term).await
    }

    async fn list_seo_settings(&self) -> StorageResult<Vec<SeoSettings>> {
        self.seo.list().await
    }

    async fn get_seo_settings(&self, page: &str) -> StorageResult<Option<SeoSettings>> {
        self.seo.find_by_page(page).await
    }

    async fn upsert_seo_settings(&self, input: UpsertSeoPayload) -> StorageResult<SeoSettings> {
        self.seo.upsert(input).await
    }

    async fn delete_seo_settings(&self, page: &str) -> StorageResult<()> {
        self.seo.delete(page).await
    }

    async fn create_page_view(&self, input: NewPageView) -> StorageResult<PageView> {
        self.analytics.insert_page_view(input).await
    }

    async fn recent_page_views(&self, limit: i64) -> StorageResult<Vec<PageView>> {
        self.analytics.recent(limit).await
    }

    async fn page_views_for_page(
        &self,
        page: &str,
        since: Option<DateTime<Utc>>,
    ) -> StorageResult<Vec<PageView>> {
        self.analytics.for_page(page, since).await
    }

    async fn count_page_views(&self, since: Option<DateTime<Utc>>) -> StorageResult<i64> {
        self.analytics.count(since).await
    }

    async fn count_unique_visitors(&self, since: Option<DateTime<Utc>>) -> StorageResult<i64> {
        self.analytics.count_unique_visitors(since).await
    }

    async fn top_pages(&self, limit: i64, since: Option<DateTime<Utc>>) -> StorageResult<Vec<PageCount>> {
        self.analytics.top_pages(limit, since).await
    }

    async fn delete_page_views_before(&self, cutoff: DateTime<Utc>) -> StorageResult<u64> {
        self.analytics.delete_before(cutoff).await
    }

    async fn list_brochures(&self) -> StorageResult<Vec<Brochure>> {
        self.brochures.list().await
    }

    async fn get_brochure(&self, id: Uuid) -> StorageResult<Option<Brochure>> {
        self.brochures.find_by_id(id).await
    }

    async fn create_brochure(&self, input: CreateBrochurePayload) -> StorageResult<Brochure> {
        self.brochures.create(input).await
    }

    async fn update_brochure(&self, id: Uuid, patch: UpdateBrochurePayload) -> StorageResult<Brochure> {
        self.brochures.update(id, patch).await
    }

    async fn delete_brochure(&self, id: Uuid) -> StorageResult<()> {
        self.brochures.delete(id).await
    }

    async fn count_brochures(&self) -> StorageResult<i64> {
        self.brochures.count().await
    }

    async fn search_brochures(&self, term: &str) -> StorageResult<Vec<Brochure>> {
        self.brochures.search(term).await
    }
}
