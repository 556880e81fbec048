// src/db/memory.rs

//! In-memory [`Storage`] for tests and database-less local runs.
//!
//! Rows live in insertion-ordered `Vec`s behind a single `RwLock`; the lock
//! is never held across an `.await`.

use std::{
    collections::{BTreeSet, HashMap, HashSet},
    sync::{Arc, PoisonError, RwLock, RwLockReadGuard, RwLockWriteGuard},
};

use async_trait::async_trait;
use chrono::{DateTime, Utc};
use uuid::Uuid;

use super::storage::{Storage, StorageResult};
use crate::{
    common::{
        db_utils::{apply_nullable, blank_to_none, contains_ci},
        error::AppError,
    },
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

#[derive(Default)]
struct Tables {
    admins: Vec<Admin>,
    sessions: HashMap<String, AdminSession>,
    products: Vec<Product>,
    portfolio: Vec<PortfolioItem>,
    leads: Vec<Lead>,
    seo_settings: Vec<SeoSettings>,
    page_views: Vec<PageView>,
    brochures: Vec<Brochure>,
}

#[derive(Clone, Default)]
pub struct MemoryStorage {
    tables: Arc<RwLock<Tables>>,
}

impl MemoryStorage {
    pub fn new() -> Self {
        Self::default()
    }

    /// Inserts a page view with an explicit timestamp, for analytics tests.
    pub fn insert_page_view_at(&self, input: NewPageView, timestamp: DateTime<Utc>) -> PageView {
        let view = PageView {
            id: Uuid::new_v4(),
            page: input.page,
            user_agent: Some(input.user_agent),
            referrer: blank_to_none(input.referrer),
            timestamp,
        };
        self.write().page_views.push(view.clone());
        view
    }

    fn read(&self) -> RwLockReadGuard<'_, Tables> {
        self.tables.read().unwrap_or_else(PoisonError::into_inner)
    }

    fn write(&self) -> RwLockWriteGuard<'_, Tables> {
        self.tables.write().unwrap_or_else(PoisonError::into_inner)
    }
}

/// Newest-first rows of `rows` for which `matches` holds against the lowercased term.
fn search_rows<T: Clone>(rows: &[T], term: &str, matches: impl Fn(&T, &str) -> bool) -> Vec<T> {
    let needle = term.to_lowercase();
    rows.iter().rev().filter(|row| matches(row, &needle)).cloned().collect()
}

fn since_filter(since: Option<DateTime<Utc>>) -> impl Fn(&&PageView) -> bool {
    move |view| since.is_none_or(|s| view.timestamp >= s)
}

#[async_trait]
impl Storage for MemoryStorage {
    async fn ping(&self) -> StorageResult<()> {
        Ok(())
    }

    // --- Admins ---

    async fn get_admin(&self, id: Uuid) -> StorageResult<Option<Admin>> {
        Ok(self.read().admins.iter().find(|a| a.id == id).cloned())
    }

    async fn get_admin_by_username(&self, username: &str) -> StorageResult<Option<Admin>> {
        Ok(self.read().admins.iter().find(|a| a.username == username).cloned())
    }

    async fn create_admin(&self, username: &str, password_hash: &str) -> StorageResult<Admin> {
        let mut tables = self.write();
        if tables.admins.iter().any(|a| a.username == username) {
            return Err(AppError::UsernameAlreadyExists);
        }

        let admin = Admin {
            id: Uuid::new_v4(),
            username: username.to_string(),
            password_hash: password_hash.to_string(),
            created_at: Utc::now(),
        };
        tables.admins.push(admin.clone());
        Ok(admin)
    }

    // --- Sessions ---

    async fn create_session(&self, session: AdminSession) -> StorageResult<()> {
        self.write().sessions.insert(session.token_hash.clone(), session);
        Ok(())
    }

    async fn get_session(&self, token_hash: &str) -> StorageResult<Option<AdminSession>> {
        Ok(self.read().sessions.get(token_hash).cloned())
    }

    async fn delete_session(&self, token_hash: &str) -> StorageResult<()> {
        self.write().sessions.remove(token_hash);
        Ok(())
    }

    async fn delete_expired_sessions(&self, now: DateTime<Utc>) -> StorageResult<u64> {
        let mut tables = self.write();
        let before = tables.sessions.len();
        tables.sessions.retain(|_, s| !s.is_expired(now));
        Ok((before - tables.sessions.len()) as u64)
    }

    // --- Products ---

    async fn list_products(&self, category: Option<&str>) -> StorageResult<Vec<Product>> {
        Ok(self
            .read()
            .products
            .iter()
            .rev()
            .filter(|p| category.is_none_or(|c| p.category == c))
            .cloned()
            .collect())
    }

    async fn get_product(&self, id: Uuid) -> StorageResult<Option<Product>> {
        Ok(self.read().products.iter().find(|p| p.id == id).cloned())
    }

    async fn create_product(&self, input: CreateProductPayload) -> StorageResult<Product> {
        let now = Utc::now();
        let product = Product {
            id: Uuid::new_v4(),
            category: input.category,
            name: input.name,
            description: input.description,
            image: blank_to_none(input.image),
            features: input.features,
            created_at: now,
            updated_at: now,
        };
        self.write().products.push(product.clone());
        Ok(product)
    }

    async fn update_product(&self, id: Uuid, patch: UpdateProductPayload) -> StorageResult<Product> {
        let mut tables = self.write();
        let product = tables
            .products
            .iter_mut()
            .find(|p| p.id == id)
            .ok_or(AppError::NotFound("Product"))?;

        if let Some(category) = patch.category {
            product.category = category;
        }
        if let Some(name) = patch.name {
            product.name = name;
        }
        if let Some(description) = patch.description {
            product.description = description;
        }
        apply_nullable(&mut product.image, patch.image);
        if let Some(features) = patch.features {
            product.features = features;
        }
        product.updated_at = Utc::now();

        Ok(product.clone())
    }

    async fn delete_product(&self, id: Uuid) -> StorageResult<()> {
        let mut tables = self.write();
        let before = tables.products.len();
        tables.products.retain(|p| p.id != id);
        if tables.products.len() == before {
            return Err(AppError::NotFound("Product"));
        }
        Ok(())
    }

    async fn count_products(&self) -> StorageResult<i64> {
        Ok(self.read().products.len() as i64)
    }

    async fn search_products(&self, term: &str) -> StorageResult<Vec<Product>> {
        Ok(search_rows(&self.read().products, term, |p, needle| {
            contains_ci(Some(p.name.as_str()), needle)
                || contains_ci(Some(p.description.as_str()), needle)
        }))
    }

    async fn product_categories(&self) -> StorageResult<Vec<String>> {
        let tables = self.read();
        let categories: BTreeSet<&str> = tables.products.iter().map(|p| p.category.as_str()).collect();
        Ok(categories.into_iter().map(str::to_owned).collect())
    }

    // --- Portfolio ---

    async fn list_portfolio(&self, category: Option<&str>) -> StorageResult<Vec<PortfolioItem>> {
        Ok(self
            .read()
            .portfolio
            .iter()
            .rev()
            .filter(|p| category.is_none_or(|c| p.category.as_deref() == Some(c)))
            .cloned()
            .collect())
    }

    async fn get_portfolio_item(&self, id: Uuid) -> StorageResult<Option<PortfolioItem>> {
        Ok(self.read().portfolio.iter().find(|p| p.id == id).cloned())
    }

    async fn create_portfolio_item(&self, input: CreatePortfolioPayload) -> StorageResult<PortfolioItem> {
        let now = Utc::now();
        let item = PortfolioItem {
            id: Uuid::new_v4(),
            title: input.title,
            description: blank_to_none(input.description),
            image: blank_to_none(input.image),
            client: blank_to_none(input.client),
            location: blank_to_none(input.location),
            category: blank_to_none(input.category),
            created_at: now,
            updated_at: now,
        };
        self.write().portfolio.push(item.clone());
        Ok(item)
    }

    async fn update_portfolio_item(
        &self,
        id: Uuid,
        patch: UpdatePortfolioPayload,
    ) -> StorageResult<PortfolioItem> {
        let mut tables = self.write();
        let item = tables
            .portfolio
            .iter_mut()
            .find(|p| p.id == id)
            .ok_or(AppError::NotFound("Portfolio item"))?;

        if let Some(title) = patch.title {
            item.title = title;
        }
        apply_nullable(&mut item.description, patch.description);
        apply_nullable(&mut item.image, patch.image);
        apply_nullable(&mut item.client, patch.client);
        apply_nullable(&mut item.location, patch.location);
        apply_nullable(&mut item.category, patch.category);
        item.updated_at = Utc::now();

        Ok(item.clone())
    }

    async fn delete_portfolio_item(&self, id: Uuid) -> StorageResult<()> {
        let mut tables = self.write();
        let before = tables.portfolio.len();
        tables.portfolio.retain(|p| p.id != id);
        if tables.portfolio.len() == before {
            return Err(AppError::NotFound("Portfolio item"));
        }
        Ok(())
    }

    async fn count_portfolio(&self) -> StorageResult<i64> {
        Ok(self.read().portfolio.len() as i64)
    }

    async fn search_portfolio(&self, term: &str) -> StorageResult<Vec<PortfolioItem>> {
        Ok(search_rows(&self.read().portfolio, term, |p, needle| {
            contains_ci(Some(p.title.as_str()), needle)
                || contains_ci(p.description.as_deref(), needle)
                || contains_ci(p.client.as_deref(), needle)
        }))
    }

    async fn portfolio_categories(&self) -> StorageResult<Vec<String>> {
        let tables = self.read();
        let categories: BTreeSet<&str> = tables
            .portfolio
            .iter()
            .filter_map(|p| p.category.as_deref())
            .collect();
        Ok(categories.into_iter().map(str::to_owned).collect())
    }

    // --- Leads ---

    async fn list_leads(&self, status: Option<LeadStatus>) -> StorageResult<Vec<Lead>> {
        Ok(self
            .read()
            .leads
            .iter()
            .rev()
            .filter(|l| status.is_none_or(|s| l.status == s))
            .cloned()
            .collect())
    }

    async fn get_lead(&self, id: Uuid) -> StorageResult<Option<Lead>> {
        Ok(self.read().leads.iter().find(|l| l.id == id).cloned())
    }

    async fn create_lead(&self, input: CreateLeadPayload) -> StorageResult<Lead> {
        let lead = Lead {
            id: Uuid::new_v4(),
            name: input.name,
            email: input.email,
            phone: blank_to_none(input.phone),
            project_details: Some(input.project_details),
            status: LeadStatus::New,
            created_at: Utc::now(),
        };
        self.write().leads.push(lead.clone());
        Ok(lead)
    }

    async fn update_lead_status(&self, id: Uuid, status: LeadStatus) -> StorageResult<Lead> {
        let mut tables = self.write();
        let lead = tables
            .leads
            .iter_mut()
            .find(|l| l.id == id)
            .ok_or(AppError::NotFound("Lead"))?;
        lead.status = status;
        Ok(lead.clone())
    }

    async fn update_lead(&self, id: Uuid, changes: LeadChanges) -> StorageResult<Lead> {
        let mut tables = self.write();
        let lead = tables
            .leads
            .iter_mut()
            .find(|l| l.id == id)
            .ok_or(AppError::NotFound("Lead"))?;

        if let Some(name) = changes.name {
            lead.name = name;
        }
        if let Some(email) = changes.email {
            lead.email = email;
        }
        apply_nullable(&mut lead.phone, changes.phone);
        apply_nullable(&mut lead.project_details, changes.project_details);
        if let Some(status) = changes.status {
            lead.status = status;
        }

        Ok(lead.clone())
    }

    async fn delete_lead(&self, id: Uuid) -> StorageResult<()> {
        let mut tables = self.write();
        let before = tables.leads.len();
        tables.leads.retain(|l| l.id != id);
        if tables.leads.len() == before {
            return Err(AppError::NotFound("Lead"));
        }
        Ok(())
    }

    async fn count_leads(&self, status: Option<LeadStatus>) -> StorageResult<i64> {
        Ok(self
            .read()
            .leads
            .iter()
            .filter(|l| status.is_none_or(|s| l.status == s))
            .count() as i64)
    }

    async fn search_leads(&self, term: &str) -> StorageResult<Vec<Lead>> {
        Ok(search_rows(&self.read().leads, term, |l, needle| {
            contains_ci(Some(l.name.as_str()), needle)
                || contains_ci(Some(l.email.as_str()), needle)
                || contains_ci(l.project_details.as_deref(), needle)
        }))
    }

    // --- SEO ---

    async fn list_seo_settings(&self) -> StorageResult<Vec<SeoSettings>> {
        let mut settings = self.read().seo_settings.clone();
        settings.sort_by(|a, b| a.page.cmp(&b.page));
        Ok(settings)
    }

    async fn get_seo_settings(&self, page: &str) -> StorageResult<Option<SeoSettings>> {
        Ok(self.read().seo_settings.iter().find(|s| s.page == page).cloned())
    }

    async fn upsert_seo_settings(&self, input: UpsertSeoPayload) -> StorageResult<SeoSettings> {
        let mut tables = self.write();
        let now = Utc::now();

        if let Some(existing) = tables.seo_settings.iter_mut().find(|s| s.page == input.page) {
            existing.title = input.title;
            existing.description = input.description;
            existing.og_title = blank_to_none(input.og_title);
            existing.og_description = blank_to_none(input.og_description);
            existing.keywords = input.keywords;
            existing.updated_at = now;
            return Ok(existing.clone());
        }

        let settings = SeoSettings {
            id: Uuid::new_v4(),
            page: input.page,
            title: input.title,
            description: input.description,
            og_title: blank_to_none(input.og_title),
            og_description: blank_to_none(input.og_description),
            keywords: input.keywords,
            updated_at: now,
        };
        tables.seo_settings.push(settings.clone());
        Ok(settings)
    }

    async fn delete_seo_settings(&self, page: &str) -> StorageResult<()> {
        let mut tables = self.write();
        let before = tables.seo_settings.len();
        tables.seo_settings.retain(|s| s.page != page);
        if tables.seo_settings.len() == before {
            return Err(AppError::NotFound("SEO settings"));
        }
        Ok(())
    }

    // --- Page views ---

    async fn create_page_view(&self, input: NewPageView) -> StorageResult<PageView> {
        Ok(self.insert_page_view_at(input, Utc::now()))
    }

    async fn recent_page_views(&self, limit: i64) -> StorageResult<Vec<PageView>> {
        let mut views = self.read().page_views.clone();
        views.sort_by(|a, b| b.timestamp.cmp(&a.timestamp));
        views.truncate(limit.max(0) as usize);
        Ok(views)
    }

    async fn page_views_for_page(
        &self,
        page: &str,
        since: Option<DateTime<Utc>>,
    ) -> StorageResult<Vec<PageView>> {
        let mut views: Vec<PageView> = self
            .read()
            .page_views
            .iter()
            .filter(|v| v.page == page)
            .filter(since_filter(since))
            .cloned()
            .collect();
        views.sort_by(|a, b| b.timestamp.cmp(&a.timestamp));
        Ok(views)
    }

    async fn count_page_views(&self, since: Option<DateTime<Utc>>) -> StorageResult<i64> {
        Ok(self.read().page_views.iter().filter(since_filter(since)).count() as i64)
    }

    async fn count_unique_visitors(&self, since: Option<DateTime<Utc>>) -> StorageResult<i64> {
        let tables = self.read();
        let agents: HashSet<&str> = tables
            .page_views
            .iter()
            .filter(since_filter(since))
            .filter_map(|v| v.user_agent.as_deref())
            .collect();
        Ok(agents.len() as i64)
    }

    async fn top_pages(&self, limit: i64, since: Option<DateTime<Utc>>) -> StorageResult<Vec<PageCount>> {
        let mut counts: HashMap<String, i64> = HashMap::new();
        for view in self.read().page_views.iter().filter(since_filter(since)) {
            *counts.entry(view.page.clone()).or_default() += 1;
        }

        let mut pages: Vec<PageCount> = counts
            .into_iter()
            .map(|(page, count)| PageCount { page, count })
            .collect();
        pages.sort_by(|a, b| b.count.cmp(&a.count).then_with(|| a.page.cmp(&b.page)));
        pages.truncate(limit.max(0) as usize);
        Ok(pages)
    }

    async fn delete_page_views_before(&self, cutoff: DateTime<Utc>) -> StorageResult<u64> {
        let mut tables = self.write();
        let before = tables.page_views.len();
        tables.page_views.retain(|v| v.timestamp >= cutoff);
        Ok((before - tables.page_views.len()) as u64)
    }

    // --- Brochures ---

    async fn list_brochures(&self) -> StorageResult<Vec<Brochure>> {
        Ok(self.read().brochures.iter().rev().cloned().collect())
    }

    async fn get_brochure(&self, id: Uuid) -> StorageResult<Option<Brochure>> {
        Ok(self.read().brochures.iter().find(|b| b.id == id).cloned())
    }

    async fn create_brochure(&self, input: CreateBrochurePayload) -> StorageResult<Brochure> {
        let now = Utc::now();
        let brochure = Brochure {
            id: Uuid::new_v4(),
            title: input.title,
            description: input.description,
            pdf_path: input.pdf_path,
            created_at: now,
            updated_at: now,
        };
        self.write().brochures.push(brochure.clone());
        Ok(brochure)
    }

    async fn update_brochure(&self, id: Uuid, patch: UpdateBrochurePayload) -> StorageResult<Brochure> {
        let mut tables = self.write();
        let brochure = tables
            .brochures
            .iter_mut()
            .find(|b| b.id == id)
            .ok_or(AppError::NotFound("Brochure"))?;

        if let Some(title) = patch.title {
            brochure.title = title;
        }
        if let Some(description) = patch.description {
            brochure.description = description;
        }
        if let Some(pdf_path) = patch.pdf_path {
            brochure.pdf_path = pdf_path;
        }
        brochure.updated_at = Utc::now();

        Ok(brochure.clone())
    }

    async fn delete_brochure(&self, id: Uuid) -> StorageResult<()> {
        let mut tables = self.write();
        let before = tables.brochures.len();
        tables.brochures.retain(|b| b.id != id);
        if tables.brochures.len() == before {
            return Err(AppError::NotFound("Brochure"));
        }
        Ok(())
    }

    async fn count_brochures(&self) -> StorageResult<i64> {
        Ok(self.read().brochures.len() as i64)
    }

    async fn search_brochures(&self, term: &str) -> StorageResult<Vec<Brochure>> {
        Ok(search_rows(&self.read().brochures, term, |b, needle| {
            contains_ci(Some(b.title.as_str()), needle)
                || contains_ci(Some(b.description.as_str()), needle)
        }))
    }
}
