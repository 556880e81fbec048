// src/services/seo_service.rs

use std::sync::Arc;

use crate::{
    common::error::AppError,
    db::Storage,
    models::seo::{AdminSeoView, SeoPages, SeoSettings, SeoTemplate, UpdateSeoPayload, UpsertSeoPayload},
};

#[derive(Clone)]
pub struct SeoService {
    storage: Arc<dyn Storage>,
}

impl SeoService {
    pub fn new(storage: Arc<dyn Storage>) -> Self {
        Self { storage }
    }

    /// Public lookup: a page without settings is a 404.
    pub async fn get(&self, page: &str) -> Result<SeoSettings, AppError> {
        self.storage
            .get_seo_settings(page)
            .await?
            .ok_or(AppError::NotFound("SEO settings"))
    }

    /// Admin lookup: a page without settings yields an empty form.
    pub async fn get_or_template(&self, page: &str) -> Result<AdminSeoView, AppError> {
        Ok(match self.storage.get_seo_settings(page).await? {
            Some(settings) => AdminSeoView::Stored(settings),
            None => AdminSeoView::Empty(SeoTemplate::empty(page)),
        })
    }

    pub async fn list(&self) -> Result<Vec<SeoSettings>, AppError> {
        self.storage.list_seo_settings().await
    }

    pub async fn pages(&self) -> Result<SeoPages, AppError> {
        let settings = self.storage.list_seo_settings().await?;
        Ok(SeoPages {
            pages: settings.into_iter().map(|s| s.page).collect(),
        })
    }

    pub async fn upsert(&self, input: UpsertSeoPayload) -> Result<SeoSettings, AppError> {
        self.storage.upsert_seo_settings(input).await
    }

    /// Applies the given fields on top of the stored row of `page`.
    pub async fn update(&self, page: &str, patch: UpdateSeoPayload) -> Result<SeoSettings, AppError> {
        let existing = self.get(page).await?;
        self.storage.upsert_seo_settings(merge(existing, patch)).await
    }

    pub async fn delete(&self, page: &str) -> Result<(), AppError> {
        self.storage.delete_seo_settings(page).await
    }
}

fn merge(existing: SeoSettings, patch: UpdateSeoPayload) -> UpsertSeoPayload {
    UpsertSeoPayload {
        page: existing.page,
        title: patch.title.unwrap_or(existing.title),
        description: patch.description.unwrap_or(existing.description),
        og_title: patch.og_title.or(existing.og_title),
        og_description: patch.og_description.or(existing.og_description),
        keywords: patch.keywords.unwrap_or(existing.keywords),
    }
}
