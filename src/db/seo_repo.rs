// src/db/seo_repo.rs

use sqlx::PgPool;

use crate::{
    common::{db_utils::blank_to_none, error::AppError},
    models::seo::{SeoSettings, UpsertSeoPayload},
};

#[derive(Clone)]
pub struct SeoRepository {
    pool: PgPool,
}

impl SeoRepository {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }

    pub async fn list(&self) -> Result<Vec<SeoSettings>, AppError> {
        let settings = sqlx::query_as::<_, SeoSettings>("SELECT * FROM seo_settings ORDER BY page ASC")
            .fetch_all(&self.pool)
            .await?;
        Ok(settings)
    }

    pub async fn find_by_page(&self, page: &str) -> Result<Option<SeoSettings>, AppError> {
        let settings = sqlx::query_as::<_, SeoSettings>("SELECT * FROM seo_settings WHERE page = $1")
            .bind(page)
            .fetch_optional(&self.pool)
            .await?;
        Ok(settings)
    }

    // UPSERT keyed on the unique page column
    pub async fn upsert(&self, input: UpsertSeoPayload) -> Result<SeoSettings, AppError> {
        let settings = sqlx::query_as::<_, SeoSettings>(
            r#"
            INSERT INTO seo_settings (page, title, description, og_title, og_description, keywords)
            VALUES ($1, $2, $3, $4, $5, $6)
            ON CONFLICT (page)
            DO UPDATE SET
                title = EXCLUDED.title,
                description = EXCLUDED.description,
                og_title = EXCLUDED.og_title,
                og_description = EXCLUDED.og_description,
                keywords = EXCLUDED.keywords,
                updated_at = NOW()
            RETURNING *
            "#,
        )
        .bind(input.page)
        .bind(input.title)
        .bind(input.description)
        .bind(blank_to_none(input.og_title))
        .bind(blank_to_none(input.og_description))
        .bind(input.keywords)
        .fetch_one(&self.pool)
        .await?;
        Ok(settings)
    }

    pub async fn delete(&self, page: &str) -> Result<(), AppError> {
        let result = sqlx::query("DELETE FROM seo_settings WHERE page = $1")
            .bind(page)
            .execute(&self.pool)
            .await?;

        if result.rows_affected() == 0 {
            return Err(AppError::NotFound("SEO settings"));
        }
        Ok(())
    }
}
