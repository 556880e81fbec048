// src/db/portfolio_repo.rs

use sqlx::PgPool;
use uuid::Uuid;

use crate::{
    common::{db_utils::{blank_to_none, like_pattern, nullable_patch}, error::AppError},
    models::portfolio::{CreatePortfolioPayload, PortfolioItem, UpdatePortfolioPayload},
};

#[derive(Clone)]
pub struct PortfolioRepository {
    pool: PgPool,
}

impl PortfolioRepository {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }

    pub async fn list(&self, category: Option<&str>) -> Result<Vec<PortfolioItem>, AppError> {
        let items = sqlx::query_as::<_, PortfolioItem>(
            r#"
            SELECT * FROM portfolio
            WHERE ($1::varchar IS NULL OR category = $1)
            ORDER BY created_at DESC
            "#,
        )
        .bind(category)
        .fetch_all(&self.pool)
        .await?;
        Ok(items)
    }

    pub async fn find_by_id(&self, id: Uuid) -> Result<Option<PortfolioItem>, AppError> {
        let item = sqlx::query_as::<_, PortfolioItem>("SELECT * FROM portfolio WHERE id = $1")
            .bind(id)
            .fetch_optional(&self.pool)
            .await?;
        Ok(item)
    }

    pub async fn create(&self, input: CreatePortfolioPayload) -> Result<PortfolioItem, AppError> {
        let item = sqlx::query_as::<_, PortfolioItem>(
            r#"
            INSERT INTO portfolio (title, description, image, client, location, category)
            VALUES ($1, $2, $3, $4, $5, $6)
            RETURNING *
            "#,
        )
        .bind(input.title)
        .bind(blank_to_none(input.description))
        .bind(blank_to_none(input.image))
        .bind(blank_to_none(input.client))
        .bind(blank_to_none(input.location))
        .bind(blank_to_none(input.category))
        .fetch_one(&self.pool)
        .await?;
        Ok(item)
    }

    pub async fn update(&self, id: Uuid, patch: UpdatePortfolioPayload) -> Result<PortfolioItem, AppError> {
        let (description_touched, description) = nullable_patch(patch.description);
        let (image_touched, image) = nullable_patch(patch.image);
        let (client_touched, client) = nullable_patch(patch.client);
        let (location_touched, location) = nullable_patch(patch.location);
        let (category_touched, category) = nullable_patch(patch.category);

        sqlx::query_as::<_, PortfolioItem>(
            r#"
            UPDATE portfolio SET
                title = COALESCE($2, title),
                description = CASE WHEN $3::boolean THEN $4::text ELSE description END,
                image = CASE WHEN $5::boolean THEN $6::text ELSE image END,
                client = CASE WHEN $7::boolean THEN $8::text ELSE client END,
                location = CASE WHEN $9::boolean THEN $10::text ELSE location END,
                category = CASE WHEN $11::boolean THEN $12::text ELSE category END,
                updated_at = NOW()
            WHERE id = $1
            RETURNING *
            "#,
        )
        .bind(id)
        .bind(patch.title)
        .bind(description_touched)
        .bind(description)
        .bind(image_touched)
        .bind(image)
        .bind(client_touched)
        .bind(client)
        .bind(location_touched)
        .bind(location)
        .bind(category_touched)
        .bind(category)
        .fetch_optional(&self.pool)
        .await?
        .ok_or(AppError::NotFound("Portfolio item"))
    }

    pub async fn delete(&self, id: Uuid) -> Result<(), AppError> {
        let result = sqlx::query("DELETE FROM portfolio WHERE id = $1")
            .bind(id)
            .execute(&self.pool)
            .await?;

        if result.rows_affected() == 0 {
            return Err(AppError::NotFound("Portfolio item"));
        }
        Ok(())
    }

    pub async fn count(&self) -> Result<i64, AppError> {
        let count = sqlx::query_scalar::<_, i64>("SELECT COUNT(*) FROM portfolio")
            .fetch_one(&self.pool)
            .await?;
        Ok(count)
    }

    pub async fn search(&self, term: &str) -> Result<Vec<PortfolioItem>, AppError> {
        let items = sqlx::query_as::<_, PortfolioItem>(
            r#"
            SELECT * FROM portfolio
            WHERE title ILIKE $1 OR description ILIKE $1 OR client ILIKE $1
            ORDER BY created_at DESC
            "#,
        )
        .bind(like_pattern(term))
        .fetch_all(&self.pool)
        .await?;
        Ok(items)
    }

    pub async fn categories(&self) -> Result<Vec<String>, AppError> {
        let categories = sqlx::query_scalar::<_, String>(
            "SELECT DISTINCT category FROM portfolio WHERE category IS NOT NULL ORDER BY category",
        )
        .fetch_all(&self.pool)
        .await?;
        Ok(categories)
    }
}
