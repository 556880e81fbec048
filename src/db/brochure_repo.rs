// src/db/brochure_repo.rs

use sqlx::PgPool;
use uuid::Uuid;

use crate::{
    common::{db_utils::like_pattern, error::AppError},
    models::brochures::{Brochure, CreateBrochurePayload, UpdateBrochurePayload},
};

#[derive(Clone)]
pub struct BrochureRepository {
    pool: PgPool,
}

impl BrochureRepository {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }

    pub async fn list(&self) -> Result<Vec<Brochure>, AppError> {
        let brochures = sqlx::query_as::<_, Brochure>("SELECT * FROM brochures ORDER BY created_at DESC")
            .fetch_all(&self.pool)
            .await?;
        Ok(brochures)
    }

    pub async fn find_by_id(&self, id: Uuid) -> Result<Option<Brochure>, AppError> {
        let brochure = sqlx::query_as::<_, Brochure>("SELECT * FROM brochures WHERE id = $1")
            .bind(id)
            .fetch_optional(&self.pool)
            .await?;
        Ok(brochure)
    }

    pub async fn create(&self, input: CreateBrochurePayload) -> Result<Brochure, AppError> {
        let brochure = sqlx::query_as::<_, Brochure>(
            r#"
            INSERT INTO brochures (title, description, pdf_path)
            VALUES ($1, $2, $3)
            RETURNING *
            "#,
        )
        .bind(input.title)
        .bind(input.description)
        .bind(input.pdf_path)
        .fetch_one(&self.pool)
        .await?;
        Ok(brochure)
    }

    pub async fn update(&self, id: Uuid, patch: UpdateBrochurePayload) -> Result<Brochure, AppError> {
        sqlx::query_as::<_, Brochure>(
            r#"
            UPDATE brochures SET
                title = COALESCE($2, title),
                description = COALESCE($3, description),
                pdf_path = COALESCE($4, pdf_path),
                updated_at = NOW()
            WHERE id = $1
            RETURNING *
            "#,
        )
        .bind(id)
        .bind(patch.title)
        .bind(patch.description)
        .bind(patch.pdf_path)
        .fetch_optional(&self.pool)
        .await?
        .ok_or(AppError::NotFound("Brochure"))
    }

    pub async fn delete(&self, id: Uuid) -> Result<(), AppError> {
        let result = sqlx::query("DELETE FROM brochures WHERE id = $1")
            .bind(id)
            .execute(&self.pool)
            .await?;

        if result.rows_affected() == 0 {
            return Err(AppError::NotFound("Brochure"));
        }
        Ok(())
    }

    pub async fn count(&self) -> Result<i64, AppError> {
        let count = sqlx::query_scalar::<_, i64>("SELECT COUNT(*) FROM brochures")
            .fetch_one(&self.pool)
            .await?;
        Ok(count)
    }

    pub async fn search(&self, term: &str) -> Result<Vec<Brochure>, AppError> {
        let brochures = sqlx::query_as::<_, Brochure>(
            r#"
            SELECT * FROM brochures
            WHERE title ILIKE $1 OR description ILIKE $1
            ORDER BY created_at DESC
            "#,
        )
        .bind(like_pattern(term))
        .fetch_all(&self.pool)
        .await?;
        Ok(brochures)
    }
}
