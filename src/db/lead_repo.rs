// src/db/lead_repo.rs

use sqlx::PgPool;
use uuid::Uuid;

use crate::{
    common::{
        db_utils::{blank_to_none, like_pattern, nullable_patch},
        error::AppError,
    },
    models::leads::{CreateLeadPayload, Lead, LeadChanges, LeadStatus},
};

#[derive(Clone)]
pub struct LeadRepository {
    pool: PgPool,
}

impl LeadRepository {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }

    pub async fn list(&self, status: Option<LeadStatus>) -> Result<Vec<Lead>, AppError> {
        let leads = sqlx::query_as::<_, Lead>(
            r#"
            SELECT * FROM leads
            WHERE ($1::lead_status IS NULL OR status = $1)
            ORDER BY created_at DESC
            "#,
        )
        .bind(status)
        .fetch_all(&self.pool)
        .await?;
        Ok(leads)
    }

    pub async fn find_by_id(&self, id: Uuid) -> Result<Option<Lead>, AppError> {
        let lead = sqlx::query_as::<_, Lead>("SELECT * FROM leads WHERE id = $1")
            .bind(id)
            .fetch_optional(&self.pool)
            .await?;
        Ok(lead)
    }

    // New leads always start as 'new' (column default)
    pub async fn create(&self, input: CreateLeadPayload) -> Result<Lead, AppError> {
        let lead = sqlx::query_as::<_, Lead>(
            r#"
            INSERT INTO leads (name, email, phone, project_details)
            VALUES ($1, $2, $3, $4)
            RETURNING *
            "#,
        )
        .bind(input.name)
        .bind(input.email)
        .bind(blank_to_none(input.phone))
        .bind(input.project_details)
        .fetch_one(&self.pool)
        .await?;
        Ok(lead)
    }

    pub async fn update_status(&self, id: Uuid, status: LeadStatus) -> Result<Lead, AppError> {
        sqlx::query_as::<_, Lead>("UPDATE leads SET status = $2 WHERE id = $1 RETURNING *")
            .bind(id)
            .bind(status)
            .fetch_optional(&self.pool)
            .await?
            .ok_or(AppError::NotFound("Lead"))
    }

    pub async fn update(&self, id: Uuid, changes: LeadChanges) -> Result<Lead, AppError> {
        let (phone_touched, phone) = nullable_patch(changes.phone);
        let (details_touched, details) = nullable_patch(changes.project_details);

        sqlx::query_as::<_, Lead>(
            r#"
            UPDATE leads SET
                name = COALESCE($2, name),
                email = COALESCE($3, email),
                phone = CASE WHEN $4::boolean THEN $5::text ELSE phone END,
                project_details = CASE WHEN $6::boolean THEN $7::text ELSE project_details END,
                status = COALESCE($8::lead_status, status)
            WHERE id = $1
            RETURNING *
            "#,
        )
        .bind(id)
        .bind(changes.name)
        .bind(changes.email)
        .bind(phone_touched)
        .bind(phone)
        .bind(details_touched)
        .bind(details)
        .bind(changes.status)
        .fetch_optional(&self.pool)
        .await?
        .ok_or(AppError::NotFound("Lead"))
    }

    pub async fn delete(&self, id: Uuid) -> Result<(), AppError> {
        let result = sqlx::query("DELETE FROM leads WHERE id = $1")
            .bind(id)
            .execute(&self.pool)
            .await?;

        if result.rows_affected() == 0 {
            return Err(AppError::NotFound("Lead"));
        }
        Ok(())
    }

    pub async fn count(&self, status: Option<LeadStatus>) -> Result<i64, AppError> {
        let count = sqlx::query_scalar::<_, i64>(
            "SELECT COUNT(*) FROM leads WHERE ($1::lead_status IS NULL OR status = $1)",
        )
        .bind(status)
        .fetch_one(&self.pool)
        .await?;
        Ok(count)
    }

    pub async fn search(&self, term: &str) -> Result<Vec<Lead>, AppError> {
        let leads = sqlx::query_as::<_, Lead>(
            r#"
            SELECT * FROM leads
            WHERE name ILIKE $1 OR email ILIKE $1 OR project_details ILIKE $1
            ORDER BY created_at DESC
            "#,
        )
        .bind(like_pattern(term))
        .fetch_all(&self.pool)
        .await?;
        Ok(leads)
    }
}
