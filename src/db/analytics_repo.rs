// src/db/analytics_repo.rs

use chrono::{DateTime, Utc};
use sqlx::PgPool;

use crate::{
    common::{db_utils::blank_to_none, error::AppError},
    models::analytics::{NewPageView, PageCount, PageView},
};

// Reads and writes of the 'page_views' table
#[derive(Clone)]
pub struct AnalyticsRepository {
    pool: PgPool,
}

impl AnalyticsRepository {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }

    pub async fn insert_page_view(&self, input: NewPageView) -> Result<PageView, AppError> {
        let view = sqlx::query_as::<_, PageView>(
            r#"
            INSERT INTO page_views (page, user_agent, referrer)
            VALUES ($1, $2, $3)
            RETURNING *
            "#,
        )
        .bind(input.page)
        .bind(input.user_agent)
        .bind(blank_to_none(input.referrer))
        .fetch_one(&self.pool)
        .await?;
        Ok(view)
    }

    pub async fn recent(&self, limit: i64) -> Result<Vec<PageView>, AppError> {
        let views = sqlx::query_as::<_, PageView>(
            r#"SELECT * FROM page_views ORDER BY "timestamp" DESC LIMIT $1"#,
        )
        .bind(limit)
        .fetch_all(&self.pool)
        .await?;
        Ok(views)
    }

    pub async fn for_page(
        &self,
        page: &str,
        since: Option<DateTime<Utc>>,
    ) -> Result<Vec<PageView>, AppError> {
        let views = sqlx::query_as::<_, PageView>(
            r#"
            SELECT * FROM page_views
            WHERE page = $1
              AND ($2::timestamptz IS NULL OR "timestamp" >= $2)
            ORDER BY "timestamp" DESC
            "#,
        )
        .bind(page)
        .bind(since)
        .fetch_all(&self.pool)
        .await?;
        Ok(views)
    }

    pub async fn count(&self, since: Option<DateTime<Utc>>) -> Result<i64, AppError> {
        let count = sqlx::query_scalar::<_, i64>(
            r#"SELECT COUNT(*) FROM page_views WHERE ($1::timestamptz IS NULL OR "timestamp" >= $1)"#,
        )
        .bind(since)
        .fetch_one(&self.pool)
        .await?;
        Ok(count)
    }

    pub async fn count_unique_visitors(&self, since: Option<DateTime<Utc>>) -> Result<i64, AppError> {
        let count = sqlx::query_scalar::<_, i64>(
            r#"
            SELECT COUNT(DISTINCT user_agent) FROM page_views
            WHERE ($1::timestamptz IS NULL OR "timestamp" >= $1)
            "#,
        )
        .bind(since)
        .fetch_one(&self.pool)
        .await?;
        Ok(count)
    }

    pub async fn top_pages(
        &self,
        limit: i64,
        since: Option<DateTime<Utc>>,
    ) -> Result<Vec<PageCount>, AppError> {
        let pages = sqlx::query_as::<_, PageCount>(
            r#"
            SELECT page, COUNT(*) AS count
            FROM page_views
            WHERE ($2::timestamptz IS NULL OR "timestamp" >= $2)
            GROUP BY page
            ORDER BY count DESC, page ASC
            LIMIT $1
            "#,
        )
        .bind(limit)
        .bind(since)
        .fetch_all(&self.pool)
        .await?;
        Ok(pages)
    }

    pub async fn delete_before(&self, cutoff: DateTime<Utc>) -> Result<u64, AppError> {
        let result = sqlx::query(r#"DELETE FROM page_views WHERE "timestamp" < $1"#)
            .bind(cutoff)
            .execute(&self.pool)
            .await?;
        Ok(result.rows_affected())
    }
}
