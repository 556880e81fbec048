// src/db/product_repo.rs

use sqlx::PgPool;
use uuid::Uuid;

use crate::{
    common::{db_utils::{blank_to_none, like_pattern, nullable_patch}, error::AppError},
    models::products::{CreateProductPayload, Product, UpdateProductPayload},
};

#[derive(Clone)]
pub struct ProductRepository {
    pool: PgPool,
}

impl ProductRepository {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }

    pub async fn list(&self, category: Option<&str>) -> Result<Vec<Product>, AppError> {
        let products = sqlx::query_as::<_, Product>(
            r#"
            SELECT * FROM products
            WHERE ($1::varchar IS NULL OR category = $1)
            ORDER BY created_at DESC
            "#,
        )
        .bind(category)
        .fetch_all(&self.pool)
        .await?;
        Ok(products)
    }

    pub async fn find_by_id(&self, id: Uuid) -> Result<Option<Product>, AppError> {
        let product = sqlx::query_as::<_, Product>("SELECT * FROM products WHERE id = $1")
            .bind(id)
            .fetch_optional(&self.pool)
            .await?;
        Ok(product)
    }

    pub async fn create(&self, input: CreateProductPayload) -> Result<Product, AppError> {
        let product = sqlx::query_as::<_, Product>(
            r#"
            INSERT INTO products (category, name, description, image, features)
            VALUES ($1, $2, $3, $4, $5)
            RETURNING *
            "#,
        )
        .bind(input.category)
        .bind(input.name)
        .bind(input.description)
        .bind(blank_to_none(input.image))
        .bind(input.features)
        .fetch_one(&self.pool)
        .await?;
        Ok(product)
    }

    pub async fn update(&self, id: Uuid, patch: UpdateProductPayload) -> Result<Product, AppError> {
        let (image_touched, image) = nullable_patch(patch.image);

        sqlx::query_as::<_, Product>(
            r#"
            UPDATE products SET
                category = COALESCE($2, category),
                name = COALESCE($3, name),
                description = COALESCE($4, description),
                image = CASE WHEN $5::boolean THEN $6::text ELSE image END,
                features = COALESCE($7, features),
                updated_at = NOW()
            WHERE id = $1
            RETURNING *
            "#,
        )
        .bind(id)
        .bind(patch.category)
        .bind(patch.name)
        .bind(patch.description)
        .bind(image_touched)
        .bind(image)
        .bind(patch.features)
        .fetch_optional(&self.pool)
        .await?
        .ok_or(AppError::NotFound("Product"))
    }

    pub async fn delete(&self, id: Uuid) -> Result<(), AppError> {
        let result = sqlx::query("DELETE FROM products WHERE id = $1")
            .bind(id)
            .execute(&self.pool)
            .await?;

        if result.rows_affected() == 0 {
            return Err(AppError::NotFound("Product"));
        }
        Ok(())
    }

    pub async fn count(&self) -> Result<i64, AppError> {
        let count = sqlx::query_scalar::<_, i64>("SELECT COUNT(*) FROM products")
            .fetch_one(&self.pool)
            .await?;
        Ok(count)
    }

    pub async fn search(&self, term: &str) -> Result<Vec<Product>, AppError> {
        let products = sqlx::query_as::<_, Product>(
            r#"
            SELECT * FROM products
            WHERE name ILIKE $1 OR description ILIKE $1
            ORDER BY created_at DESC
            "#,
        )
        .bind(like_pattern(term))
        .fetch_all(&self.pool)
        .await?;
        Ok(products)
    }

    pub async fn categories(&self) -> Result<Vec<String>, AppError> {
        let categories =
            sqlx::query_scalar::<_, String>("SELECT DISTINCT category FROM products ORDER BY category")
                .fetch_all(&self.pool)
                .await?;
        Ok(categories)
    }
}
