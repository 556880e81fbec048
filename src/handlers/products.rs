// src/handlers/products.rs

use axum::{
    extract::State,
    http::StatusCode,
    response::IntoResponse,
    Json,
};
use uuid::Uuid;
use validator::Validate;

use crate::{
    common::{error::AppError, extract::{AppJson, AppPath, AppQuery}},
    config::AppState,
    models::{
        products::{CreateProductPayload, Product, ProductQuery, UpdateProductPayload},
        search::{CategoryList, SearchQuery},
    },
};

// GET /api/products
#[utoipa::path(
    get,
    path = "/api/products",
    tag = "Catalog",
    params(ProductQuery),
    responses(
        (status = 200, description = "Products, newest first", body = Vec<Product>)
    )
)]
pub async fn list_products(
    State(app_state): State<AppState>,
    AppQuery(query): AppQuery<ProductQuery>,
) -> Result<impl IntoResponse, AppError> {
    let category = query.category.as_deref().filter(|c| !c.is_empty());
    let products = app_state.storage.list_products(category).await?;
    Ok((StatusCode::OK, Json(products)))
}

// GET /api/products/{id} (also served under /api/admin/products/{id})
#[utoipa::path(
    get,
    path = "/api/products/{id}",
    tag = "Catalog",
    params(("id" = Uuid, Path, description = "Product id")),
    responses(
        (status = 200, description = "The product", body = Product),
        (status = 400, description = "Malformed id"),
        (status = 404, description = "Product not found")
    )
)]
pub async fn get_product(
    State(app_state): State<AppState>,
    AppPath(id): AppPath<Uuid>,
) -> Result<impl IntoResponse, AppError> {
    let product = app_state
        .storage
        .get_product(id)
        .await?
        .ok_or(AppError::NotFound("Product"))?;
    Ok((StatusCode::OK, Json(product)))
}

// GET /api/products/search
#[utoipa::path(
    get,
    path = "/api/products/search",
    tag = "Catalog",
    params(SearchQuery),
    responses(
        (status = 200, description = "Products whose name or description contains `q`", body = Vec<Product>),
        (status = 400, description = "Missing or empty `q`")
    )
)]
pub async fn search_products(
    State(app_state): State<AppState>,
    AppQuery(query): AppQuery<SearchQuery>,
) -> Result<impl IntoResponse, AppError> {
    query.validate()?;

    let products = app_state.storage.search_products(&query.q).await?;
    Ok((StatusCode::OK, Json(products)))
}

// GET /api/admin/products/categories
#[utoipa::path(
    get,
    path = "/api/admin/products/categories",
    tag = "Admin Catalog",
    responses(
        (status = 200, description = "Categories in use", body = CategoryList)
    ),
    security(("session_cookie" = []))
)]
pub async fn product_categories(State(app_state): State<AppState>) -> Result<impl IntoResponse, AppError> {
    let categories = app_state.storage.product_categories().await?;
    Ok((StatusCode::OK, Json(CategoryList { categories })))
}

// POST /api/admin/products
#[utoipa::path(
    post,
    path = "/api/admin/products",
    tag = "Admin Catalog",
    request_body = CreateProductPayload,
    responses(
        (status = 201, description = "Product created", body = Product),
        (status = 400, description = "Invalid data")
    ),
    security(("session_cookie" = []))
)]
pub async fn create_product(
    State(app_state): State<AppState>,
    AppJson(payload): AppJson<CreateProductPayload>,
) -> Result<impl IntoResponse, AppError> {
    payload.validate()?;

    let product = app_state.storage.create_product(payload).await?;
    tracing::info!(product_id = %product.id, "product created");

    Ok((StatusCode::CREATED, Json(product)))
}

// PUT /api/admin/products/{id}
#[utoipa::path(
    put,
    path = "/api/admin/products/{id}",
    tag = "Admin Catalog",
    params(("id" = Uuid, Path, description = "Product id")),
    request_body = UpdateProductPayload,
    responses(
        (status = 200, description = "Product updated", body = Product),
        (status = 400, description = "Invalid data"),
        (status = 404, description = "Product not found")
    ),
    security(("session_cookie" = []))
)]
pub async fn update_product(
    State(app_state): State<AppState>,
    AppPath(id): AppPath<Uuid>,
    AppJson(payload): AppJson<UpdateProductPayload>,
) -> Result<impl IntoResponse, AppError> {
    payload.validate()?;

    let product = app_state.storage.update_product(id, payload).await?;
    Ok((StatusCode::OK, Json(product)))
}

// DELETE /api/admin/products/{id}
#[utoipa::path(
    delete,
    path = "/api/admin/products/{id}",
    tag = "Admin Catalog",
    params(("id" = Uuid, Path, description = "Product id")),
    responses(
        (status = 204, description = "Product deleted"),
        (status = 404, description = "Product not found")
    ),
    security(("session_cookie" = []))
)]
pub async fn delete_product(
    State(app_state): State<AppState>,
    AppPath(id): AppPath<Uuid>,
) -> Result<StatusCode, AppError> {
    app_state.storage.delete_product(id).await?;
    tracing::info!(product_id = %id, "product deleted");
    Ok(StatusCode::NO_CONTENT)
}
