// src/handlers/portfolio.rs

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
        portfolio::{CreatePortfolioPayload, PortfolioItem, PortfolioQuery, UpdatePortfolioPayload},
        search::{CategoryList, SearchQuery},
    },
};

// GET /api/portfolio (also served under /api/admin/portfolio)
#[utoipa::path(
    get,
    path = "/api/portfolio",
    tag = "Catalog",
    params(PortfolioQuery),
    responses(
        (status = 200, description = "Portfolio items, newest first", body = Vec<PortfolioItem>)
    )
)]
pub async fn list_portfolio(
    State(app_state): State<AppState>,
    AppQuery(query): AppQuery<PortfolioQuery>,
) -> Result<impl IntoResponse, AppError> {
    let category = query.category.as_deref().filter(|c| !c.is_empty());
    let items = app_state.storage.list_portfolio(category).await?;
    Ok((StatusCode::OK, Json(items)))
}

// GET /api/portfolio/search
#[utoipa::path(
    get,
    path = "/api/portfolio/search",
    tag = "Catalog",
    params(SearchQuery),
    responses(
        (status = 200, description = "Items whose title, description or client contains `q`", body = Vec<PortfolioItem>),
        (status = 400, description = "Missing or empty `q`")
    )
)]
pub async fn search_portfolio(
    State(app_state): State<AppState>,
    AppQuery(query): AppQuery<SearchQuery>,
) -> Result<impl IntoResponse, AppError> {
    query.validate()?;

    let items = app_state.storage.search_portfolio(&query.q).await?;
    Ok((StatusCode::OK, Json(items)))
}

// GET /api/admin/portfolio/categories
#[utoipa::path(
    get,
    path = "/api/admin/portfolio/categories",
    tag = "Admin Catalog",
    responses(
        (status = 200, description = "Categories in use", body = CategoryList)
    ),
    security(("session_cookie" = []))
)]
pub async fn portfolio_categories(State(app_state): State<AppState>) -> Result<impl IntoResponse, AppError> {
    let categories = app_state.storage.portfolio_categories().await?;
    Ok((StatusCode::OK, Json(CategoryList { categories })))
}

// GET /api/portfolio/{id} (also served under /api/admin/portfolio/{id})
#[utoipa::path(
    get,
    path = "/api/portfolio/{id}",
    tag = "Catalog",
    params(("id" = Uuid, Path, description = "Portfolio item id")),
    responses(
        (status = 200, description = "The portfolio item", body = PortfolioItem),
        (status = 400, description = "Malformed id"),
        (status = 404, description = "Portfolio item not found")
    )
)]
pub async fn get_portfolio_item(
    State(app_state): State<AppState>,
    AppPath(id): AppPath<Uuid>,
) -> Result<impl IntoResponse, AppError> {
    let item = app_state
        .storage
        .get_portfolio_item(id)
        .await?
        .ok_or(AppError::NotFound("Portfolio item"))?;
    Ok((StatusCode::OK, Json(item)))
}

// POST /api/admin/portfolio
#[utoipa::path(
    post,
    path = "/api/admin/portfolio",
    tag = "Admin Catalog",
    request_body = CreatePortfolioPayload,
    responses(
        (status = 201, description = "Portfolio item created", body = PortfolioItem),
        (status = 400, description = "Invalid data")
    ),
    security(("session_cookie" = []))
)]
pub async fn create_portfolio_item(
    State(app_state): State<AppState>,
    AppJson(payload): AppJson<CreatePortfolioPayload>,
) -> Result<impl IntoResponse, AppError> {
    payload.validate()?;

    let item = app_state.storage.create_portfolio_item(payload).await?;
    tracing::info!(portfolio_id = %item.id, "portfolio item created");

    Ok((StatusCode::CREATED, Json(item)))
}

// PUT /api/admin/portfolio/{id}
#[utoipa::path(
    put,
    path = "/api/admin/portfolio/{id}",
    tag = "Admin Catalog",
    params(("id" = Uuid, Path, description = "Portfolio item id")),
    request_body = UpdatePortfolioPayload,
    responses(
        (status = 200, description = "Portfolio item updated", body = PortfolioItem),
        (status = 400, description = "Invalid data"),
        (status = 404, description = "Portfolio item not found")
    ),
    security(("session_cookie" = []))
)]
pub async fn update_portfolio_item(
    State(app_state): State<AppState>,
    AppPath(id): AppPath<Uuid>,
    AppJson(payload): AppJson<UpdatePortfolioPayload>,
) -> Result<impl IntoResponse, AppError> {
    payload.validate()?;

    let item = app_state.storage.update_portfolio_item(id, payload).await?;
    Ok((StatusCode::OK, Json(item)))
}

// DELETE /api/admin/portfolio/{id}
#[utoipa::path(
    delete,
    path = "/api/admin/portfolio/{id}",
    tag = "Admin Catalog",
    params(("id" = Uuid, Path, description = "Portfolio item id")),
    responses(
        (status = 204, description = "Portfolio item deleted"),
        (status = 404, description = "Portfolio item not found")
    ),
    security(("session_cookie" = []))
)]
pub async fn delete_portfolio_item(
    State(app_state): State<AppState>,
    AppPath(id): AppPath<Uuid>,
) -> Result<StatusCode, AppError> {
    app_state.storage.delete_portfolio_item(id).await?;
    tracing::info!(portfolio_id = %id, "portfolio item deleted");
    Ok(StatusCode::NO_CONTENT)
}
