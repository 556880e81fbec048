// src/handlers/seo.rs

use axum::{
    extract::State,
    http::StatusCode,
    response::IntoResponse,
    Json,
};
use validator::Validate;

use crate::{
    common::{error::AppError, extract::{AppJson, AppPath}},
    config::AppState,
    models::seo::{AdminSeoView, SeoPages, SeoSettings, UpdateSeoPayload, UpsertSeoPayload},
};

// GET /api/seo/{page}
#[utoipa::path(
    get,
    path = "/api/seo/{page}",
    tag = "SEO",
    params(("page" = String, Path, description = "Page key, e.g. home")),
    responses(
        (status = 200, description = "Metadata of the page", body = SeoSettings),
        (status = 404, description = "No settings for this page")
    )
)]
pub async fn get_seo(
    State(app_state): State<AppState>,
    AppPath(page): AppPath<String>,
) -> Result<impl IntoResponse, AppError> {
    let settings = app_state.seo_service.get(&page).await?;
    Ok((StatusCode::OK, Json(settings)))
}

// GET /api/admin/seo
#[utoipa::path(
    get,
    path = "/api/admin/seo",
    tag = "Admin SEO",
    responses(
        (status = 200, description = "Settings of every page", body = Vec<SeoSettings>)
    ),
    security(("session_cookie" = []))
)]
pub async fn list_seo(State(app_state): State<AppState>) -> Result<impl IntoResponse, AppError> {
    let settings = app_state.seo_service.list().await?;
    Ok((StatusCode::OK, Json(settings)))
}

// GET /api/admin/seo/pages
#[utoipa::path(
    get,
    path = "/api/admin/seo/pages",
    tag = "Admin SEO",
    responses(
        (status = 200, description = "Keys of the pages that have settings", body = SeoPages)
    ),
    security(("session_cookie" = []))
)]
pub async fn list_seo_pages(State(app_state): State<AppState>) -> Result<impl IntoResponse, AppError> {
    let pages = app_state.seo_service.pages().await?;
    Ok((StatusCode::OK, Json(pages)))
}

// GET /api/admin/seo/{page}
#[utoipa::path(
    get,
    path = "/api/admin/seo/{page}",
    tag = "Admin SEO",
    params(("page" = String, Path, description = "Page key")),
    responses(
        (status = 200, description = "Stored settings, or an empty form when the page has none", body = AdminSeoView)
    ),
    security(("session_cookie" = []))
)]
pub async fn get_seo_admin(
    State(app_state): State<AppState>,
    AppPath(page): AppPath<String>,
) -> Result<impl IntoResponse, AppError> {
    let view = app_state.seo_service.get_or_template(&page).await?;
    Ok((StatusCode::OK, Json(view)))
}

// POST /api/admin/seo
#[utoipa::path(
    post,
    path = "/api/admin/seo",
    tag = "Admin SEO",
    request_body = UpsertSeoPayload,
    responses(
        (status = 200, description = "Settings created or replaced", body = SeoSettings),
        (status = 400, description = "Invalid data")
    ),
    security(("session_cookie" = []))
)]
pub async fn upsert_seo(
    State(app_state): State<AppState>,
    AppJson(payload): AppJson<UpsertSeoPayload>,
) -> Result<impl IntoResponse, AppError> {
    payload.validate()?;

    let settings = app_state.seo_service.upsert(payload).await?;
    Ok((StatusCode::OK, Json(settings)))
}

// PUT /api/admin/seo/{page}
#[utoipa::path(
    put,
    path = "/api/admin/seo/{page}",
    tag = "Admin SEO",
    params(("page" = String, Path, description = "Page key")),
    request_body = UpdateSeoPayload,
    responses(
        (status = 200, description = "Settings updated", body = SeoSettings),
        (status = 400, description = "Invalid data"),
        (status = 404, description = "No settings for this page")
    ),
    security(("session_cookie" = []))
)]
pub async fn update_seo(
    State(app_state): State<AppState>,
    AppPath(page): AppPath<String>,
    AppJson(payload): AppJson<UpdateSeoPayload>,
) -> Result<impl IntoResponse, AppError> {
    payload.validate()?;

    let settings = app_state.seo_service.update(&page, payload).await?;
    Ok((StatusCode::OK, Json(settings)))
}

// DELETE /api/admin/seo/{page}
#[utoipa::path(
    delete,
    path = "/api/admin/seo/{page}",
    tag = "Admin SEO",
    params(("page" = String, Path, description = "Page key")),
    responses(
        (status = 204, description = "Settings deleted"),
        (status = 404, description = "No settings for this page")
    ),
    security(("session_cookie" = []))
)]
pub async fn delete_seo(
    State(app_state): State<AppState>,
    AppPath(page): AppPath<String>,
) -> Result<StatusCode, AppError> {
    app_state.seo_service.delete(&page).await?;
    Ok(StatusCode::NO_CONTENT)
}
