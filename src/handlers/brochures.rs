// src/handlers/brochures.rs

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
        brochures::{Brochure, BrochureStats, CreateBrochurePayload, UpdateBrochurePayload},
        search::SearchQuery,
    },
};

// GET /api/brochures (also served under /api/admin/brochures)
#[utoipa::path(
    get,
    path = "/api/brochures",
    tag = "Catalog",
    responses(
        (status = 200, description = "Brochures, newest first", body = Vec<Brochure>)
    )
)]
pub async fn list_brochures(State(app_state): State<AppState>) -> Result<impl IntoResponse, AppError> {
    let brochures = app_state.storage.list_brochures().await?;
    Ok((StatusCode::OK, Json(brochures)))
}

// GET /api/brochures/search
#[utoipa::path(
    get,
    path = "/api/brochures/search",
    tag = "Catalog",
    params(SearchQuery),
    responses(
        (status = 200, description = "Brochures whose title or description contains `q`", body = Vec<Brochure>),
        (status = 400, description = "Missing or empty `q`")
    )
)]
pub async fn search_brochures(
    State(app_state): State<AppState>,
    AppQuery(query): AppQuery<SearchQuery>,
) -> Result<impl IntoResponse, AppError> {
    query.validate()?;

    let brochures = app_state.storage.search_brochures(&query.q).await?;
    Ok((StatusCode::OK, Json(brochures)))
}

// GET /api/admin/brochures/stats
#[utoipa::path(
    get,
    path = "/api/admin/brochures/stats",
    tag = "Admin Catalog",
    responses(
        (status = 200, description = "Number of brochures", body = BrochureStats)
    ),
    security(("session_cookie" = []))
)]
pub async fn brochure_stats(State(app_state): State<AppState>) -> Result<impl IntoResponse, AppError> {
    let total_brochures = app_state.storage.count_brochures().await?;
    Ok((StatusCode::OK, Json(BrochureStats { total_brochures })))
}

// GET /api/brochures/{id} (also served under /api/admin/brochures/{id})
#[utoipa::path(
    get,
    path = "/api/brochures/{id}",
    tag = "Catalog",
    params(("id" = Uuid, Path, description = "Brochure id")),
    responses(
        (status = 200, description = "The brochure", body = Brochure),
        (status = 400, description = "Malformed id"),
        (status = 404, description = "Brochure not found")
    )
)]
pub async fn get_brochure(
    State(app_state): State<AppState>,
    AppPath(id): AppPath<Uuid>,
) -> Result<impl IntoResponse, AppError> {
    let brochure = app_state
        .storage
        .get_brochure(id)
        .await?
        .ok_or(AppError::NotFound("Brochure"))?;
    Ok((StatusCode::OK, Json(brochure)))
}

// POST /api/admin/brochures
#[utoipa::path(
    post,
    path = "/api/admin/brochures",
    tag = "Admin Catalog",
    request_body = CreateBrochurePayload,
    responses(
        (status = 201, description = "Brochure created", body = Brochure),
        (status = 400, description = "Invalid data")
    ),
    security(("session_cookie" = []))
)]
pub async fn create_brochure(
    State(app_state): State<AppState>,
    AppJson(payload): AppJson<CreateBrochurePayload>,
) -> Result<impl IntoResponse, AppError> {
    payload.validate()?;

    let brochure = app_state.storage.create_brochure(payload).await?;
    tracing::info!(brochure_id = %brochure.id, "brochure created");

    Ok((StatusCode::CREATED, Json(brochure)))
}

// PUT /api/admin/brochures/{id}
#[utoipa::path(
    put,
    path = "/api/admin/brochures/{id}",
    tag = "Admin Catalog",
    params(("id" = Uuid, Path, description = "Brochure id")),
    request_body = UpdateBrochurePayload,
    responses(
        (status = 200, description = "Brochure updated", body = Brochure),
        (status = 400, description = "Invalid data"),
        (status = 404, description = "Brochure not found")
    ),
    security(("session_cookie" = []))
)]
pub async fn update_brochure(
    State(app_state): State<AppState>,
    AppPath(id): AppPath<Uuid>,
    AppJson(payload): AppJson<UpdateBrochurePayload>,
) -> Result<impl IntoResponse, AppError> {
    payload.validate()?;

    let brochure = app_state.storage.update_brochure(id, payload).await?;
    Ok((StatusCode::OK, Json(brochure)))
}

// DELETE /api/admin/brochures/{id}
#[utoipa::path(
    delete,
    path = "/api/admin/brochures/{id}",
    tag = "Admin Catalog",
    params(("id" = Uuid, Path, description = "Brochure id")),
    responses(
        (status = 204, description = "Brochure deleted"),
        (status = 404, description = "Brochure not found")
    ),
    security(("session_cookie" = []))
)]
pub async fn delete_brochure(
    State(app_state): State<AppState>,
    AppPath(id): AppPath<Uuid>,
) -> Result<StatusCode, AppError> {
    app_state.storage.delete_brochure(id).await?;
    tracing::info!(brochure_id = %id, "brochure deleted");
    Ok(StatusCode::NO_CONTENT)
}
