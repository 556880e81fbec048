// src/handlers/leads.rs

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
        leads::{CreateLeadPayload, Lead, LeadQuery, LeadStats, UpdateLeadPayload, UpdateLeadStatusPayload},
        search::SearchQuery,
    },
};

// POST /api/leads (public contact form)
#[utoipa::path(
    post,
    path = "/api/leads",
    tag = "Leads",
    request_body = CreateLeadPayload,
    responses(
        (status = 201, description = "Lead recorded", body = Lead),
        (status = 400, description = "Invalid data")
    )
)]
pub async fn submit_lead(
    State(app_state): State<AppState>,
    AppJson(payload): AppJson<CreateLeadPayload>,
) -> Result<impl IntoResponse, AppError> {
    payload.validate()?;

    let lead = app_state.lead_service.submit(payload).await?;
    Ok((StatusCode::CREATED, Json(lead)))
}

// GET /api/admin/leads
#[utoipa::path(
    get,
    path = "/api/admin/leads",
    tag = "Admin Leads",
    params(LeadQuery),
    responses(
        (status = 200, description = "Leads, newest first", body = Vec<Lead>),
        (status = 400, description = "Unknown status filter")
    ),
    security(("session_cookie" = []))
)]
pub async fn list_leads(
    State(app_state): State<AppState>,
    AppQuery(query): AppQuery<LeadQuery>,
) -> Result<impl IntoResponse, AppError> {
    let status = query.status.as_deref().filter(|s| !s.is_empty());
    let leads = app_state.lead_service.list(status).await?;
    Ok((StatusCode::OK, Json(leads)))
}

// GET /api/admin/leads/{id}
#[utoipa::path(
    get,
    path = "/api/admin/leads/{id}",
    tag = "Admin Leads",
    params(("id" = Uuid, Path, description = "Lead id")),
    responses(
        (status = 200, description = "The lead", body = Lead),
        (status = 404, description = "Lead not found")
    ),
    security(("session_cookie" = []))
)]
pub async fn get_lead(
    State(app_state): State<AppState>,
    AppPath(id): AppPath<Uuid>,
) -> Result<impl IntoResponse, AppError> {
    let lead = app_state.lead_service.get(id).await?;
    Ok((StatusCode::OK, Json(lead)))
}

// GET /api/admin/leads/stats
#[utoipa::path(
    get,
    path = "/api/admin/leads/stats",
    tag = "Admin Leads",
    responses(
        (status = 200, description = "Lead counters per status", body = LeadStats)
    ),
    security(("session_cookie" = []))
)]
pub async fn lead_stats(State(app_state): State<AppState>) -> Result<impl IntoResponse, AppError> {
    let stats = app_state.lead_service.stats().await?;
    Ok((StatusCode::OK, Json(stats)))
}

// GET /api/admin/leads/search
#[utoipa::path(
    get,
    path = "/api/admin/leads/search",
    tag = "Admin Leads",
    params(SearchQuery),
    responses(
        (status = 200, description = "Leads whose name, e-mail or project details contain `q`", body = Vec<Lead>),
        (status = 400, description = "Missing or empty `q`")
    ),
    security(("session_cookie" = []))
)]
pub async fn search_leads(
    State(app_state): State<AppState>,
    AppQuery(query): AppQuery<SearchQuery>,
) -> Result<impl IntoResponse, AppError> {
    query.validate()?;

    let leads = app_state.lead_service.search(&query.q).await?;
    Ok((StatusCode::OK, Json(leads)))
}

// PUT /api/admin/leads/{id}
#[utoipa::path(
    put,
    path = "/api/admin/leads/{id}",
    tag = "Admin Leads",
    params(("id" = Uuid, Path, description = "Lead id")),
    request_body = UpdateLeadPayload,
    responses(
        (status = 200, description = "Lead updated", body = Lead),
        (status = 400, description = "Invalid data or unknown status"),
        (status = 404, description = "Lead not found")
    ),
    security(("session_cookie" = []))
)]
pub async fn update_lead(
    State(app_state): State<AppState>,
    AppPath(id): AppPath<Uuid>,
    AppJson(payload): AppJson<UpdateLeadPayload>,
) -> Result<impl IntoResponse, AppError> {
    payload.validate()?;

    let lead = app_state.lead_service.update(id, payload).await?;
    tracing::info!(lead_id = %id, "lead updated");
    Ok((StatusCode::OK, Json(lead)))
}

// PUT /api/admin/leads/{id}/status
#[utoipa::path(
    put,
    path = "/api/admin/leads/{id}/status",
    tag = "Admin Leads",
    params(("id" = Uuid, Path, description = "Lead id")),
    request_body = UpdateLeadStatusPayload,
    responses(
        (status = 200, description = "Status changed", body = Lead),
        (status = 400, description = "Unknown status"),
        (status = 404, description = "Lead not found")
    ),
    security(("session_cookie" = []))
)]
pub async fn update_lead_status(
    State(app_state): State<AppState>,
    AppPath(id): AppPath<Uuid>,
    AppJson(payload): AppJson<UpdateLeadStatusPayload>,
) -> Result<impl IntoResponse, AppError> {
    let lead = app_state.lead_service.update_status(id, &payload.status).await?;
    tracing::info!(lead_id = %id, status = %lead.status, "lead status changed");
    Ok((StatusCode::OK, Json(lead)))
}

// DELETE /api/admin/leads/{id}
#[utoipa::path(
    delete,
    path = "/api/admin/leads/{id}",
    tag = "Admin Leads",
    params(("id" = Uuid, Path, description = "Lead id")),
    responses(
        (status = 204, description = "Lead deleted"),
        (status = 404, description = "Lead not found")
    ),
    security(("session_cookie" = []))
)]
pub async fn delete_lead(
    State(app_state): State<AppState>,
    AppPath(id): AppPath<Uuid>,
) -> Result<StatusCode, AppError> {
    app_state.lead_service.delete(id).await?;
    Ok(StatusCode::NO_CONTENT)
}
