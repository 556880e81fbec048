// src/handlers/analytics.rs

use axum::{
    extract::State,
    http::{HeaderMap, StatusCode, header::USER_AGENT},
    response::IntoResponse,
    Json,
};
use validator::Validate;

use crate::{
    common::{error::AppError, extract::{AppJson, AppQuery}},
    config::AppState,
    models::analytics::{
        AnalyticsOverview, AnalyticsQuery, AnalyticsStats, CleanupQuery, CleanupResult, NewPageView,
        PageView, PageViewPayload, PageViewsReport, UniqueVisitors,
    },
    services::analytics_service::DEFAULT_DAYS_TO_KEEP,
};

// POST /api/pageview
#[utoipa::path(
    post,
    path = "/api/pageview",
    tag = "Analytics",
    request_body = PageViewPayload,
    responses(
        (status = 201, description = "Page view recorded", body = PageView),
        (status = 400, description = "Invalid data")
    )
)]
pub async fn track_page_view(
    State(app_state): State<AppState>,
    headers: HeaderMap,
    AppJson(payload): AppJson<PageViewPayload>,
) -> Result<impl IntoResponse, AppError> {
    payload.validate()?;

    let user_agent = payload
        .user_agent
        .filter(|ua| !ua.is_empty())
        .or_else(|| {
            headers
                .get(USER_AGENT)
                .and_then(|value| value.to_str().ok())
                .map(str::to_owned)
        })
        .ok_or_else(|| AppError::BadRequest("userAgent is required.".to_string()))?;

    let view = app_state
        .analytics_service
        .track(NewPageView {
            page: payload.page,
            user_agent,
            referrer: payload.referrer,
        })
        .await?;

    Ok((StatusCode::CREATED, Json(view)))
}

// GET /api/analytics/stats
#[utoipa::path(
    get,
    path = "/api/analytics/stats",
    tag = "Admin Analytics",
    responses(
        (status = 200, description = "Dashboard counters", body = AnalyticsStats)
    ),
    security(("session_cookie" = []))
)]
pub async fn get_stats(State(app_state): State<AppState>) -> Result<impl IntoResponse, AppError> {
    let stats = app_state.analytics_service.stats().await?;
    Ok((StatusCode::OK, Json(stats)))
}

// GET /api/analytics/page-views
#[utoipa::path(
    get,
    path = "/api/analytics/page-views",
    tag = "Admin Analytics",
    responses(
        (status = 200, description = "The 50 most recent page views", body = Vec<PageView>)
    ),
    security(("session_cookie" = []))
)]
pub async fn recent_page_views(State(app_state): State<AppState>) -> Result<impl IntoResponse, AppError> {
    let views = app_state.analytics_service.recent().await?;
    Ok((StatusCode::OK, Json(views)))
}

// GET /api/admin/analytics/overview
#[utoipa::path(
    get,
    path = "/api/admin/analytics/overview",
    tag = "Admin Analytics",
    params(AnalyticsQuery),
    responses(
        (status = 200, description = "Totals and the top 10 pages", body = AnalyticsOverview),
        (status = 400, description = "Invalid 'since'")
    ),
    security(("session_cookie" = []))
)]
pub async fn get_overview(
    State(app_state): State<AppState>,
    AppQuery(query): AppQuery<AnalyticsQuery>,
) -> Result<impl IntoResponse, AppError> {
    let overview = app_state
        .analytics_service
        .overview(query.since.as_deref().filter(|s| !s.is_empty()))
        .await?;
    Ok((StatusCode::OK, Json(overview)))
}

// GET /api/admin/analytics/pageviews
#[utoipa::path(
    get,
    path = "/api/admin/analytics/pageviews",
    tag = "Admin Analytics",
    params(AnalyticsQuery),
    responses(
        (status = 200, description = "Views of `page`, or the top 20 pages when no page is given", body = PageViewsReport),
        (status = 400, description = "Invalid 'since'")
    ),
    security(("session_cookie" = []))
)]
pub async fn get_page_views(
    State(app_state): State<AppState>,
    AppQuery(query): AppQuery<AnalyticsQuery>,
) -> Result<impl IntoResponse, AppError> {
    let report = app_state
        .analytics_service
        .page_views(
            query.page.as_deref().filter(|p| !p.is_empty()),
            query.since.as_deref().filter(|s| !s.is_empty()),
        )
        .await?;
    Ok((StatusCode::OK, Json(report)))
}

// GET /api/admin/analytics/unique-visitors
#[utoipa::path(
    get,
    path = "/api/admin/analytics/unique-visitors",
    tag = "Admin Analytics",
    params(AnalyticsQuery),
    responses(
        (status = 200, description = "Distinct user agents seen", body = UniqueVisitors),
        (status = 400, description = "Invalid 'since'")
    ),
    security(("session_cookie" = []))
)]
pub async fn get_unique_visitors(
    State(app_state): State<AppState>,
    AppQuery(query): AppQuery<AnalyticsQuery>,
) -> Result<impl IntoResponse, AppError> {
    let visitors = app_state
        .analytics_service
        .unique_visitors(query.since.as_deref().filter(|s| !s.is_empty()))
        .await?;
    Ok((StatusCode::OK, Json(visitors)))
}

// POST /api/admin/analytics/cleanup
#[utoipa::path(
    post,
    path = "/api/admin/analytics/cleanup",
    tag = "Admin Analytics",
    params(CleanupQuery),
    responses(
        (status = 200, description = "Older page views deleted", body = CleanupResult),
        (status = 400, description = "Invalid days_to_keep")
    ),
    security(("session_cookie" = []))
)]
pub async fn cleanup_page_views(
    State(app_state): State<AppState>,
    AppQuery(query): AppQuery<CleanupQuery>,
) -> Result<impl IntoResponse, AppError> {
    query.validate()?;

    let result = app_state
        .analytics_service
        .cleanup(query.days_to_keep.unwrap_or(DEFAULT_DAYS_TO_KEEP))
        .await?;
    Ok((StatusCode::OK, Json(result)))
}
