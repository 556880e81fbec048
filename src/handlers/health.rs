// src/handlers/health.rs

use std::time::Instant;

use axum::{extract::State, http::StatusCode, response::IntoResponse, Json};
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use utoipa::ToSchema;

use crate::config::AppState;

#[derive(Debug, Serialize, Deserialize, ToSchema)]
pub struct HealthResponse {
    pub status: String,
    pub timestamp: DateTime<Utc>,
    /// Seconds since the server started
    pub uptime: u64,
}

#[derive(Debug, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct DatabaseCheck {
    pub status: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub response_time: Option<u64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub error: Option<String>,
}

// GET /health
#[utoipa::path(
    get,
    path = "/health",
    tag = "Health",
    responses((status = 200, description = "The process is up", body = HealthResponse))
)]
pub async fn health(State(app_state): State<AppState>) -> Json<HealthResponse> {
    Json(HealthResponse {
        status: "ok".to_string(),
        timestamp: Utc::now(),
        uptime: app_state.started_at.elapsed().as_secs(),
    })
}

// GET /health/database
#[utoipa::path(
    get,
    path = "/health/database",
    tag = "Health",
    responses(
        (status = 200, description = "Storage answered", body = DatabaseCheck),
        (status = 503, description = "Storage unreachable", body = DatabaseCheck)
    )
)]
pub async fn health_database(State(app_state): State<AppState>) -> impl IntoResponse {
    let started = Instant::now();

    match app_state.storage.ping().await {
        Ok(()) => (
            StatusCode::OK,
            Json(DatabaseCheck {
                status: "healthy".to_string(),
                response_time: Some(started.elapsed().as_millis() as u64),
                error: None,
            }),
        ),
        Err(e) => {
            tracing::warn!("database health check failed: {}", e);
            (
                StatusCode::SERVICE_UNAVAILABLE,
                Json(DatabaseCheck {
                    status: "unhealthy".to_string(),
                    response_time: None,
                    error: Some(e.to_string()),
                }),
            )
        }
    }
}
