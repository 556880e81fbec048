// src/handlers/auth.rs

use axum::{extract::State, Json};
use axum_extra::extract::cookie::CookieJar;
use validator::Validate;

use crate::{
    common::{error::AppError, extract::AppJson},
    config::AppState,
    middleware::auth::{removal_cookie, session_cookie, AuthenticatedAdmin, SESSION_COOKIE},
    models::auth::{Admin, LoginPayload, LogoutResponse},
};

// POST /api/admin/login
#[utoipa::path(
    post,
    path = "/api/admin/login",
    tag = "Auth",
    request_body = LoginPayload,
    responses(
        (status = 200, description = "Logged in; the session cookie is set", body = Admin),
        (status = 400, description = "Invalid payload"),
        (status = 401, description = "Wrong username or password")
    )
)]
pub async fn login(
    State(app_state): State<AppState>,
    jar: CookieJar,
    AppJson(payload): AppJson<LoginPayload>,
) -> Result<(CookieJar, Json<Admin>), AppError> {
    payload.validate()?;

    let session = app_state
        .auth_service
        .login(&payload.username, &payload.password)
        .await?;

    let cookie = session_cookie(
        session.token,
        app_state.auth_service.session_ttl(),
        app_state.config.cookie_secure,
    );

    Ok((jar.add(cookie), Json(session.admin)))
}

// POST /api/admin/logout
#[utoipa::path(
    post,
    path = "/api/admin/logout",
    tag = "Auth",
    responses(
        (status = 200, description = "Session invalidated and cookie cleared", body = LogoutResponse)
    )
)]
pub async fn logout(
    State(app_state): State<AppState>,
    jar: CookieJar,
) -> Result<(CookieJar, Json<LogoutResponse>), AppError> {
    if let Some(cookie) = jar.get(SESSION_COOKIE) {
        app_state.auth_service.logout(cookie.value()).await?;
    }

    Ok((jar.remove(removal_cookie()), Json(LogoutResponse { success: true })))
}

// GET /api/admin/me
#[utoipa::path(
    get,
    path = "/api/admin/me",
    tag = "Auth",
    responses(
        (status = 200, description = "The logged-in admin", body = Admin),
        (status = 401, description = "No valid session")
    ),
    security(("session_cookie" = []))
)]
pub async fn me(AuthenticatedAdmin(admin): AuthenticatedAdmin) -> Json<Admin> {
    Json(admin)
}
