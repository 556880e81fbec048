// src/lib.rs

use axum::{
    http::{HeaderValue, Method, header},
    middleware as axum_middleware,
    routing::{get, post, put},
    Router,
};
use tokio::net::TcpListener;
use tower_http::{cors::CorsLayer, trace::TraceLayer};
use tracing_subscriber::EnvFilter;
use utoipa::OpenApi;

pub mod common;
pub mod config;
pub mod db;
pub mod docs;
pub mod handlers;
pub mod middleware;
pub mod models;
pub mod services;

use crate::config::{AppState, Config};
use crate::docs::ApiDoc;
use crate::middleware::auth::auth_guard;

const DEV_ORIGINS: [&str; 2] = ["http://localhost:5173", "http://localhost:3000"];

/// Builds the full router: public site API, admin API behind the session guard, health and docs.
pub fn create_app(app_state: AppState) -> Router {
    let public_routes = Router::new()
        .route("/products", get(handlers::products::list_products))
        .route("/products/search", get(handlers::products::search_products))
        .route("/products/{id}", get(handlers::products::get_product))
        .route("/portfolio", get(handlers::portfolio::list_portfolio))
        .route("/portfolio/search", get(handlers::portfolio::search_portfolio))
        .route("/portfolio/{id}", get(handlers::portfolio::get_portfolio_item))
        .route("/brochures", get(handlers::brochures::list_brochures))
        .route("/brochures/search", get(handlers::brochures::search_brochures))
        .route("/brochures/{id}", get(handlers::brochures::get_brochure))
        .route("/leads", post(handlers::leads::submit_lead))
        .route("/seo/{page}", get(handlers::seo::get_seo))
        .route("/pageview", post(handlers::analytics::track_page_view));

    let session_routes = Router::new()
        .route("/login", post(handlers::auth::login))
        .route("/logout", post(handlers::auth::logout));

    let admin_routes = Router::new()
        .route("/me", get(handlers::auth::me))
        .route(
            "/products",
            get(handlers::products::list_products).post(handlers::products::create_product),
        )
        .route("/products/categories", get(handlers::products::product_categories))
        .route(
            "/products/{id}",
            get(handlers::products::get_product)
                .put(handlers::products::update_product)
                .delete(handlers::products::delete_product),
        )
        .route(
            "/portfolio",
            get(handlers::portfolio::list_portfolio).post(handlers::portfolio::create_portfolio_item),
        )
        .route("/portfolio/categories", get(handlers::portfolio::portfolio_categories))
        .route(
            "/portfolio/{id}",
            get(handlers::portfolio::get_portfolio_item)
                .put(handlers::portfolio::update_portfolio_item)
                .delete(handlers::portfolio::delete_portfolio_item),
        )
        .route(
            "/brochures",
            get(handlers::brochures::list_brochures).post(handlers::brochures::create_brochure),
        )
        .route("/brochures/stats", get(handlers::brochures::brochure_stats))
        .route(
            "/brochures/{id}",
            get(handlers::brochures::get_brochure)
                .put(handlers::brochures::update_brochure)
                .delete(handlers::brochures::delete_brochure),
        )
        .route("/leads", get(handlers::leads::list_leads))
        .route("/leads/stats", get(handlers::leads::lead_stats))
        .route("/leads/search", get(handlers::leads::search_leads))
        .route(
            "/leads/{id}",
            get(handlers::leads::get_lead)
                .put(handlers::leads::update_lead)
                .delete(handlers::leads::delete_lead),
        )
        .route("/leads/{id}/status", put(handlers::leads::update_lead_status))
        .route(
            "/seo",
            get(handlers::seo::list_seo).post(handlers::seo::upsert_seo),
        )
        .route("/seo/pages", get(handlers::seo::list_seo_pages))
        .route(
            "/seo/{page}",
            get(handlers::seo::get_seo_admin)
                .put(handlers::seo::update_seo)
                .delete(handlers::seo::delete_seo),
        )
        .route("/analytics/pageviews", get(handlers::analytics::get_page_views))
        .route("/analytics/overview", get(handlers::analytics::get_overview))
        .route("/analytics/unique-visitors", get(handlers::analytics::get_unique_visitors))
        .route("/analytics/cleanup", post(handlers::analytics::cleanup_page_views))
        .route_layer(axum_middleware::from_fn_with_state(
            app_state.clone(),
            auth_guard,
        ));

    let analytics_routes = Router::new()
        .route("/stats", get(handlers::analytics::get_stats))
        .route("/page-views", get(handlers::analytics::recent_page_views))
        .route_layer(axum_middleware::from_fn_with_state(
            app_state.clone(),
            auth_guard,
        ));

    let cors = configure_cors(&app_state.config.allowed_origins);

    let app = Router::new()
        .route("/health", get(handlers::health::health))
        .route("/health/database", get(handlers::health::health_database))
        .nest("/api", public_routes)
        .nest("/api/admin", session_routes.merge(admin_routes))
        .nest("/api/analytics", analytics_routes)
        .with_state(app_state);

    // Swagger UI serves the document itself under the same path.
    #[cfg(feature = "swagger-ui")]
    let app = app.merge(
        utoipa_swagger_ui::SwaggerUi::new("/swagger-ui").url("/api-docs/openapi.json", ApiDoc::openapi()),
    );
    #[cfg(not(feature = "swagger-ui"))]
    let app = app.route("/api-docs/openapi.json", get(|| async { axum::Json(ApiDoc::openapi()) }));

    app.layer(TraceLayer::new_for_http()).layer(cors)
}

/// CORS for the site front-end. Credentials are allowed so the session cookie travels.
pub fn configure_cors(allowed_origins: &[String]) -> CorsLayer {
    let mut origins: Vec<HeaderValue> = allowed_origins
        .iter()
        .filter_map(|origin| match origin.parse() {
            Ok(value) => Some(value),
            Err(_) => {
                tracing::warn!("Ignoring invalid CORS origin '{}'", origin);
                None
            }
        })
        .collect();

    if origins.is_empty() {
        origins = DEV_ORIGINS.into_iter().map(HeaderValue::from_static).collect();
    }

    CorsLayer::new()
        .allow_origin(origins)
        .allow_methods([Method::GET, Method::POST, Method::PUT, Method::DELETE])
        .allow_headers([header::CONTENT_TYPE])
        .allow_credentials(true)
}

/// Starts the server: logging, configuration, storage, admin bootstrap, then serve.
pub async fn run() -> anyhow::Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info,tower_http=info")),
        )
        .with_target(false)
        .compact()
        .init();

    let config = Config::from_env()?;
    let bind_addr = config.bind_addr.clone();
    let default_admin_username = config.default_admin_username.clone();
    let default_admin_password = config.default_admin_password.clone();

    let app_state = AppState::new(config).await?;

    app_state
        .auth_service
        .ensure_default_admin(&default_admin_username, default_admin_password.as_deref())
        .await?;

    let purged = app_state.auth_service.purge_expired_sessions().await?;
    if purged > 0 {
        tracing::info!("Removed {} expired admin sessions", purged);
    }

    let app = create_app(app_state);

    let listener = TcpListener::bind(&bind_addr).await?;
    tracing::info!("🚀 Server listening on {}", listener.local_addr()?);
    axum::serve(listener, app).await?;

    Ok(())
}
