// src/docs.rs

use utoipa::OpenApi;
use utoipa::openapi::security::{ApiKey, ApiKeyValue, SecurityScheme};

use crate::handlers;
use crate::middleware::auth::SESSION_COOKIE;
use crate::models;

#[derive(OpenApi)]
#[openapi(
    paths(
        // --- Health ---
        handlers::health::health,
        handlers::health::health_database,

        // --- Public site ---
        handlers::products::list_products,
        handlers::products::get_product,
        handlers::products::search_products,
        handlers::portfolio::list_portfolio,
        handlers::portfolio::get_portfolio_item,
        handlers::portfolio::search_portfolio,
        handlers::brochures::list_brochures,
        handlers::brochures::get_brochure,
        handlers::brochures::search_brochures,
        handlers::leads::submit_lead,
        handlers::seo::get_seo,
        handlers::analytics::track_page_view,

        // --- Auth ---
        handlers::auth::login,
        handlers::auth::logout,
        handlers::auth::me,

        // --- Admin catalog ---
        handlers::products::product_categories,
        handlers::products::create_product,
        handlers::products::update_product,
        handlers::products::delete_product,
        handlers::portfolio::portfolio_categories,
        handlers::portfolio::create_portfolio_item,
        handlers::portfolio::update_portfolio_item,
        handlers::portfolio::delete_portfolio_item,
        handlers::brochures::brochure_stats,
        handlers::brochures::create_brochure,
        handlers::brochures::update_brochure,
        handlers::brochures::delete_brochure,

        // --- Admin leads ---
        handlers::leads::list_leads,
        handlers::leads::get_lead,
        handlers::leads::lead_stats,
        handlers::leads::search_leads,
        handlers::leads::update_lead,
        handlers::leads::update_lead_status,
        handlers::leads::delete_lead,

        // --- Admin SEO ---
        handlers::seo::list_seo,
        handlers::seo::list_seo_pages,
        handlers::seo::get_seo_admin,
        handlers::seo::upsert_seo,
        handlers::seo::update_seo,
        handlers::seo::delete_seo,

        // --- Analytics ---
        handlers::analytics::get_stats,
        handlers::analytics::recent_page_views,
        handlers::analytics::get_overview,
        handlers::analytics::get_page_views,
        handlers::analytics::get_unique_visitors,
        handlers::analytics::cleanup_page_views,
    ),
    components(
        schemas(
            handlers::health::HealthResponse,
            handlers::health::DatabaseCheck,

            models::auth::Admin,
            models::auth::LoginPayload,
            models::auth::LogoutResponse,

            models::products::Product,
            models::products::CreateProductPayload,
            models::products::UpdateProductPayload,

            models::search::CategoryList,

            models::portfolio::PortfolioItem,
            models::portfolio::CreatePortfolioPayload,
            models::portfolio::UpdatePortfolioPayload,

            models::brochures::Brochure,
            models::brochures::CreateBrochurePayload,
            models::brochures::UpdateBrochurePayload,
            models::brochures::BrochureStats,

            models::leads::LeadStatus,
            models::leads::Lead,
            models::leads::CreateLeadPayload,
            models::leads::UpdateLeadPayload,
            models::leads::UpdateLeadStatusPayload,
            models::leads::LeadStats,

            models::seo::SeoSettings,
            models::seo::UpsertSeoPayload,
            models::seo::UpdateSeoPayload,
            models::seo::SeoTemplate,
            models::seo::AdminSeoView,
            models::seo::SeoPages,

            models::analytics::PageView,
            models::analytics::PageViewPayload,
            models::analytics::PageCount,
            models::analytics::AnalyticsStats,
            models::analytics::AnalyticsOverview,
            models::analytics::PageViewsReport,
            models::analytics::UniqueVisitors,
            models::analytics::CleanupResult,
        )
    ),
    tags(
        (name = "Health", description = "Liveness and storage checks"),
        (name = "Catalog", description = "Public products, portfolio and brochures"),
        (name = "Leads", description = "Contact form"),
        (name = "SEO", description = "Per-page metadata for the public site"),
        (name = "Analytics", description = "Page view tracking"),
        (name = "Auth", description = "Admin session login and logout"),
        (name = "Admin Catalog", description = "Manage products, portfolio and brochures"),
        (name = "Admin Leads", description = "Follow up on leads"),
        (name = "Admin SEO", description = "Manage per-page metadata"),
        (name = "Admin Analytics", description = "Traffic figures for the dashboard")
    ),
    modifiers(&SecurityAddon)
)]
pub struct ApiDoc;

struct SecurityAddon;

impl utoipa::Modify for SecurityAddon {
    fn modify(&self, openapi: &mut utoipa::openapi::OpenApi) {
        let components = openapi.components.get_or_insert_with(Default::default);
        components.add_security_scheme(
            "session_cookie",
            SecurityScheme::ApiKey(ApiKey::Cookie(ApiKeyValue::new(SESSION_COOKIE))),
        );
    }
}
