pub mod analytics_service;
pub mod auth;
pub mod lead_service;
pub mod seo_service;
