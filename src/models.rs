pub mod analytics;
pub mod auth;
pub mod brochures;
pub mod leads;
pub mod portfolio;
pub mod products;
pub mod search;
pub mod seo;
