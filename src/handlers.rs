// src/handlers.rs

pub mod analytics;
pub mod auth;
pub mod brochures;
pub mod health;
pub mod leads;
pub mod portfolio;
pub mod products;
pub mod seo;
