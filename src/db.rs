pub mod storage;
pub use storage::{Storage, StorageResult};
pub mod postgres;
pub use postgres::PgStorage;
pub mod memory;
pub use memory::MemoryStorage;

pub mod admin_repo;
pub use admin_repo::AdminRepository;
pub mod product_repo;
pub use product_repo::ProductRepository;
pub mod portfolio_repo;
pub use portfolio_repo::PortfolioRepository;
pub mod lead_repo;
pub use lead_repo::LeadRepository;
pub mod seo_repo;
pub use seo_repo::SeoRepository;
pub mod analytics_repo;
pub use analytics_repo::AnalyticsRepository;
pub mod brochure_repo;
pub use brochure_repo::BrochureRepository;
