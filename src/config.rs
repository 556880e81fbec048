// src/config.rs

use std::{
    env,
    sync::Arc,
    time::{Duration, Instant},
};

use anyhow::Context;
use sqlx::{postgres::PgPoolOptions, PgPool};

use crate::{
    db::{MemoryStorage, PgStorage, Storage},
    services::{
        analytics_service::AnalyticsService, auth::AuthService, lead_service::LeadService,
        seo_service::SeoService,
    },
};

// One hour to one year
const SESSION_TTL_HOURS_RANGE: std::ops::RangeInclusive<i64> = 1..=8760;
// Bounds enforced by bcrypt itself
const BCRYPT_COST_RANGE: std::ops::RangeInclusive<u32> = 4..=31;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum StorageKind {
    Postgres,
    Memory,
}

/// Runtime settings, read from the environment (and `.env`).
#[derive(Debug, Clone)]
pub struct Config {
    pub storage: StorageKind,
    pub database_url: Option<String>,
    pub db_max_connections: u32,
    pub bind_addr: String,
    pub session_ttl_hours: i64,
    pub cookie_secure: bool,
    pub bcrypt_cost: u32,
    pub allowed_origins: Vec<String>,
    pub default_admin_username: String,
    pub default_admin_password: Option<String>,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            storage: StorageKind::Postgres,
            database_url: None,
            db_max_connections: 5,
            bind_addr: "0.0.0.0:3000".to_string(),
            session_ttl_hours: 24 * 7,
            cookie_secure: false,
            bcrypt_cost: bcrypt::DEFAULT_COST,
            allowed_origins: Vec::new(),
            default_admin_username: "admin".to_string(),
            default_admin_password: None,
        }
    }
}

impl Config {
    pub fn from_env() -> anyhow::Result<Self> {
        dotenvy::dotenv().ok();
        Self::from_lookup(|key| env::var(key).ok())
    }

    /// Builds the configuration from any key lookup, so tests don't touch the process env.
    pub fn from_lookup<F>(lookup: F) -> anyhow::Result<Self>
    where
        F: Fn(&str) -> Option<String>,
    {
        let defaults = Self::default();

        let storage = match lookup("STORAGE").as_deref() {
            None | Some("postgres") => StorageKind::Postgres,
            Some("memory") => StorageKind::Memory,
            Some(other) => anyhow::bail!("STORAGE must be 'postgres' or 'memory', got '{}'", other),
        };

        let database_url = lookup("DATABASE_URL");
        if storage == StorageKind::Postgres && database_url.is_none() {
            anyhow::bail!("DATABASE_URL must be set");
        }

        let production = lookup("APP_ENV").as_deref() == Some("production");
        let cookie_secure = match lookup("COOKIE_SECURE") {
            Some(v) => parse_bool(&v).context("COOKIE_SECURE must be true or false")?,
            None => production,
        };

        let session_ttl_hours = parse_or(&lookup, "SESSION_TTL_HOURS", defaults.session_ttl_hours)?;
        if !SESSION_TTL_HOURS_RANGE.contains(&session_ttl_hours) {
            anyhow::bail!(
                "SESSION_TTL_HOURS must be between {} and {}, got {}",
                SESSION_TTL_HOURS_RANGE.start(),
                SESSION_TTL_HOURS_RANGE.end(),
                session_ttl_hours
            );
        }

        let bcrypt_cost = parse_or(&lookup, "BCRYPT_COST", defaults.bcrypt_cost)?;
        if !BCRYPT_COST_RANGE.contains(&bcrypt_cost) {
            anyhow::bail!(
                "BCRYPT_COST must be between {} and {}, got {}",
                BCRYPT_COST_RANGE.start(),
                BCRYPT_COST_RANGE.end(),
                bcrypt_cost
            );
        }

        Ok(Self {
            storage,
            database_url,
            db_max_connections: parse_or(&lookup, "DB_MAX_CONNECTIONS", defaults.db_max_connections)?,
            bind_addr: lookup("BIND_ADDR").unwrap_or(defaults.bind_addr),
            session_ttl_hours,
            cookie_secure,
            bcrypt_cost,
            allowed_origins: lookup("ALLOWED_ORIGINS")
                .map(|s| {
                    s.split(',')
                        .map(|o| o.trim().to_string())
                        .filter(|o| !o.is_empty())
                        .collect()
                })
                .unwrap_or_default(),
            default_admin_username: lookup("DEFAULT_ADMIN_USERNAME")
                .unwrap_or(defaults.default_admin_username),
            default_admin_password: lookup("DEFAULT_ADMIN_PASSWORD").filter(|p| !p.is_empty()),
        })
    }
}

fn parse_or<F, T>(lookup: &F, key: &str, default: T) -> anyhow::Result<T>
where
    F: Fn(&str) -> Option<String>,
    T: std::str::FromStr,
    T::Err: std::error::Error + Send + Sync + 'static,
{
    match lookup(key) {
        Some(raw) => raw
            .parse()
            .with_context(|| format!("{} has an invalid value: '{}'", key, raw)),
        None => Ok(default),
    }
}

fn parse_bool(raw: &str) -> anyhow::Result<bool> {
    match raw.to_ascii_lowercase().as_str() {
        "1" | "true" | "yes" => Ok(true),
        "0" | "false" | "no" => Ok(false),
        _ => anyhow::bail!("not a boolean: '{}'", raw),
    }
}

#[derive(Clone)]
pub struct AppState {
    pub storage: Arc<dyn Storage>,
    pub config: Arc<Config>,
    pub auth_service: AuthService,
    pub lead_service: LeadService,
    pub seo_service: SeoService,
    pub analytics_service: AnalyticsService,
    pub started_at: Instant,
}

impl AppState {
    /// Connects the configured storage backend and wires the services on top.
    pub async fn new(config: Config) -> anyhow::Result<Self> {
        let storage: Arc<dyn Storage> = match config.storage {
            StorageKind::Postgres => {
                let pool = connect(&config).await?;

                sqlx::migrate!()
                    .run(&pool)
                    .await
                    .context("failed to run database migrations")?;
                tracing::info!("✅ Database migrations applied");

                Arc::new(PgStorage::new(pool))
            }
            StorageKind::Memory => {
                tracing::warn!("Using in-memory storage; data is lost on restart");
                Arc::new(MemoryStorage::new())
            }
        };

        Ok(Self::with_storage(storage, config))
    }

    pub fn with_storage(storage: Arc<dyn Storage>, config: Config) -> Self {
        let auth_service = AuthService::new(
            storage.clone(),
            chrono::Duration::hours(
                config
                    .session_ttl_hours
                    .clamp(*SESSION_TTL_HOURS_RANGE.start(), *SESSION_TTL_HOURS_RANGE.end()),
            ),
            config.bcrypt_cost,
        );

        Self {
            lead_service: LeadService::new(storage.clone()),
            seo_service: SeoService::new(storage.clone()),
            analytics_service: AnalyticsService::new(storage.clone()),
            auth_service,
            storage,
            config: Arc::new(config),
            started_at: Instant::now(),
        }
    }
}

async fn connect(config: &Config) -> anyhow::Result<PgPool> {
    let database_url = config
        .database_url
        .as_deref()
        .context("DATABASE_URL must be set")?;

    let pool = PgPoolOptions::new()
        .max_connections(config.db_max_connections)
        .acquire_timeout(Duration::from_secs(3))
        .connect(database_url)
        .await
        .context("failed to connect to the database")?;

    tracing::info!("✅ Database connection established");
    Ok(pool)
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashMap;

    fn config_from(pairs: &[(&str, &str)]) -> anyhow::Result<Config> {
        let vars: HashMap<String, String> = pairs
            .iter()
            .map(|(k, v)| (k.to_string(), v.to_string()))
            .collect();
        Config::from_lookup(|key| vars.get(key).cloned())
    }

    #[test]
    fn postgres_requires_a_database_url() {
        assert!(config_from(&[]).is_err());
        assert!(config_from(&[("DATABASE_URL", "postgres://localhost/site")]).is_ok());
    }

    #[test]
    fn memory_storage_needs_no_database() {
        let config = config_from(&[("STORAGE", "memory")]).unwrap();
        assert_eq!(config.storage, StorageKind::Memory);
        assert_eq!(config.bind_addr, "0.0.0.0:3000");
        assert_eq!(config.session_ttl_hours, 168);
        assert_eq!(config.default_admin_username, "admin");
    }

    #[test]
    fn production_defaults_to_secure_cookies() {
        let config = config_from(&[("STORAGE", "memory"), ("APP_ENV", "production")]).unwrap();
        assert!(config.cookie_secure);

        let config = config_from(&[
            ("STORAGE", "memory"),
            ("APP_ENV", "production"),
            ("COOKIE_SECURE", "false"),
        ])
        .unwrap();
        assert!(!config.cookie_secure);
    }

    #[test]
    fn parses_origins_and_numbers() {
        let config = config_from(&[
            ("STORAGE", "memory"),
            ("ALLOWED_ORIGINS", "https://a.example, https://b.example,"),
            ("SESSION_TTL_HOURS", "12"),
        ])
        .unwrap();
        assert_eq!(config.allowed_origins, vec!["https://a.example", "https://b.example"]);
        assert_eq!(config.session_ttl_hours, 12);
    }

    #[test]
    fn session_ttl_must_be_positive_and_bounded() {
        for ttl in ["0", "-5", "8761", "9223372036854775807"] {
            assert!(
                config_from(&[("STORAGE", "memory"), ("SESSION_TTL_HOURS", ttl)]).is_err(),
                "SESSION_TTL_HOURS={ttl} must be rejected"
            );
        }
        for ttl in ["1", "8760"] {
            let config = config_from(&[("STORAGE", "memory"), ("SESSION_TTL_HOURS", ttl)]).unwrap();
            assert_eq!(config.session_ttl_hours.to_string(), ttl);
        }
    }

    #[test]
    fn out_of_range_ttl_in_a_hand_built_config_is_clamped() {
        let config = Config {
            storage: StorageKind::Memory,
            session_ttl_hours: i64::MAX,
            ..Config::default()
        };
        let state = AppState::with_storage(Arc::new(MemoryStorage::new()), config);
        assert_eq!(state.auth_service.session_ttl(), chrono::Duration::hours(8760));
    }

    #[test]
    fn bcrypt_cost_must_be_accepted_by_bcrypt() {
        assert!(config_from(&[("STORAGE", "memory"), ("BCRYPT_COST", "3")]).is_err());
        assert!(config_from(&[("STORAGE", "memory"), ("BCRYPT_COST", "32")]).is_err());
        let config = config_from(&[("STORAGE", "memory"), ("BCRYPT_COST", "4")]).unwrap();
        assert_eq!(config.bcrypt_cost, 4);
    }

    #[test]
    fn rejects_invalid_values() {
        assert!(config_from(&[("STORAGE", "redis")]).is_err());
        assert!(config_from(&[("STORAGE", "memory"), ("DB_MAX_CONNECTIONS", "many")]).is_err());
    }
}
