// src/services/auth.rs

use std::sync::Arc;

use bcrypt::{hash, verify};
use chrono::{DateTime, Duration, Utc};
use rand::distr::{Alphanumeric, SampleString};
use sha2::{Digest, Sha256};

use crate::{
    common::error::AppError,
    db::Storage,
    models::auth::{Admin, AdminSession},
};

const SESSION_TOKEN_LEN: usize = 64;

/// A freshly opened session. `token` is the only copy of the cookie value.
#[derive(Debug, Clone)]
pub struct NewSession {
    pub token: String,
    pub admin: Admin,
    pub expires_at: DateTime<Utc>,
}

#[derive(Clone)]
pub struct AuthService {
    storage: Arc<dyn Storage>,
    session_ttl: Duration,
    bcrypt_cost: u32,
}

impl AuthService {
    pub fn new(storage: Arc<dyn Storage>, session_ttl: Duration, bcrypt_cost: u32) -> Self {
        Self { storage, session_ttl, bcrypt_cost }
    }

    pub fn session_ttl(&self) -> Duration {
        self.session_ttl
    }

    /// Salted bcrypt hash, computed off the async runtime.
    pub async fn hash_password(&self, password: &str) -> Result<String, AppError> {
        let password = password.to_owned();
        let cost = self.bcrypt_cost;
        let hashed = tokio::task::spawn_blocking(move || hash(&password, cost))
            .await
            .map_err(|e| anyhow::anyhow!("password hashing task failed: {}", e))??;
        Ok(hashed)
    }

    pub async fn login(&self, username: &str, password: &str) -> Result<NewSession, AppError> {
        let admin = self
            .storage
            .get_admin_by_username(username)
            .await?
            .ok_or(AppError::InvalidCredentials)?;

        let password = password.to_owned();
        let password_hash = admin.password_hash.clone();

        // bcrypt::verify compares the digests in constant time
        let is_password_valid = tokio::task::spawn_blocking(move || verify(&password, &password_hash))
            .await
            .map_err(|e| anyhow::anyhow!("password verification task failed: {}", e))??;

        if !is_password_valid {
            tracing::warn!(username, "failed admin login");
            return Err(AppError::InvalidCredentials);
        }

        let token = Alphanumeric.sample_string(&mut rand::rng(), SESSION_TOKEN_LEN);
        let now = Utc::now();
        let expires_at = now + self.session_ttl;

        self.storage
            .create_session(AdminSession {
                token_hash: hash_token(&token),
                admin_id: admin.id,
                created_at: now,
                expires_at,
            })
            .await?;

        tracing::info!(admin_id = %admin.id, "admin logged in");
        Ok(NewSession { token, admin, expires_at })
    }

    pub async fn logout(&self, token: &str) -> Result<(), AppError> {
        self.storage.delete_session(&hash_token(token)).await
    }

    pub async fn current_user(&self, token: &str) -> Result<Admin, AppError> {
        let token_hash = hash_token(token);
        let session = self
            .storage
            .get_session(&token_hash)
            .await?
            .ok_or(AppError::Unauthenticated)?;

        if session.is_expired(Utc::now()) {
            self.storage.delete_session(&token_hash).await?;
            return Err(AppError::Unauthenticated);
        }

        self.storage
            .get_admin(session.admin_id)
            .await?
            .ok_or(AppError::Unauthenticated)
    }

    pub async fn purge_expired_sessions(&self) -> Result<u64, AppError> {
        self.storage.delete_expired_sessions(Utc::now()).await
    }

    /// Creates the bootstrap admin account unless it already exists.
    pub async fn ensure_default_admin(
        &self,
        username: &str,
        password: Option<&str>,
    ) -> Result<Option<Admin>, AppError> {
        if self.storage.get_admin_by_username(username).await?.is_some() {
            tracing::info!("Admin user '{}' already exists", username);
            return Ok(None);
        }

        let Some(password) = password else {
            tracing::error!(
                "DEFAULT_ADMIN_PASSWORD is not set; cannot create admin user '{}'",
                username
            );
            return Ok(None);
        };

        let password_hash = self.hash_password(password).await?;
        let admin = self.storage.create_admin(username, &password_hash).await?;
        tracing::info!("Default admin user created: username=\"{}\"", username);
        tracing::warn!("Change the default admin password after the first login");
        Ok(Some(admin))
    }
}

// Sessions are looked up by digest so a leaked table cannot be replayed as cookies.
fn hash_token(token: &str) -> String {
    format!("{:x}", Sha256::digest(token.as_bytes()))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::db::MemoryStorage;

    // Cheapest cost bcrypt accepts
    const TEST_BCRYPT_COST: u32 = 4;

    fn service(storage: Arc<MemoryStorage>) -> AuthService {
        AuthService::new(storage, Duration::hours(1), TEST_BCRYPT_COST)
    }

    async fn seeded() -> (Arc<MemoryStorage>, AuthService) {
        let storage = Arc::new(MemoryStorage::new());
        let auth = service(storage.clone());
        auth.ensure_default_admin("admin", Some("s3cret")).await.unwrap();
        (storage, auth)
    }

    #[test]
    fn token_hash_is_hex_sha256() {
        let digest = hash_token("abc");
        assert_eq!(digest.len(), 64);
        assert_eq!(digest, "ba7816bf8f01cfea414140de5dae2223b00361a396177a9cb410ff61f20015ad");
    }

    #[tokio::test]
    async fn wrong_password_is_rejected() {
        let (_, auth) = seeded().await;
        let err = auth.login("admin", "nope").await.unwrap_err();
        assert!(matches!(err, AppError::InvalidCredentials));
    }

    #[tokio::test]
    async fn unknown_user_is_rejected() {
        let (_, auth) = seeded().await;
        let err = auth.login("ghost", "s3cret").await.unwrap_err();
        assert!(matches!(err, AppError::InvalidCredentials));
    }

    #[tokio::test]
    async fn login_then_logout() {
        let (_, auth) = seeded().await;

        let session = auth.login("admin", "s3cret").await.unwrap();
        assert_eq!(session.token.len(), SESSION_TOKEN_LEN);
        assert_eq!(auth.current_user(&session.token).await.unwrap().username, "admin");

        auth.logout(&session.token).await.unwrap();
        let err = auth.current_user(&session.token).await.unwrap_err();
        assert!(matches!(err, AppError::Unauthenticated));
    }

    #[tokio::test]
    async fn expired_session_is_unauthenticated_and_removed() {
        let (storage, auth) = seeded().await;
        let admin = storage.get_admin_by_username("admin").await.unwrap().unwrap();
        let now = Utc::now();
        storage
            .create_session(AdminSession {
                token_hash: hash_token("stale"),
                admin_id: admin.id,
                created_at: now - Duration::hours(2),
                expires_at: now - Duration::hours(1),
            })
            .await
            .unwrap();

        let err = auth.current_user("stale").await.unwrap_err();
        assert!(matches!(err, AppError::Unauthenticated));
        assert!(storage.get_session(&hash_token("stale")).await.unwrap().is_none());
    }

    #[tokio::test]
    async fn default_admin_is_created_once() {
        let (_, auth) = seeded().await;
        assert!(auth.ensure_default_admin("admin", Some("other")).await.unwrap().is_none());
        // The first password still works
        assert!(auth.login("admin", "s3cret").await.is_ok());
    }

    #[tokio::test]
    async fn default_admin_needs_a_password() {
        let storage = Arc::new(MemoryStorage::new());
        let auth = service(storage.clone());
        assert!(auth.ensure_default_admin("admin", None).await.unwrap().is_none());
        assert!(storage.get_admin_by_username("admin").await.unwrap().is_none());
    }
}
