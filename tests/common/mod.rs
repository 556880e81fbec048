// tests/common/mod.rs

#![allow(dead_code)]

use std::sync::Arc;

use axum::{
    body::Body,
    http::{header, HeaderMap, Request, StatusCode},
    Router,
};
use nowest_backend::{
    config::{AppState, Config, StorageKind},
    create_app,
    db::MemoryStorage,
};
use serde_json::Value;
use tower::ServiceExt;

pub const ADMIN_USERNAME: &str = "admin";
pub const ADMIN_PASSWORD: &str = "correct horse battery staple";

// Cheapest cost bcrypt accepts
pub const TEST_BCRYPT_COST: u32 = 4;

pub struct TestApp {
    pub router: Router,
    pub state: AppState,
    /// Same tables the router sees, for seeding rows the API can't create.
    pub memory: MemoryStorage,
}

pub struct TestResponse {
    pub status: StatusCode,
    pub headers: HeaderMap,
    pub body: Value,
}

impl TestApp {
    /// Full router over in-memory storage with one seeded admin.
    pub async fn spawn() -> Self {
        let config = Config {
            storage: StorageKind::Memory,
            bcrypt_cost: TEST_BCRYPT_COST,
            ..Config::default()
        };
        let memory = MemoryStorage::new();
        let state = AppState::with_storage(Arc::new(memory.clone()), config);
        state
            .auth_service
            .ensure_default_admin(ADMIN_USERNAME, Some(ADMIN_PASSWORD))
            .await
            .unwrap();

        Self {
            router: create_app(state.clone()),
            state,
            memory,
        }
    }

    pub async fn request(
        &self,
        method: &str,
        uri: &str,
        body: Option<Value>,
        cookie: Option<&str>,
    ) -> TestResponse {
        let mut builder = Request::builder().method(method).uri(uri);
        if let Some(cookie) = cookie {
            builder = builder.header(header::COOKIE, cookie);
        }
        let request = match body {
            Some(json) => builder
                .header(header::CONTENT_TYPE, "application/json")
                .body(Body::from(json.to_string()))
                .unwrap(),
            None => builder.body(Body::empty()).unwrap(),
        };
        self.send(request).await
    }

    pub async fn send(&self, request: Request<Body>) -> TestResponse {
        let response = self.router.clone().oneshot(request).await.unwrap();
        let status = response.status();
        let headers = response.headers().clone();
        let bytes = axum::body::to_bytes(response.into_body(), usize::MAX)
            .await
            .unwrap();
        let body = if bytes.is_empty() {
            Value::Null
        } else {
            serde_json::from_slice(&bytes).unwrap_or(Value::Null)
        };

        TestResponse { status, headers, body }
    }

    pub async fn get(&self, uri: &str, cookie: Option<&str>) -> TestResponse {
        self.request("GET", uri, None, cookie).await
    }

    /// Logs the seeded admin in and returns the `Cookie` header value to replay.
    pub async fn login(&self) -> String {
        let res = self
            .request(
                "POST",
                "/api/admin/login",
                Some(serde_json::json!({
                    "username": ADMIN_USERNAME,
                    "password": ADMIN_PASSWORD,
                })),
                None,
            )
            .await;
        assert_eq!(res.status, StatusCode::OK);
        session_cookie(&res.headers).expect("login must set the session cookie")
    }
}

/// `sid=<token>` taken from the first Set-Cookie header.
pub fn session_cookie(headers: &HeaderMap) -> Option<String> {
    headers
        .get_all(header::SET_COOKIE)
        .iter()
        .filter_map(|value| value.to_str().ok())
        .find(|value| value.starts_with("sid="))
        .and_then(|value| value.split(';').next())
        .map(str::to_owned)
}
