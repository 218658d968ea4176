//! Common test utilities for integration tests.
//!
//! Provides shared infrastructure:
//! - Test database setup (migrations included)
//! - The real application router with a live session layer
//! - Request helpers with cookie handling
//! - Unique fixture names so tests never collide
//!
//! Requires `DATABASE_URL` to point at a PostgreSQL instance.

use axum::body::Body;
use axum::http::{header, HeaderMap, Request, StatusCode};
use axum::Router;
use serde_json::Value;
use sqlx::PgPool;
use tower::Service as _;
use uuid::Uuid;

use techfinder_api::app::{build_router, AppState};
use techfinder_api::config::Config;
use techfinder_api::middleware::session::create_session_layer;

/// Test context containing the database pool and the real router
pub struct TestContext {
    pub db: PgPool,
    pub app: Router,
}

impl TestContext {
    /// Creates a new test context against the configured database
    pub async fn new() -> anyhow::Result<Self> {
        let config = Config::from_env()?;

        let db = PgPool::connect(&config.database.url).await?;

        // Path relative to this crate's Cargo.toml
        sqlx::migrate!("../migrations").run(&db).await?;

        let session_layer = create_session_layer(&db, &config).await?;
        let state = AppState::new(db.clone(), config);
        let app = build_router(state, session_layer);

        Ok(Self { db, app })
    }

    /// Sends a JSON request and returns status, headers, and parsed body
    pub async fn request(
        &self,
        method: &str,
        uri: &str,
        cookie: Option<&str>,
        body: Option<Value>,
    ) -> (StatusCode, HeaderMap, Value) {
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

        let response = self.app.clone().call(request).await.unwrap();

        let status = response.status();
        let headers = response.headers().clone();
        let bytes = axum::body::to_bytes(response.into_body(), usize::MAX)
            .await
            .unwrap();
        let body: Value = if bytes.is_empty() {
            Value::Null
        } else {
            serde_json::from_slice(&bytes).unwrap_or(Value::Null)
        };

        (status, headers, body)
    }

    /// Registers a user through the API, returning status and body
    pub async fn register(
        &self,
        username: &str,
        email: &str,
        password: &str,
    ) -> (StatusCode, Value) {
        let (status, _, body) = self
            .request(
                "POST",
                "/api/register",
                None,
                Some(serde_json::json!({
                    "username": username,
                    "email": email,
                    "password": password,
                })),
            )
            .await;

        (status, body)
    }

    /// Logs in through the API, returning status, body, and the session cookie
    pub async fn login(
        &self,
        username: &str,
        password: &str,
    ) -> (StatusCode, Value, Option<String>) {
        let (status, headers, body) = self
            .request(
                "POST",
                "/api/login",
                None,
                Some(serde_json::json!({
                    "username": username,
                    "password": password,
                })),
            )
            .await;

        let cookie = session_cookie(&headers);

        (status, body, cookie)
    }
}

/// Extracts the session cookie pair from response headers
pub fn session_cookie(headers: &HeaderMap) -> Option<String> {
    headers
        .get_all(header::SET_COOKIE)
        .iter()
        .filter_map(|value| value.to_str().ok())
        .find(|value| value.starts_with("techfinder_session="))
        .and_then(|value| value.split(';').next())
        .map(|pair| pair.to_string())
}

/// Produces a unique fixture name with the given prefix
pub fn unique(prefix: &str) -> String {
    format!("{}-{}", prefix, Uuid::new_v4())
}

/// Produces a unique email address
pub fn unique_email() -> String {
    format!("test-{}@example.com", Uuid::new_v4())
}
