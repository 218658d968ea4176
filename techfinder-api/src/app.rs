//! Application state and router builder.
//!
//! The shared state owns the database pool and configuration; it is
//! constructed once at startup and cloned into each request handler via
//! Axum's `State` extractor.
//!
//! # Example
//!
//! ```no_run
//! use techfinder_api::{app::AppState, config::Config, middleware::session};
//! use sqlx::PgPool;
//!
//! # async fn example() -> anyhow::Result<()> {
//! let config = Config::from_env()?;
//! let pool = PgPool::connect(&config.database.url).await?;
//! let session_layer = session::create_session_layer(&pool, &config).await?;
//! let state = AppState::new(pool, config);
//! let app = techfinder_api::app::build_router(state, session_layer);
//! # Ok(())
//! # }
//! ```

use axum::{
    http::{header, HeaderValue, Method},
    routing::{get, post},
    Router,
};
use sqlx::PgPool;
use std::sync::Arc;
use tower_http::{
    cors::CorsLayer,
    trace::{DefaultMakeSpan, DefaultOnResponse, TraceLayer},
};
use tower_sessions::SessionManagerLayer;
use tower_sessions_sqlx_store::PostgresStore;
use tracing::Level;

use crate::config::Config;
use crate::middleware::security;
use crate::routes;

/// Shared application state
///
/// Cloned per request; uses Arc internally so cloning is cheap.
#[derive(Clone)]
pub struct AppState {
    /// Database connection pool
    pub db: PgPool,

    /// Application configuration
    pub config: Arc<Config>,
}

impl AppState {
    /// Creates new application state
    pub fn new(db: PgPool, config: Config) -> Self {
        Self {
            db,
            config: Arc::new(config),
        }
    }
}

/// Builds the complete Axum router with all routes and middleware
///
/// # Architecture
///
/// ```text
/// /
/// ├── /health                    # Health check (public)
/// └── /api/
///     ├── POST /register         # Create account
///     ├── POST /login            # Establish session
///     ├── POST /logout           # Invalidate session
///     ├── GET  /auth/status      # Session identity
///     ├── GET|POST /products     # Catalog
///     ├── GET|PUT|DELETE /products/:id
///     ├── GET|DELETE /users/:id  # Own profile only
///     └── GET|POST|DELETE /wishlist
/// ```
///
/// # Middleware Stack
///
/// Applied in order (innermost first):
/// 1. Request tracing (tower-http TraceLayer)
/// 2. CORS (tower-http CorsLayer)
/// 3. Sessions (tower-sessions, PostgreSQL store)
/// 4. Security headers
pub fn build_router(
    state: AppState,
    session_layer: SessionManagerLayer<PostgresStore>,
) -> Router {
    let api_routes = Router::new()
        .route("/register", post(routes::auth::register))
        .route("/login", post(routes::auth::login))
        .route("/logout", post(routes::auth::logout))
        .route("/auth/status", get(routes::auth::status))
        .route(
            "/products",
            get(routes::products::list_products).post(routes::products::create_product),
        )
        .route(
            "/products/:id",
            get(routes::products::get_product)
                .put(routes::products::update_product)
                .delete(routes::products::delete_product),
        )
        .route(
            "/users/:id",
            get(routes::users::get_user).delete(routes::users::delete_user),
        )
        .route(
            "/wishlist",
            get(routes::wishlist::list_wishlist)
                .post(routes::wishlist::add_to_wishlist)
                .delete(routes::wishlist::remove_from_wishlist),
        );

    // Configure CORS based on environment
    let cors = if state.config.api.cors_origins.contains(&"*".to_string()) {
        // Development mode: permissive CORS
        CorsLayer::permissive()
    } else {
        // Production mode: configured origins, cookies allowed
        let origins: Vec<HeaderValue> = state
            .config
            .api
            .cors_origins
            .iter()
            .filter_map(|origin| origin.parse().ok())
            .collect();

        CorsLayer::new()
            .allow_origin(origins)
            .allow_methods([
                Method::GET,
                Method::POST,
                Method::PUT,
                Method::DELETE,
                Method::OPTIONS,
            ])
            .allow_headers([header::CONTENT_TYPE])
            .allow_credentials(true)
            .max_age(std::time::Duration::from_secs(3600))
    };

    Router::new()
        .route("/health", get(routes::health::health_check))
        .nest("/api", api_routes)
        .layer(
            TraceLayer::new_for_http()
                .make_span_with(DefaultMakeSpan::new().level(Level::INFO))
                .on_response(DefaultOnResponse::new().level(Level::INFO)),
        )
        .layer(cors)
        .layer(session_layer)
        .layer(axum::middleware::from_fn(security::security_headers))
        .with_state(state)
}
