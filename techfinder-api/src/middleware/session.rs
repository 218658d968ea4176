//! Session middleware configuration.
//!
//! Sessions are server-side records in PostgreSQL, referenced by an
//! opaque id in a cookie. The cookie is HttpOnly (no script access) and
//! SameSite=Lax (no cross-site submission), with Secure added on HTTPS
//! deployments.

use sqlx::PgPool;
use tower_sessions::{cookie::SameSite, Expiry, SessionManagerLayer};
use tower_sessions_sqlx_store::PostgresStore;

use crate::config::Config;

/// Session cookie name
pub const SESSION_COOKIE_NAME: &str = "techfinder_session";

/// Creates the session layer backed by a PostgreSQL store
///
/// Runs the store's own migration so the session table exists before
/// the first request.
///
/// # Errors
///
/// Returns an error if the session table migration fails.
pub async fn create_session_layer(
    pool: &PgPool,
    config: &Config,
) -> Result<SessionManagerLayer<PostgresStore>, sqlx::Error> {
    let store = PostgresStore::new(pool.clone());
    store.migrate().await?;

    let layer = SessionManagerLayer::new(store)
        .with_name(SESSION_COOKIE_NAME)
        .with_expiry(Expiry::OnInactivity(
            tower_sessions::cookie::time::Duration::seconds(config.session.expiry_seconds),
        ))
        .with_secure(config.session.secure)
        .with_same_site(SameSite::Lax)
        .with_http_only(true)
        .with_path("/");

    Ok(layer)
}
