//! Current-user extraction from the session.
//!
//! The session is the per-request capability; these extractors validate
//! it and hand route handlers the bound identity. Handlers that take
//! [`CurrentUser`] reject anonymous requests with 401 before any
//! business logic runs.

use async_trait::async_trait;
use axum::{extract::FromRequestParts, http::request::Parts};
use serde::{Deserialize, Serialize};
use tower_sessions::Session;

use crate::error::ApiError;

/// Keys under which values are stored in the session
pub mod session_keys {
    /// The authenticated user's identity
    pub const CURRENT_USER: &str = "current_user";
}

/// Identity bound to a session at login
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SessionUser {
    /// The authenticated user's id
    pub user_id: i64,

    /// The authenticated user's username
    pub username: String,
}

/// Extractor that requires an authenticated session
///
/// # Example
///
/// ```rust,ignore
/// async fn protected_handler(
///     CurrentUser(user): CurrentUser,
/// ) -> ApiResult<Json<Response>> {
///     tracing::info!(user_id = user.user_id, "authenticated request");
///     // ...
/// }
/// ```
pub struct CurrentUser(pub SessionUser);

#[async_trait]
impl<S> FromRequestParts<S> for CurrentUser
where
    S: Send + Sync,
{
    type Rejection = ApiError;

    async fn from_request_parts(parts: &mut Parts, _state: &S) -> Result<Self, Self::Rejection> {
        let session = parts
            .extensions
            .get::<Session>()
            .ok_or_else(|| ApiError::Unauthorized("Authentication required".to_string()))?;

        let user: SessionUser = session
            .get(session_keys::CURRENT_USER)
            .await
            .map_err(ApiError::from)?
            .ok_or_else(|| ApiError::Unauthorized("Authentication required".to_string()))?;

        Ok(Self(user))
    }
}

/// Extractor that optionally reads the current user
///
/// Unlike [`CurrentUser`], anonymous requests are not rejected; the
/// inner option is simply None.
pub struct OptionalUser(pub Option<SessionUser>);

#[async_trait]
impl<S> FromRequestParts<S> for OptionalUser
where
    S: Send + Sync,
{
    type Rejection = ApiError;

    async fn from_request_parts(parts: &mut Parts, _state: &S) -> Result<Self, Self::Rejection> {
        let Some(session) = parts.extensions.get::<Session>() else {
            return Ok(Self(None));
        };

        let user = session
            .get(session_keys::CURRENT_USER)
            .await
            .map_err(ApiError::from)?;

        Ok(Self(user))
    }
}
