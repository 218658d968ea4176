//! User profile endpoints.
//!
//! Both endpoints are scoped to a specific user id, so the session's
//! bound identity must match the path id. A mismatch is 403, distinct
//! from the 401 an anonymous request receives.
//!
//! # Endpoints
//!
//! - `GET    /api/users/:id` - Fetch the authenticated user's profile
//! - `DELETE /api/users/:id` - Delete the authenticated user's account

use axum::{
    extract::{Path, State},
    Json,
};
use serde::Serialize;
use tower_sessions::Session;

use techfinder_shared::models::user::{PublicUser, User};

use crate::{
    app::AppState,
    error::{ApiError, ApiResult},
    middleware::auth::{CurrentUser, SessionUser},
};

/// User profile response
#[derive(Debug, Serialize)]
pub struct UserResponse {
    /// Always true
    pub success: bool,

    /// Identity fields, never the password hash
    pub user: PublicUser,
}

/// Account deletion response
#[derive(Debug, Serialize)]
pub struct DeletedResponse {
    /// Always true
    pub success: bool,
}

fn require_self(current: &SessionUser, requested_id: i64) -> Result<(), ApiError> {
    if current.user_id != requested_id {
        return Err(ApiError::Forbidden(
            "You can only access your own account".to_string(),
        ));
    }
    Ok(())
}

/// Fetch a user's profile
///
/// # Errors
///
/// - `401 Unauthorized`: No session
/// - `403 Forbidden`: Session bound to a different user
/// - `404 Not Found`: Account no longer exists
pub async fn get_user(
    State(state): State<AppState>,
    CurrentUser(current): CurrentUser,
    Path(id): Path<i64>,
) -> ApiResult<Json<UserResponse>> {
    require_self(&current, id)?;

    let user = User::find_by_id(&state.db, id)
        .await?
        .ok_or_else(|| ApiError::NotFound("User not found".to_string()))?;

    Ok(Json(UserResponse {
        success: true,
        user: user.into(),
    }))
}

/// Delete a user's account
///
/// Wishlist entries are removed by cascade, and the session is flushed
/// so the deleted identity cannot keep acting.
///
/// # Errors
///
/// - `401 Unauthorized`: No session
/// - `403 Forbidden`: Session bound to a different user
/// - `404 Not Found`: Account no longer exists
pub async fn delete_user(
    State(state): State<AppState>,
    CurrentUser(current): CurrentUser,
    session: Session,
    Path(id): Path<i64>,
) -> ApiResult<Json<DeletedResponse>> {
    require_self(&current, id)?;

    let deleted = User::delete(&state.db, id).await?;
    if !deleted {
        return Err(ApiError::NotFound("User not found".to_string()));
    }

    session.flush().await?;

    tracing::info!(user_id = id, "User account deleted");

    Ok(Json(DeletedResponse { success: true }))
}
