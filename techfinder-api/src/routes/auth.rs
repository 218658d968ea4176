//! Authentication endpoints.
//!
//! # Endpoints
//!
//! - `POST /api/register` - Register a new user
//! - `POST /api/login` - Log in and establish a session
//! - `POST /api/logout` - Invalidate the session
//! - `GET  /api/auth/status` - Report the current session identity

use axum::{extract::State, Json};
use serde::{Deserialize, Serialize};
use tower_sessions::Session;
use validator::Validate;

use techfinder_shared::auth::{credentials, password};
use techfinder_shared::models::user::{CreateUser, User};

use crate::{
    app::AppState,
    error::{ApiError, ApiResult},
    extract::ValidatedJson,
    middleware::auth::{session_keys, OptionalUser, SessionUser},
};

/// Register request
#[derive(Debug, Deserialize, Validate)]
pub struct RegisterRequest {
    /// Login name
    #[validate(length(min = 1, max = 80, message = "Username must be 1-80 characters"))]
    pub username: String,

    /// Email address
    #[validate(email(message = "Invalid email format"), length(max = 120, message = "Email must be at most 120 characters"))]
    pub email: String,

    /// Password
    #[validate(length(min = 1, max = 128, message = "Password is required"))]
    pub password: String,
}

/// Register response
#[derive(Debug, Serialize)]
pub struct RegisterResponse {
    /// Always true
    pub success: bool,

    /// New user's id
    pub user_id: i64,

    /// New user's username
    pub username: String,
}

/// Login request
///
/// The `username` field also accepts an email address.
#[derive(Debug, Deserialize, Validate)]
pub struct LoginRequest {
    /// Username or email address
    #[validate(length(min = 1, message = "Username is required"))]
    pub username: String,

    /// Password
    #[validate(length(min = 1, message = "Password is required"))]
    pub password: String,
}

/// Login response
#[derive(Debug, Serialize)]
pub struct LoginResponse {
    /// Always true
    pub success: bool,

    /// Authenticated user's id
    pub user_id: i64,

    /// Authenticated user's username
    pub username: String,
}

/// Logout response
#[derive(Debug, Serialize)]
pub struct LogoutResponse {
    /// Always true
    pub success: bool,
}

/// Session status response
#[derive(Debug, Serialize)]
pub struct StatusResponse {
    /// Whether the request carries a valid session
    pub authenticated: bool,

    /// Bound user id, when authenticated
    #[serde(skip_serializing_if = "Option::is_none")]
    pub user_id: Option<i64>,

    /// Bound username, when authenticated
    #[serde(skip_serializing_if = "Option::is_none")]
    pub username: Option<String>,
}

/// Register a new user
///
/// Hashes the password and creates the account. Username and email
/// collisions surface as 409 from the unique constraints; no partial
/// write is possible.
///
/// # Errors
///
/// - `400 Bad Request`: Validation failed
/// - `409 Conflict`: Username or email already exists
pub async fn register(
    State(state): State<AppState>,
    ValidatedJson(req): ValidatedJson<RegisterRequest>,
) -> ApiResult<Json<RegisterResponse>> {
    let password_hash = password::hash_password(&req.password)?;

    let user = User::create(
        &state.db,
        CreateUser {
            username: req.username,
            email: req.email,
            password_hash,
        },
    )
    .await?;

    tracing::info!(user_id = user.id, username = %user.username, "User registered");

    Ok(Json(RegisterResponse {
        success: true,
        user_id: user.id,
        username: user.username,
    }))
}

/// Log in and establish a session
///
/// The identifier is checked against usernames first, then emails. On
/// success the session id is rotated and the user's identity is bound
/// to it. The response does not reveal whether the identifier existed.
///
/// # Errors
///
/// - `400 Bad Request`: Validation failed
/// - `401 Unauthorized`: Invalid credentials
pub async fn login(
    State(state): State<AppState>,
    session: Session,
    ValidatedJson(req): ValidatedJson<LoginRequest>,
) -> ApiResult<Json<LoginResponse>> {
    let user = credentials::authenticate(&state.db, &req.username, &req.password)
        .await?
        .ok_or_else(|| ApiError::Unauthorized("Invalid username or password".to_string()))?;

    // Fresh session id on privilege change
    session.cycle_id().await?;
    session
        .insert(
            session_keys::CURRENT_USER,
            SessionUser {
                user_id: user.id,
                username: user.username.clone(),
            },
        )
        .await?;

    tracing::info!(user_id = user.id, "User logged in");

    Ok(Json(LoginResponse {
        success: true,
        user_id: user.id,
        username: user.username,
    }))
}

/// Invalidate the session
///
/// Deletes the server-side session record and clears the cookie. Always
/// succeeds, including for anonymous callers.
pub async fn logout(session: Session) -> ApiResult<Json<LogoutResponse>> {
    session.flush().await?;

    Ok(Json(LogoutResponse { success: true }))
}

/// Report the current session identity
///
/// Answers from the session alone; the users table is not consulted.
pub async fn status(OptionalUser(user): OptionalUser) -> Json<StatusResponse> {
    match user {
        Some(user) => Json(StatusResponse {
            authenticated: true,
            user_id: Some(user.user_id),
            username: Some(user.username),
        }),
        None => Json(StatusResponse {
            authenticated: false,
            user_id: None,
            username: None,
        }),
    }
}
