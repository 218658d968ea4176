//! Error handling for the API server.
//!
//! Provides a unified error type that maps to HTTP responses. All
//! handlers return `Result<T, ApiError>`, which converts to the
//! appropriate status code with a JSON body of the shape
//! `{"success": false, "error": "<message>"}`.
//!
//! Database constraint violations are translated here: unique-constraint
//! hits become 409 Conflict with a message naming what collided, and
//! foreign-key failures on wishlist inserts become 404 Not Found.

use axum::{
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use serde::{Deserialize, Serialize};
use std::fmt;

use techfinder_shared::auth::credentials::CredentialError;
use techfinder_shared::auth::password::PasswordError;

/// API result type alias
pub type ApiResult<T> = Result<T, ApiError>;

/// Unified API error type
#[derive(Debug)]
pub enum ApiError {
    /// Missing or malformed input (400)
    Validation(String),

    /// Bad credentials or missing session (401)
    Unauthorized(String),

    /// Authenticated but wrong identity (403)
    Forbidden(String),

    /// Missing entity (404)
    NotFound(String),

    /// Uniqueness violation (409)
    Conflict(String),

    /// Internal server error (500)
    Internal(String),
}

/// Error response body
///
/// Every failed request carries this shape, whatever the status code.
#[derive(Debug, Serialize, Deserialize)]
pub struct ErrorBody {
    /// Always false
    pub success: bool,

    /// Human-readable error message
    pub error: String,
}

impl fmt::Display for ApiError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ApiError::Validation(msg) => write!(f, "Validation failed: {}", msg),
            ApiError::Unauthorized(msg) => write!(f, "Unauthorized: {}", msg),
            ApiError::Forbidden(msg) => write!(f, "Forbidden: {}", msg),
            ApiError::NotFound(msg) => write!(f, "Not found: {}", msg),
            ApiError::Conflict(msg) => write!(f, "Conflict: {}", msg),
            ApiError::Internal(msg) => write!(f, "Internal error: {}", msg),
        }
    }
}

impl std::error::Error for ApiError {}

impl ApiError {
    /// Status code this error maps to
    pub fn status_code(&self) -> StatusCode {
        match self {
            ApiError::Validation(_) => StatusCode::BAD_REQUEST,
            ApiError::Unauthorized(_) => StatusCode::UNAUTHORIZED,
            ApiError::Forbidden(_) => StatusCode::FORBIDDEN,
            ApiError::NotFound(_) => StatusCode::NOT_FOUND,
            ApiError::Conflict(_) => StatusCode::CONFLICT,
            ApiError::Internal(_) => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        let status = self.status_code();

        let message = match self {
            ApiError::Internal(msg) => {
                // Log the detail, do not leak it to clients
                tracing::error!("Internal error: {}", msg);
                "An internal error occurred".to_string()
            }
            ApiError::Validation(msg)
            | ApiError::Unauthorized(msg)
            | ApiError::Forbidden(msg)
            | ApiError::NotFound(msg)
            | ApiError::Conflict(msg) => msg,
        };

        let body = Json(ErrorBody {
            success: false,
            error: message,
        });

        (status, body).into_response()
    }
}

/// Convert sqlx errors to API errors
///
/// Constraint names come from the migrations; matching on them turns a
/// raw database rejection into the precise client-facing conflict.
impl From<sqlx::Error> for ApiError {
    fn from(err: sqlx::Error) -> Self {
        match err {
            sqlx::Error::RowNotFound => ApiError::NotFound("Resource not found".to_string()),
            sqlx::Error::Database(db_err) => {
                use sqlx::error::ErrorKind;

                match db_err.kind() {
                    ErrorKind::UniqueViolation => {
                        let constraint = db_err.constraint().unwrap_or_default();
                        let message = match constraint {
                            "users_username_key" => "Username already exists",
                            "users_email_key" => "Email already exists",
                            "products_name_key" => "Product name already exists",
                            "wishlist_items_user_product_key" => "Product already in wishlist",
                            _ => "Resource already exists",
                        };
                        ApiError::Conflict(message.to_string())
                    }
                    ErrorKind::ForeignKeyViolation => {
                        // Only wishlist inserts carry foreign keys; a
                        // violation means the referenced row is gone.
                        let constraint = db_err.constraint().unwrap_or_default();
                        let message = if constraint.contains("product") {
                            "Product not found"
                        } else if constraint.contains("user") {
                            "User not found"
                        } else {
                            "Referenced resource not found"
                        };
                        ApiError::NotFound(message.to_string())
                    }
                    ErrorKind::CheckViolation => {
                        ApiError::Validation("Value rejected by a data constraint".to_string())
                    }
                    _ => ApiError::Internal(format!("Database error: {}", db_err)),
                }
            }
            _ => ApiError::Internal(format!("Database error: {}", err)),
        }
    }
}

/// Convert password errors to API errors
impl From<PasswordError> for ApiError {
    fn from(err: PasswordError) -> Self {
        ApiError::Internal(format!("Password operation failed: {}", err))
    }
}

/// Convert credential verification errors to API errors
///
/// These are infrastructure failures only; a credential mismatch is a
/// successful `None` result upstream, never an error.
impl From<CredentialError> for ApiError {
    fn from(err: CredentialError) -> Self {
        ApiError::Internal(format!("Credential verification failed: {}", err))
    }
}

/// Convert session store errors to API errors
impl From<tower_sessions::session::Error> for ApiError {
    fn from(err: tower_sessions::session::Error) -> Self {
        ApiError::Internal(format!("Session operation failed: {}", err))
    }
}
