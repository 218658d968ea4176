//! Credential verification against the user store.
//!
//! Callers log in with a single identifier field that may hold either a
//! username or an email address. Lookup tries the username first and
//! falls back to email. Whether the identifier was unknown or the
//! password was wrong is logged at debug level only; the caller receives
//! the same `Ok(None)` either way so responses cannot be used to probe
//! which accounts exist.

use sqlx::PgPool;
use tracing::debug;

use crate::auth::password::{verify_password, PasswordError};
use crate::models::user::User;

/// Error type for credential verification
///
/// Both variants are infrastructure failures; a plain credential
/// mismatch is not an error but an `Ok(None)` result.
#[derive(Debug, thiserror::Error)]
pub enum CredentialError {
    /// Database lookup failed
    #[error("Database error: {0}")]
    Database(#[from] sqlx::Error),

    /// Stored hash could not be processed
    #[error(transparent)]
    Password(#[from] PasswordError),
}

/// Verifies an identifier + password pair
///
/// The identifier is matched against usernames first, then email
/// addresses. On a password match the full user record is returned.
///
/// Returns `Ok(None)` when the identifier is unknown or the password
/// does not match; the two cases are indistinguishable to the caller.
///
/// # Errors
///
/// Returns `CredentialError` only for infrastructure failures (database
/// unreachable, stored hash unparsable), never for a credential
/// mismatch.
pub async fn authenticate(
    pool: &PgPool,
    identifier: &str,
    password: &str,
) -> Result<Option<User>, CredentialError> {
    let user = match User::find_by_username(pool, identifier).await? {
        Some(user) => Some(user),
        None => User::find_by_email(pool, identifier).await?,
    };

    let Some(user) = user else {
        debug!(identifier, "Authentication failed: unknown identifier");
        return Ok(None);
    };

    if verify_password(password, &user.password_hash)? {
        debug!(user_id = user.id, "Authentication successful");
        Ok(Some(user))
    } else {
        debug!(user_id = user.id, "Authentication failed: wrong password");
        Ok(None)
    }
}
