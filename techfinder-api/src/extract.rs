//! Validated JSON request extraction.
//!
//! Every endpoint declares an explicit request struct with `validator`
//! rules. `ValidatedJson` deserializes the body and runs validation in
//! one step, so handlers only ever see well-formed input. Both a body
//! that fails to deserialize and one that fails validation surface as a
//! 400 with a field-level message.

use async_trait::async_trait;
use axum::extract::{FromRequest, Request};
use axum::Json;
use serde::de::DeserializeOwned;
use validator::{Validate, ValidationErrors};

use crate::error::ApiError;

/// JSON extractor that also runs `validator` rules
///
/// # Example
///
/// ```rust,ignore
/// async fn handler(
///     ValidatedJson(req): ValidatedJson<LoginRequest>,
/// ) -> ApiResult<Json<LoginResponse>> {
///     // req has already passed validation
/// }
/// ```
#[derive(Debug, Clone)]
pub struct ValidatedJson<T>(pub T);

#[async_trait]
impl<T, S> FromRequest<S> for ValidatedJson<T>
where
    T: DeserializeOwned + Validate,
    S: Send + Sync,
{
    type Rejection = ApiError;

    async fn from_request(req: Request, state: &S) -> Result<Self, Self::Rejection> {
        let Json(value) = Json::<T>::from_request(req, state)
            .await
            .map_err(|rejection| ApiError::Validation(rejection.body_text()))?;

        value
            .validate()
            .map_err(|errors| ApiError::Validation(flatten_errors(&errors)))?;

        Ok(Self(value))
    }
}

/// Collapses validator output into a single "field: message" listing
fn flatten_errors(errors: &ValidationErrors) -> String {
    let mut parts: Vec<String> = errors
        .field_errors()
        .iter()
        .flat_map(|(field, errors)| {
            errors.iter().map(move |error| {
                let message = error
                    .message
                    .as_ref()
                    .map(|m| m.to_string())
                    .unwrap_or_else(|| "invalid value".to_string());
                format!("{}: {}", field, message)
            })
        })
        .collect();

    parts.sort();
    parts.join("; ")
}
