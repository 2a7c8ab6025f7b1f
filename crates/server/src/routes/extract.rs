//! Request extractors that reject with `AppError`.
//!
//! axum's stock rejections answer with descriptive plain-text bodies. These
//! wrappers route every rejection through `AppError` so clients only ever see
//! the reason phrase.

use axum::{
    Json,
    extract::{FromRequest, FromRequestParts, Path, Request},
    http::request::Parts,
};
use serde::de::DeserializeOwned;

use customer_registry_core::CustomerId;

use crate::error::AppError;

/// Parse a client-supplied customer id.
///
/// # Errors
///
/// Returns `AppError::BadRequest` unless `raw` is a non-negative integer.
pub fn parse_customer_id(raw: &str) -> Result<CustomerId, AppError> {
    raw.parse::<CustomerId>()
        .map_err(|e| AppError::BadRequest(e.to_string()))
}

/// The `{id}` path segment, parsed as a [`CustomerId`].
///
/// Zero parses successfully; the repository answers it with not-found.
#[derive(Debug, Clone, Copy)]
pub struct CustomerIdPath(pub CustomerId);

impl<S> FromRequestParts<S> for CustomerIdPath
where
    S: Send + Sync,
{
    type Rejection = AppError;

    async fn from_request_parts(parts: &mut Parts, state: &S) -> Result<Self, Self::Rejection> {
        let Path(raw) = Path::<String>::from_request_parts(parts, state)
            .await
            .map_err(|e| AppError::BadRequest(e.body_text()))?;

        parse_customer_id(&raw).map(Self)
    }
}

/// A JSON request body decoded into `T`.
///
/// Malformed JSON, wrong field types, missing fields and a non-JSON content
/// type all reject as `AppError::BadRequest`.
#[derive(Debug, Clone)]
pub struct JsonPayload<T>(pub T);

impl<T, S> FromRequest<S> for JsonPayload<T>
where
    T: DeserializeOwned,
    S: Send + Sync,
{
    type Rejection = AppError;

    async fn from_request(req: Request, state: &S) -> Result<Self, Self::Rejection> {
        let Json(value) = Json::<T>::from_request(req, state)
            .await
            .map_err(|e| AppError::BadRequest(e.body_text()))?;

        Ok(Self(value))
    }
}
