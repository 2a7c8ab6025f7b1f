//! Dotted RPC-style routes kept for older clients.
//!
//! ```text
//! GET  /customers.getById?id=N
//! GET  /customers.getAll
//! GET  /customers.getAllActive
//! POST /customers.save            (form: id, name, phone)
//! POST /customers.removeById?id=N
//! POST /customers.blockById?id=N
//! POST /customers.unblockById?id=N
//! ```
//!
//! These share the repository and status mapping of the resource routes.
//! The id is required on every by-id call and on save (`0` creates).

use axum::{
    extract::{Form, FromRequestParts, Query, State, rejection::FormRejection},
    http::request::Parts,
};
use serde::Deserialize;

use customer_registry_core::{Customer, CustomerId, SaveCustomer};

use super::customers::save_customer;
use super::extract::parse_customer_id;
use super::response::JsonBody;
use crate::error::{AppError, Result};
use crate::state::AppState;

/// The required `?id=` query parameter, parsed as a [`CustomerId`].
///
/// When `id` is repeated the first occurrence wins and the rest are ignored.
#[derive(Debug, Clone, Copy)]
pub struct IdParam(pub CustomerId);

impl<S> FromRequestParts<S> for IdParam
where
    S: Send + Sync,
{
    type Rejection = AppError;

    async fn from_request_parts(parts: &mut Parts, state: &S) -> Result<Self> {
        let Query(pairs) = Query::<Vec<(String, String)>>::from_request_parts(parts, state)
            .await
            .map_err(|e| AppError::BadRequest(e.body_text()))?;

        let id = pairs
            .into_iter()
            .find_map(|(key, value)| (key == "id").then_some(value));
        required_id(id.as_deref()).map(Self)
    }
}

/// Form body of `customers.save`.
///
/// Missing `name` or `phone` fields are saved as empty strings.
#[derive(Debug, Deserialize)]
pub struct SaveForm {
    id: Option<String>,
    #[serde(default)]
    name: String,
    #[serde(default)]
    phone: String,
}

fn required_id(raw: Option<&str>) -> Result<CustomerId> {
    let raw = raw.ok_or_else(|| AppError::BadRequest("missing `id` parameter".to_string()))?;
    parse_customer_id(raw)
}

/// `GET /customers.getById`
pub async fn get_by_id(
    State(state): State<AppState>,
    IdParam(id): IdParam,
) -> Result<JsonBody<Customer>> {
    Ok(JsonBody(state.customers().get_by_id(id).await?))
}

/// `GET /customers.getAll`
pub async fn get_all(State(state): State<AppState>) -> Result<JsonBody<Vec<Customer>>> {
    Ok(JsonBody(state.customers().list_all().await?))
}

/// `GET /customers.getAllActive`
pub async fn get_all_active(State(state): State<AppState>) -> Result<JsonBody<Vec<Customer>>> {
    Ok(JsonBody(state.customers().list_active().await?))
}

/// `POST /customers.save`
pub async fn save(
    State(state): State<AppState>,
    form: std::result::Result<Form<SaveForm>, FormRejection>,
) -> Result<JsonBody<Customer>> {
    let Form(form) = form.map_err(|e| AppError::BadRequest(e.body_text()))?;
    let id = required_id(form.id.as_deref())?;

    let payload = SaveCustomer::update(id, form.name, form.phone);
    save_customer(&state, &payload).await.map(JsonBody)
}

/// `POST /customers.removeById`
pub async fn remove_by_id(
    State(state): State<AppState>,
    IdParam(id): IdParam,
) -> Result<JsonBody<CustomerId>> {
    Ok(JsonBody(state.customers().remove(id).await?))
}

/// `POST /customers.blockById`
pub async fn block_by_id(
    State(state): State<AppState>,
    IdParam(id): IdParam,
) -> Result<JsonBody<Customer>> {
    Ok(JsonBody(state.customers().block(id).await?))
}

/// `POST /customers.unblockById`
pub async fn unblock_by_id(
    State(state): State<AppState>,
    IdParam(id): IdParam,
) -> Result<JsonBody<Customer>> {
    Ok(JsonBody(state.customers().unblock(id).await?))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_required_id_missing() {
        assert!(matches!(required_id(None), Err(AppError::BadRequest(_))));
    }

    #[test]
    fn test_required_id_present() {
        assert!(matches!(required_id(Some("8")), Ok(id) if id.as_i64() == 8));
    }

    #[test]
    fn test_required_id_negative() {
        assert!(matches!(required_id(Some("-8")), Err(AppError::BadRequest(_))));
    }
}
