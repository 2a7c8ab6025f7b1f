//! Customer route handlers.
//!
//! Each handler performs exactly one repository call and maps its outcome to
//! a single response: the JSON-encoded result, or an `AppError` status.

use axum::extract::State;

use customer_registry_core::{Customer, CustomerId, SaveCustomer};

use super::extract::{CustomerIdPath, JsonPayload};
use super::response::JsonBody;
use crate::error::{AppError, Result};
use crate::state::AppState;

/// `GET /customers` - every customer, store order.
pub async fn index(State(state): State<AppState>) -> Result<JsonBody<Vec<Customer>>> {
    let customers = state.customers().list_all().await?;
    Ok(JsonBody(customers))
}

/// `GET /customers/active` - customers that are not blocked.
pub async fn active(State(state): State<AppState>) -> Result<JsonBody<Vec<Customer>>> {
    let customers = state.customers().list_active().await?;
    Ok(JsonBody(customers))
}

/// `GET /customers/{id}`
pub async fn show(
    State(state): State<AppState>,
    CustomerIdPath(id): CustomerIdPath,
) -> Result<JsonBody<Customer>> {
    let customer = state.customers().get_by_id(id).await?;
    Ok(JsonBody(customer))
}

/// `POST /customers` - create when `id` is absent or zero, update otherwise.
pub async fn save(
    State(state): State<AppState>,
    JsonPayload(payload): JsonPayload<SaveCustomer>,
) -> Result<JsonBody<Customer>> {
    save_customer(&state, &payload).await.map(JsonBody)
}

/// `DELETE /customers/{id}` - responds with the removed id.
pub async fn remove(
    State(state): State<AppState>,
    CustomerIdPath(id): CustomerIdPath,
) -> Result<JsonBody<CustomerId>> {
    let removed = state.customers().remove(id).await?;
    Ok(JsonBody(removed))
}

/// `POST /customers/{id}/block`
pub async fn block(
    State(state): State<AppState>,
    CustomerIdPath(id): CustomerIdPath,
) -> Result<JsonBody<Customer>> {
    let customer = state.customers().block(id).await?;
    Ok(JsonBody(customer))
}

/// `DELETE /customers/{id}/block`
pub async fn unblock(
    State(state): State<AppState>,
    CustomerIdPath(id): CustomerIdPath,
) -> Result<JsonBody<Customer>> {
    let customer = state.customers().unblock(id).await?;
    Ok(JsonBody(customer))
}

/// Validate a save payload and hand it to the repository.
///
/// Shared with the legacy form-encoded save route.
pub(super) async fn save_customer(state: &AppState, payload: &SaveCustomer) -> Result<Customer> {
    if payload.id.is_negative() {
        return Err(AppError::BadRequest(format!(
            "customer id must not be negative: {}",
            payload.id
        )));
    }

    Ok(state.customers().save(payload).await?)
}
