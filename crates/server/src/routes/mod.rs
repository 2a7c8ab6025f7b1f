//! HTTP route handlers.
//!
//! # Route Structure
//!
//! ```text
//! GET    /health                 - Liveness probe
//! GET    /health/ready           - Readiness probe (checks the database)
//!
//! # Customers
//! GET    /customers              - All customers
//! GET    /customers/active       - Customers that are not blocked
//! GET    /customers/{id}         - One customer
//! POST   /customers              - Create (id absent or 0) or update
//! DELETE /customers/{id}         - Remove, responds with the removed id
//! POST   /customers/{id}/block   - Block
//! DELETE /customers/{id}/block   - Unblock
//!
//! # Legacy RPC-style routes
//! GET    /customers.getById?id=N
//! GET    /customers.getAll
//! GET    /customers.getAllActive
//! POST   /customers.save
//! POST   /customers.removeById?id=N
//! POST   /customers.blockById?id=N
//! POST   /customers.unblockById?id=N
//! ```
//!
//! # Status Mapping
//!
//! - `200` with a JSON body on success
//! - `400` for an unparseable id or save payload
//! - `404` when the targeted customer does not exist (including id `0`)
//! - `500` for store or encoding failures
//! - `503` when the request deadline elapses

pub mod customers;
pub mod extract;
pub mod health;
pub mod legacy;
pub mod response;

use axum::{
    Router,
    routing::{get, post},
};
use tower_http::trace::{DefaultOnResponse, OnResponse, TraceLayer};
use tracing::Span;

use crate::middleware::{deadline_middleware, request_id_middleware};
use crate::state::AppState;

/// Create the customer resource routes.
pub fn customer_routes() -> Router<AppState> {
    Router::new()
        .route("/", get(customers::index).post(customers::save))
        .route("/active", get(customers::active))
        .route("/{id}", get(customers::show).delete(customers::remove))
        .route(
            "/{id}/block",
            post(customers::block).delete(customers::unblock),
        )
}

/// Create the legacy RPC-style routes.
pub fn legacy_routes() -> Router<AppState> {
    Router::new()
        .route("/customers.getById", get(legacy::get_by_id))
        .route("/customers.getAll", get(legacy::get_all))
        .route("/customers.getAllActive", get(legacy::get_all_active))
        .route("/customers.save", post(legacy::save))
        .route("/customers.removeById", post(legacy::remove_by_id))
        .route("/customers.blockById", post(legacy::block_by_id))
        .route("/customers.unblockById", post(legacy::unblock_by_id))
}

/// Create all application routes.
pub fn routes() -> Router<AppState> {
    Router::new()
        .route("/health", get(health::health))
        .route("/health/ready", get(health::readiness))
        .nest("/customers", customer_routes())
        .merge(legacy_routes())
}

/// Build the full application: routes, middleware, and state.
///
/// Sentry layers are added by the binary, outside of this stack.
pub fn app(state: AppState) -> Router {
    routes()
        .layer(axum::middleware::from_fn_with_state(
            state.clone(),
            deadline_middleware,
        ))
        .layer(axum::middleware::from_fn(request_id_middleware))
        .layer(
            TraceLayer::new_for_http()
                .make_span_with(|request: &axum::http::Request<_>| {
                    tracing::info_span!(
                        "http_request",
                        method = %request.method(),
                        uri = %request.uri(),
                        request_id = tracing::field::Empty,
                        status = tracing::field::Empty,
                        latency_ms = tracing::field::Empty,
                    )
                })
                .on_response(
                    |response: &axum::http::Response<_>,
                     latency: std::time::Duration,
                     span: &Span| {
                        span.record("status", response.status().as_u16());
                        span.record(
                            "latency_ms",
                            u64::try_from(latency.as_millis()).unwrap_or(u64::MAX),
                        );
                        DefaultOnResponse::default().on_response(response, latency, span);
                    },
                ),
        )
        .with_state(state)
}
