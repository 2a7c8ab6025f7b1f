//! Per-request deadline.
//!
//! Runs the rest of the stack under `tokio::time::timeout`. On expiry the
//! handler future is dropped, which drops any in-flight `sqlx` query and
//! returns its connection to the pool. Client disconnects cancel the same way
//! since hyper drops the response future.

use axum::{
    extract::{Request, State},
    http::StatusCode,
    middleware::Next,
    response::{IntoResponse, Response},
};

use crate::error::reason_phrase;
use crate::state::AppState;

/// Middleware that bounds how long a request may run.
///
/// Responds `503 Service Unavailable` when the deadline elapses.
pub async fn deadline_middleware(
    State(state): State<AppState>,
    request: Request,
    next: Next,
) -> Response {
    let budget = state.request_timeout();
    let method = request.method().clone();
    let uri = request.uri().clone();

    match tokio::time::timeout(budget, next.run(request)).await {
        Ok(response) => response,
        Err(_) => {
            tracing::warn!(
                %method,
                %uri,
                timeout_ms = u64::try_from(budget.as_millis()).unwrap_or(u64::MAX),
                "Request deadline exceeded"
            );
            reason_phrase(StatusCode::SERVICE_UNAVAILABLE).into_response()
        }
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use std::time::Duration;

    use axum::{Router, body::Body, http::Request as HttpRequest, routing::get};
    use tower::ServiceExt;

    use super::*;
    use crate::test_support::lazy_state;

    fn app(state: AppState) -> Router {
        Router::new()
            .route("/fast", get(|| async { "done" }))
            .route(
                "/slow",
                get(|| async {
                    tokio::time::sleep(Duration::from_secs(5)).await;
                    "done"
                }),
            )
            .layer(axum::middleware::from_fn_with_state(
                state,
                deadline_middleware,
            ))
    }

    #[tokio::test]
    async fn test_fast_request_passes_through() {
        let state = lazy_state(Duration::from_millis(500));
        let response = app(state)
            .oneshot(HttpRequest::builder().uri("/fast").body(Body::empty()).unwrap())
            .await
            .unwrap();

        assert_eq!(response.status(), StatusCode::OK);
    }

    #[tokio::test]
    async fn test_slow_request_is_cut_off() {
        let state = lazy_state(Duration::from_millis(20));
        let response = app(state)
            .oneshot(HttpRequest::builder().uri("/slow").body(Body::empty()).unwrap())
            .await
            .unwrap();

        assert_eq!(response.status(), StatusCode::SERVICE_UNAVAILABLE);
    }
}
