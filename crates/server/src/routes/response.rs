//! JSON response encoding.

use axum::{
    http::{HeaderValue, header},
    response::{IntoResponse, Response},
};
use serde::Serialize;

use crate::error::AppError;

/// A `200 OK` response whose body is `T` encoded as JSON.
///
/// Encoding failures become `AppError::Internal`, so they are reported and
/// answered like any other server error.
#[derive(Debug, Clone)]
pub struct JsonBody<T>(pub T);

impl<T> IntoResponse for JsonBody<T>
where
    T: Serialize,
{
    fn into_response(self) -> Response {
        match serde_json::to_vec(&self.0) {
            Ok(bytes) => (
                [(
                    header::CONTENT_TYPE,
                    HeaderValue::from_static("application/json"),
                )],
                bytes,
            )
                .into_response(),
            Err(err) => {
                AppError::Internal(format!("response serialization failed: {err}")).into_response()
            }
        }
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use std::collections::HashMap;

    use axum::{body::to_bytes, http::StatusCode};

    use super::*;

    #[tokio::test]
    async fn test_sets_json_content_type() {
        let response = JsonBody(vec![1, 2, 3]).into_response();

        assert_eq!(response.status(), StatusCode::OK);
        assert_eq!(
            response.headers().get(header::CONTENT_TYPE).unwrap(),
            "application/json"
        );
        let body = to_bytes(response.into_body(), 1024).await.unwrap();
        assert_eq!(&body[..], b"[1,2,3]");
    }

    #[test]
    fn test_serialization_failure_is_server_error() {
        // JSON object keys must be strings
        let mut map = HashMap::new();
        map.insert(vec![1_u8], "value");

        let response = JsonBody(map).into_response();
        assert_eq!(response.status(), StatusCode::INTERNAL_SERVER_ERROR);
    }
}
