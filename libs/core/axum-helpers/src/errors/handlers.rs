use axum::{http::StatusCode, response::Response};
use axum::response::IntoResponse;

use super::ErrorResponse;

/// Fallback for unknown routes.
pub async fn not_found() -> Response {
    ErrorResponse::new(
        StatusCode::NOT_FOUND,
        "Not Found: The requested resource was not found",
    )
    .into_response()
}

/// Fallback for known routes hit with an unsupported method.
pub async fn method_not_allowed() -> Response {
    ErrorResponse::new(
        StatusCode::METHOD_NOT_ALLOWED,
        "Method Not Allowed: The HTTP method is not allowed for this resource",
    )
    .into_response()
}
