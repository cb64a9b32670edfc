//! Raw JSON body extractor.

use crate::errors::AppError;
use axum::extract::{FromRequest, Json, Request};
use serde_json::Value;

/// Request body parsed as an untyped JSON value.
///
/// Content-type and syntax checks happen here (415 and 400 respectively);
/// turning the value into a domain type is left to the handler so it can
/// report field-level problems in its own terms.
///
/// ```ignore
/// async fn create(JsonPayload(body): JsonPayload) -> Result<StatusCode, AppError> {
///     let input = ProductInput::from_json(body)?;
///     // ...
/// }
/// ```
#[derive(Debug, Clone)]
pub struct JsonPayload(pub Value);

impl<S> FromRequest<S> for JsonPayload
where
    S: Send + Sync,
{
    type Rejection = AppError;

    async fn from_request(req: Request, state: &S) -> Result<Self, Self::Rejection> {
        let Json(value) = Json::<Value>::from_request(req, state).await?;
        Ok(JsonPayload(value))
    }
}
