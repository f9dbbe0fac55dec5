//! API error type and [`axum::response::IntoResponse`] implementation.

use axum::{
  Json,
  http::StatusCode,
  response::{IntoResponse, Response},
};
use serde::de::DeserializeOwned;
use serde_json::json;
use thiserror::Error;

/// An error returned by an API handler.
#[derive(Debug, Error)]
pub enum ApiError {
  #[error("not found: {0}")]
  NotFound(String),

  #[error("bad request: {0}")]
  BadRequest(String),

  #[error("conflict: {0}")]
  Conflict(String),

  #[error("internal error: {0}")]
  Internal(#[source] Box<dyn std::error::Error + Send + Sync>),
}

impl From<confo_core::Error> for ApiError {
  fn from(e: confo_core::Error) -> Self {
    match e {
      confo_core::Error::Backend(source) => Self::Internal(source),
      other if other.is_conflict() => Self::Conflict(other.to_string()),
      other if other.is_not_found() => Self::NotFound(other.to_string()),
      // Validation and role mismatches: the client sent a bad request.
      other => Self::BadRequest(other.to_string()),
    }
  }
}

impl IntoResponse for ApiError {
  fn into_response(self) -> Response {
    let (status, message) = match &self {
      ApiError::NotFound(m) => (StatusCode::NOT_FOUND, m.clone()),
      ApiError::BadRequest(m) => (StatusCode::BAD_REQUEST, m.clone()),
      ApiError::Conflict(m) => (StatusCode::CONFLICT, m.clone()),
      ApiError::Internal(e) => {
        // The cause is logged, never echoed back to the client.
        tracing::error!(error = %e, "internal error while handling request");
        (StatusCode::INTERNAL_SERVER_ERROR, "internal server error".into())
      }
    };
    (status, Json(json!({ "error": message }))).into_response()
  }
}

/// Deserialize a request body into an insert/patch type, turning shape
/// errors (missing fields, wrong types, unknown fields) into a 400 rather
/// than axum's default rejection.
pub fn parse_body<T: DeserializeOwned>(
  value: serde_json::Value,
) -> Result<T, ApiError> {
  serde_json::from_value(value).map_err(|e| ApiError::BadRequest(e.to_string()))
}
