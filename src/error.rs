use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use axum::Json;
use serde_json::json;
use thiserror::Error;

use crate::store::StoreError;

/// API error taxonomy. Every error is terminal for the request: no retries,
/// no partial success.
#[derive(Debug, Error)]
pub enum ApiError {
  /// Missing or invalid required field in a create payload
  #[error("{0}")]
  Validation(String),

  /// No entity with the requested id; carries the entity kind for the
  /// user-facing message ("Product not found", "Order not found")
  #[error("{0} not found")]
  NotFound(&'static str),

  /// No authentication scheme admitted the request
  #[error("Unauthorized")]
  Unauthorized,

  /// The API key secret was never configured server-side
  #[error("Server misconfigured: API_KEY missing")]
  Misconfigured,

  /// Backing file unreadable or corrupt; reported, not recovered
  #[error("storage error: {0}")]
  Store(#[from] StoreError),
}

impl ApiError {
  /// Get the HTTP status code for this error
  pub fn status_code(&self) -> StatusCode {
    match self {
      ApiError::Validation(_) => StatusCode::BAD_REQUEST,
      ApiError::NotFound(_) => StatusCode::NOT_FOUND,
      ApiError::Unauthorized => StatusCode::UNAUTHORIZED,
      ApiError::Misconfigured | ApiError::Store(_) => StatusCode::INTERNAL_SERVER_ERROR,
    }
  }
}

impl IntoResponse for ApiError {
  fn into_response(self) -> Response {
    if matches!(self, ApiError::Store(_)) {
      tracing::error!("{}", self);
    }
    (self.status_code(), Json(json!({ "error": self.to_string() }))).into_response()
  }
}
