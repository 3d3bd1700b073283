//! Request authentication gate.
//!
//! Three independent schemes guard the `/api` subtree: an `x-api-key`
//! header, a bearer token, and basic credentials. Each scheme is a pure
//! predicate over the request headers; a request is admitted when at least
//! one passes. Every scheme is evaluated before the verdict, so no scheme
//! can shadow another and the failure path is unambiguous.

use axum::extract::{Request, State};
use axum::http::HeaderMap;
use axum::middleware::Next;
use axum::response::{IntoResponse, Response};
use base64::engine::general_purpose::STANDARD as BASE64;
use base64::Engine as _;
use std::sync::Arc;

use crate::config::AuthConfig;
use crate::error::ApiError;
use crate::routes::AppState;
use crate::security::constant_time_compare;

/// `x-api-key` header matches the configured API key.
/// Fails closed when no key is configured.
pub fn api_key_scheme(headers: &HeaderMap, auth: &AuthConfig) -> bool {
  let Some(expected) = auth.api_key.as_deref() else {
    return false;
  };
  headers
    .get("x-api-key")
    .and_then(|v| v.to_str().ok())
    .map(|provided| constant_time_compare(provided, expected))
    .unwrap_or(false)
}

/// `Authorization: Bearer <token>` matches the configured token.
pub fn bearer_scheme(headers: &HeaderMap, auth: &AuthConfig) -> bool {
  let Some(expected) = auth.bearer_token.as_deref() else {
    return false;
  };
  headers
    .get("authorization")
    .and_then(|v| v.to_str().ok())
    .and_then(|v| v.strip_prefix("Bearer "))
    .map(|token| constant_time_compare(token, expected))
    .unwrap_or(false)
}

/// `Authorization: Basic <base64(user:pass)>` matches the configured pair.
/// Fails closed unless both username and password are configured.
pub fn basic_scheme(headers: &HeaderMap, auth: &AuthConfig) -> bool {
  let (Some(user), Some(pass)) = (auth.basic_user.as_deref(), auth.basic_pass.as_deref()) else {
    return false;
  };

  let Some(encoded) = headers
    .get("authorization")
    .and_then(|v| v.to_str().ok())
    .and_then(|v| v.strip_prefix("Basic "))
  else {
    return false;
  };
  let Ok(decoded) = BASE64.decode(encoded) else {
    return false;
  };
  let Ok(credentials) = String::from_utf8(decoded) else {
    return false;
  };
  let Some((provided_user, provided_pass)) = credentials.split_once(':') else {
    return false;
  };

  constant_time_compare(provided_user, user) && constant_time_compare(provided_pass, pass)
}

/// Middleware guarding everything nested under `/api`.
///
/// All three schemes are collected into booleans first and combined with a
/// logical OR. When none passed, a missing server-side API key is reported
/// as a misconfiguration rather than blamed on the client.
pub async fn require_auth(
  State(state): State<Arc<AppState>>,
  request: Request,
  next: Next,
) -> Response {
  let auth = &state.config.auth;
  let headers = request.headers();

  let admitted = [
    api_key_scheme(headers, auth),
    bearer_scheme(headers, auth),
    basic_scheme(headers, auth),
  ]
  .into_iter()
  .any(|passed| passed);

  if admitted {
    return next.run(request).await;
  }

  if auth.api_key.is_none() {
    tracing::error!("API_KEY is not configured; rejecting request with 500");
    return ApiError::Misconfigured.into_response();
  }

  tracing::debug!(
    "Request to {} failed all authentication schemes",
    request.uri().path()
  );
  ApiError::Unauthorized.into_response()
}
