mod orders;
mod products;

pub use orders::*;
pub use products::*;

use axum::routing::{delete, get, post, put};
use axum::{middleware, Json, Router};
use chrono::{SecondsFormat, Utc};
use serde_json::json;
use std::sync::Arc;
use tower_http::cors::{Any, CorsLayer};

use crate::auth::require_auth;
use crate::config::Config;
use crate::store::FileStore;

/// State shared across handlers and the auth middleware
pub struct AppState {
  pub store: FileStore,
  pub config: Config,
}

impl AppState {
  pub fn new(config: Config) -> Self {
    Self {
      store: FileStore::new(&config.data_file),
      config,
    }
  }
}

/// Current UTC time, RFC 3339 with a trailing `Z`
pub(crate) fn utc_now() -> String {
  Utc::now().to_rfc3339_opts(SecondsFormat::Micros, true)
}

/// GET /health - liveness probe, outside the authentication gate
pub async fn health() -> Json<serde_json::Value> {
  Json(json!({ "status": "ok", "time": utc_now() }))
}

/// Build the application router. Everything under `/api` passes through the
/// authentication gate; `/health` does not.
pub fn build_router(state: Arc<AppState>) -> Router {
  let cors = CorsLayer::new()
    .allow_origin(Any)
    .allow_methods(Any)
    .allow_headers(Any);

  let api = Router::new()
    // Products
    .route("/products", get(list_products))
    .route("/products", post(create_product))
    .route("/products/{id}", get(get_product))
    .route("/products/{id}", put(update_product))
    .route("/products/{id}", delete(delete_product))
    // Orders
    .route("/orders", get(list_orders))
    .route("/orders", post(create_order))
    .route("/orders/{id}", get(get_order))
    .route("/orders/{id}", put(update_order))
    .route("/orders/{id}", delete(delete_order))
    .layer(middleware::from_fn_with_state(state.clone(), require_auth));

  Router::new()
    .route("/health", get(health))
    .nest("/api", api)
    .layer(cors)
    .with_state(state)
}
