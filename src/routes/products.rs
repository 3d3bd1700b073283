use axum::body::Bytes;
use axum::extract::{Path, State};
use axum::http::StatusCode;
use axum::Json;
use std::sync::Arc;
use uuid::Uuid;

use super::{utc_now, AppState};
use crate::error::ApiError;
use crate::store::{NewProduct, Product, ProductPatch};

/// GET /api/products - full collection in insertion order
pub async fn list_products(
  State(state): State<Arc<AppState>>,
) -> Result<Json<Vec<Product>>, ApiError> {
  let doc = state.store.load().await?;
  Ok(Json(doc.products))
}

/// GET /api/products/{id}
pub async fn get_product(
  State(state): State<Arc<AppState>>,
  Path(id): Path<String>,
) -> Result<Json<Product>, ApiError> {
  let doc = state.store.load().await?;
  doc
    .products
    .into_iter()
    .find(|p| p.id == id)
    .map(Json)
    .ok_or(ApiError::NotFound("Product"))
}

/// POST /api/products
pub async fn create_product(
  State(state): State<Arc<AppState>>,
  body: Bytes,
) -> Result<(StatusCode, Json<Product>), ApiError> {
  // An unparseable body degrades to an empty payload and fails the
  // presence checks below with the domain's own message.
  let payload: NewProduct = serde_json::from_slice(&body).unwrap_or_default();

  // `price` is checked for presence, never truthiness: zero is a legal price.
  let name = payload.name.filter(|n| !n.is_empty());
  let (Some(name), Some(price)) = (name, payload.price) else {
    return Err(ApiError::Validation("name and price are required".into()));
  };

  let mut doc = state.store.load().await?;
  let created = Product {
    id: Uuid::new_v4().to_string(),
    name,
    price,
    created_at: utc_now(),
    updated_at: None,
  };
  doc.products.push(created.clone());
  state.store.save(&doc).await?;

  tracing::debug!("Created product {}", created.id);
  Ok((StatusCode::CREATED, Json(created)))
}

/// PUT /api/products/{id} - merge only the fields present in the payload
pub async fn update_product(
  State(state): State<Arc<AppState>>,
  Path(id): Path<String>,
  body: Bytes,
) -> Result<Json<Product>, ApiError> {
  let patch: ProductPatch = serde_json::from_slice(&body).unwrap_or_default();

  let mut doc = state.store.load().await?;
  let product = doc
    .products
    .iter_mut()
    .find(|p| p.id == id)
    .ok_or(ApiError::NotFound("Product"))?;

  if let Some(name) = patch.name {
    product.name = name;
  }
  if let Some(price) = patch.price {
    product.price = price;
  }
  product.updated_at = Some(utc_now());

  let updated = product.clone();
  state.store.save(&doc).await?;
  Ok(Json(updated))
}

/// DELETE /api/products/{id} - 204 on success, 404 if nothing was removed
pub async fn delete_product(
  State(state): State<Arc<AppState>>,
  Path(id): Path<String>,
) -> Result<StatusCode, ApiError> {
  let mut doc = state.store.load().await?;
  let before = doc.products.len();
  doc.products.retain(|p| p.id != id);
  if doc.products.len() == before {
    return Err(ApiError::NotFound("Product"));
  }
  state.store.save(&doc).await?;
  Ok(StatusCode::NO_CONTENT)
}
