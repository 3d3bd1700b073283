use axum::body::Bytes;
use axum::extract::{Path, State};
use axum::http::StatusCode;
use axum::Json;
use std::sync::Arc;
use uuid::Uuid;

use super::{utc_now, AppState};
use crate::error::ApiError;
use crate::store::{NewOrder, Order, OrderPatch};

/// GET /api/orders
pub async fn list_orders(State(state): State<Arc<AppState>>) -> Result<Json<Vec<Order>>, ApiError> {
  let doc = state.store.load().await?;
  Ok(Json(doc.orders))
}

/// GET /api/orders/{id}
pub async fn get_order(
  State(state): State<Arc<AppState>>,
  Path(id): Path<String>,
) -> Result<Json<Order>, ApiError> {
  let doc = state.store.load().await?;
  doc
    .orders
    .into_iter()
    .find(|o| o.id == id)
    .map(Json)
    .ok_or(ApiError::NotFound("Order"))
}

/// POST /api/orders
pub async fn create_order(
  State(state): State<Arc<AppState>>,
  body: Bytes,
) -> Result<(StatusCode, Json<Order>), ApiError> {
  // A body where `items` is not a sequence fails to parse and degrades to
  // the empty payload, which the presence check below rejects.
  let payload: NewOrder = serde_json::from_slice(&body).unwrap_or_default();

  let Some(customer) = payload.customer.filter(|c| !c.is_empty()) else {
    return Err(ApiError::Validation(
      "customer and items[] are required".into(),
    ));
  };

  let mut doc = state.store.load().await?;
  let created = Order {
    id: Uuid::new_v4().to_string(),
    customer,
    items: payload.items.unwrap_or_default(),
    status: payload.status.unwrap_or_else(|| "NEW".to_string()),
    created_at: utc_now(),
    updated_at: None,
  };
  doc.orders.push(created.clone());
  state.store.save(&doc).await?;

  tracing::debug!("Created order {}", created.id);
  Ok((StatusCode::CREATED, Json(created)))
}

/// PUT /api/orders/{id} - merge only the fields present in the payload
pub async fn update_order(
  State(state): State<Arc<AppState>>,
  Path(id): Path<String>,
  body: Bytes,
) -> Result<Json<Order>, ApiError> {
  let patch: OrderPatch = serde_json::from_slice(&body).unwrap_or_default();

  let mut doc = state.store.load().await?;
  let order = doc
    .orders
    .iter_mut()
    .find(|o| o.id == id)
    .ok_or(ApiError::NotFound("Order"))?;

  if let Some(customer) = patch.customer {
    order.customer = customer;
  }
  if let Some(items) = patch.items {
    order.items = items;
  }
  if let Some(status) = patch.status {
    order.status = status;
  }
  order.updated_at = Some(utc_now());

  let updated = order.clone();
  state.store.save(&doc).await?;
  Ok(Json(updated))
}

/// DELETE /api/orders/{id}
pub async fn delete_order(
  State(state): State<Arc<AppState>>,
  Path(id): Path<String>,
) -> Result<StatusCode, ApiError> {
  let mut doc = state.store.load().await?;
  let before = doc.orders.len();
  doc.orders.retain(|o| o.id != id);
  if doc.orders.len() == before {
    return Err(ApiError::NotFound("Order"));
  }
  state.store.save(&doc).await?;
  Ok(StatusCode::NO_CONTENT)
}
