use serde::{Deserialize, Serialize};
use serde_json::Value;

/// The single persisted root object holding both collections.
/// Collections keep insertion order.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct Document {
  pub products: Vec<Product>,
  pub orders: Vec<Order>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Product {
  pub id: String,
  pub name: String,
  pub price: f64,
  /// Set once at creation
  #[serde(rename = "createdAt")]
  pub created_at: String,
  /// Absent until the first update
  #[serde(rename = "updatedAt", skip_serializing_if = "Option::is_none")]
  pub updated_at: Option<String>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Order {
  pub id: String,
  pub customer: String,
  /// Opaque values; only "is a sequence" is enforced
  pub items: Vec<Value>,
  pub status: String,
  #[serde(rename = "createdAt")]
  pub created_at: String,
  #[serde(rename = "updatedAt", skip_serializing_if = "Option::is_none")]
  pub updated_at: Option<String>,
}

/// Creation payload for a product. Fields are optional so presence can be
/// validated explicitly: a `price` of zero is present, a `null` is not.
#[derive(Debug, Default, Deserialize)]
pub struct NewProduct {
  pub name: Option<String>,
  pub price: Option<f64>,
}

/// Partial-update payload for a product. Absent fields are left untouched.
#[derive(Debug, Default, Deserialize)]
pub struct ProductPatch {
  pub name: Option<String>,
  pub price: Option<f64>,
}

/// Creation payload for an order. `items` defaults to an empty sequence,
/// `status` to "NEW".
#[derive(Debug, Default, Deserialize)]
pub struct NewOrder {
  pub customer: Option<String>,
  pub items: Option<Vec<Value>>,
  pub status: Option<String>,
}

/// Partial-update payload for an order.
#[derive(Debug, Default, Deserialize)]
pub struct OrderPatch {
  pub customer: Option<String>,
  pub items: Option<Vec<Value>>,
  pub status: Option<String>,
}

#[cfg(test)]
mod tests {
  use super::*;

  #[test]
  fn test_updated_at_omitted_until_first_update() {
    let product = Product {
      id: "p1".into(),
      name: "Widget".into(),
      price: 9.99,
      created_at: "2026-01-01T00:00:00Z".into(),
      updated_at: None,
    };
    let json = serde_json::to_string(&product).unwrap();
    assert!(!json.contains("updatedAt"));
    assert!(json.contains("createdAt"));
  }

  #[test]
  fn test_null_price_counts_as_missing() {
    let payload: NewProduct = serde_json::from_str(r#"{"name":"x","price":null}"#).unwrap();
    assert!(payload.price.is_none());
  }

  #[test]
  fn test_zero_price_counts_as_present() {
    let payload: NewProduct = serde_json::from_str(r#"{"name":"x","price":0}"#).unwrap();
    assert_eq!(payload.price, Some(0.0));
  }

  #[test]
  fn test_non_sequence_items_rejected_by_shape() {
    let result = serde_json::from_str::<NewOrder>(r#"{"customer":"a","items":"nope"}"#);
    assert!(result.is_err());
  }
}
