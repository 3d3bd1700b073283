//! Flat-file persistence for the document store.

use std::path::{Path, PathBuf};
use thiserror::Error;
use tokio::fs::{self, File};
use tokio::io::AsyncWriteExt;

use super::types::Document;

/// Errors from the backing file
#[derive(Debug, Error)]
pub enum StoreError {
  #[error("IO error: {0}")]
  Io(#[from] std::io::Error),

  #[error("invalid document: {0}")]
  Json(#[from] serde_json::Error),
}

/// Storage gateway over a single JSON file.
///
/// The full document is read on every operation and written back whole on
/// every mutation; nothing is held in memory across requests. Concurrent
/// mutations race and the last full-document write wins.
#[derive(Debug, Clone)]
pub struct FileStore {
  path: PathBuf,
}

impl FileStore {
  pub fn new(path: impl AsRef<Path>) -> Self {
    Self {
      path: path.as_ref().to_path_buf(),
    }
  }

  /// Create the backing file with empty collections if it does not exist
  /// yet, including parent directories. Safe to call repeatedly.
  pub async fn ensure(&self) -> Result<(), StoreError> {
    if let Some(parent) = self.path.parent() {
      fs::create_dir_all(parent).await?;
    }
    if self.path.exists() {
      return Ok(());
    }
    self.write_atomic(&Document::default()).await?;
    tracing::info!("Created data file at {}", self.path.display());
    Ok(())
  }

  /// Read and strict-parse the full document. Unreadable or corrupt content
  /// is reported, not recovered.
  pub async fn load(&self) -> Result<Document, StoreError> {
    self.ensure().await?;
    let bytes = fs::read(&self.path).await?;
    Ok(serde_json::from_slice(&bytes)?)
  }

  /// Persist the full document, replacing the previous content atomically.
  pub async fn save(&self, doc: &Document) -> Result<(), StoreError> {
    self.ensure().await?;
    self.write_atomic(doc).await
  }

  // Write to a temp file, sync, then rename over the target so a reader
  // never observes a partial document.
  async fn write_atomic(&self, doc: &Document) -> Result<(), StoreError> {
    let json = serde_json::to_vec_pretty(doc)?;

    let tmp = PathBuf::from(format!("{}.tmp", self.path.display()));
    let mut file = File::create(&tmp).await?;
    file.write_all(&json).await?;
    file.sync_all().await?;
    drop(file);

    fs::rename(&tmp, &self.path).await?;
    Ok(())
  }
}

#[cfg(test)]
mod tests {
  use super::*;
  use crate::store::types::Product;

  fn sample_product(id: &str) -> Product {
    Product {
      id: id.into(),
      name: "Widget".into(),
      price: 9.99,
      created_at: "2026-01-01T00:00:00Z".into(),
      updated_at: None,
    }
  }

  #[tokio::test]
  async fn test_first_load_creates_empty_document() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("data").join("db.json");
    let store = FileStore::new(&path);

    let doc = store.load().await.unwrap();
    assert!(doc.products.is_empty());
    assert!(doc.orders.is_empty());
    assert!(path.exists());
  }

  #[tokio::test]
  async fn test_ensure_is_idempotent() {
    let dir = tempfile::tempdir().unwrap();
    let store = FileStore::new(dir.path().join("db.json"));

    store.ensure().await.unwrap();
    let mut doc = store.load().await.unwrap();
    doc.products.push(sample_product("p1"));
    store.save(&doc).await.unwrap();

    // A second ensure must not reset existing content
    store.ensure().await.unwrap();
    let doc = store.load().await.unwrap();
    assert_eq!(doc.products.len(), 1);
  }

  #[tokio::test]
  async fn test_save_then_load_round_trips() {
    let dir = tempfile::tempdir().unwrap();
    let store = FileStore::new(dir.path().join("db.json"));

    let mut doc = store.load().await.unwrap();
    doc.products.push(sample_product("p1"));
    store.save(&doc).await.unwrap();

    let loaded = store.load().await.unwrap();
    assert_eq!(loaded.products.len(), 1);
    assert_eq!(loaded.products[0].id, "p1");
    assert_eq!(loaded.products[0].price, 9.99);
  }

  #[tokio::test]
  async fn test_corrupt_file_is_reported() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("db.json");
    std::fs::write(&path, "not json at all").unwrap();

    let store = FileStore::new(&path);
    let err = store.load().await.unwrap_err();
    assert!(matches!(err, StoreError::Json(_)));
  }

  #[tokio::test]
  async fn test_wrong_shape_is_reported() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("db.json");
    std::fs::write(&path, r#"{"products": 5, "orders": []}"#).unwrap();

    let store = FileStore::new(&path);
    let err = store.load().await.unwrap_err();
    assert!(matches!(err, StoreError::Json(_)));
  }
}
