mod file;
mod types;

pub use file::{FileStore, StoreError};
pub use types::*;
