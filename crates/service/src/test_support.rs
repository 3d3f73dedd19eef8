#![cfg(test)]
use uuid::Uuid;

use crate::storage::DocumentStore;

/// A document store rooted in a fresh directory under the system temp dir.
pub async fn temp_store() -> DocumentStore {
    let dir = std::env::temp_dir().join(format!("carwash_store_{}", Uuid::new_v4()));
    DocumentStore::open(dir).await.expect("open temp store")
}
