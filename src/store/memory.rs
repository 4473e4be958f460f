//! In-memory blob store for tests and ephemeral runs.

use super::{BlobStore, StoreError};
use parking_lot::Mutex;
use std::collections::HashMap;

#[derive(Debug, Default)]
pub struct MemoryStore {
    blobs: Mutex<HashMap<String, Vec<u8>>>,
}

impl BlobStore for MemoryStore {
    fn get_blob(&self, key: &str) -> Result<Vec<u8>, StoreError> {
        self.blobs
            .lock()
            .get(key)
            .cloned()
            .ok_or_else(|| StoreError::NotFound(key.to_string()))
    }

    fn set_blob(&self, key: &str, value: &[u8]) -> Result<(), StoreError> {
        self.blobs.lock().insert(key.to_string(), value.to_vec());
        Ok(())
    }
}
