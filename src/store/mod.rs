//! Durable keyed-blob store.
//!
//! Values are JSON-encoded blobs under string keys. The server reads two keys
//! at startup:
//!
//! - `listeners`: `Vec<ListenSpec>`; absent means a single plaintext
//!   listener on `0.0.0.0:6667`
//! - `id`: the persistent server [`Uuid`]; generated and written if absent

mod memory;
mod redb;

pub use self::memory::MemoryStore;
pub use self::redb::RedbStore;

use serde::Serialize;
use serde::de::DeserializeOwned;
use thiserror::Error;
use tracing::info;
use uuid::Uuid;

use crate::config::ListenSpec;

pub const LISTENERS_KEY: &str = "listeners";
pub const ID_KEY: &str = "id";

/// Store errors.
#[derive(Debug, Error)]
pub enum StoreError {
    #[error("key not found: {0}")]
    NotFound(String),
    #[error("database error: {0}")]
    Database(String),
    #[error("serialization error: {0}")]
    Serialization(#[from] serde_json::Error),
}

/// Raw blob access.
pub trait BlobStore: Send + Sync {
    /// Fetch the blob under `key`, or [`StoreError::NotFound`].
    fn get_blob(&self, key: &str) -> Result<Vec<u8>, StoreError>;

    /// Replace the blob under `key`.
    fn set_blob(&self, key: &str, value: &[u8]) -> Result<(), StoreError>;
}

/// Typed JSON access on top of [`BlobStore`].
pub trait BlobStoreExt: BlobStore {
    fn get<T: DeserializeOwned>(&self, key: &str) -> Result<T, StoreError> {
        let blob = self.get_blob(key)?;
        Ok(serde_json::from_slice(&blob)?)
    }

    fn set<T: Serialize + ?Sized>(&self, key: &str, value: &T) -> Result<(), StoreError> {
        let blob = serde_json::to_vec(value)?;
        self.set_blob(key, &blob)
    }
}

impl<S: BlobStore + ?Sized> BlobStoreExt for S {}

/// Listener list, falling back to [`ListenSpec::defaults`]. The fallback is
/// not written back.
pub fn load_listeners<S: BlobStore + ?Sized>(store: &S) -> Result<Vec<ListenSpec>, StoreError> {
    match store.get::<Vec<ListenSpec>>(LISTENERS_KEY) {
        Ok(listeners) => Ok(listeners),
        Err(StoreError::NotFound(_)) => {
            info!("No listeners stored, using defaults");
            Ok(ListenSpec::defaults())
        }
        Err(e) => Err(e),
    }
}

/// Persistent server id, created on first start.
pub fn load_or_create_id<S: BlobStore + ?Sized>(store: &S) -> Result<Uuid, StoreError> {
    match store.get::<Uuid>(ID_KEY) {
        Ok(id) => Ok(id),
        Err(StoreError::NotFound(_)) => {
            let id = Uuid::new_v4();
            store.set(ID_KEY, &id)?;
            info!(%id, "Generated new server id");
            Ok(id)
        }
        Err(e) => Err(e),
    }
}
