//! Redb-backed blob store.

use super::{BlobStore, StoreError};
use redb::{Database, ReadableDatabase, TableDefinition, TableError};
use std::path::Path;

const CONFIG_TABLE: TableDefinition<&str, &[u8]> = TableDefinition::new("config");

pub struct RedbStore {
    db: Database,
}

impl RedbStore {
    /// Open the database at `path`, creating it if needed.
    pub fn open<P: AsRef<Path>>(path: P) -> Result<Self, StoreError> {
        let db = Database::create(path).map_err(|e| StoreError::Database(e.to_string()))?;
        Ok(Self { db })
    }
}

impl BlobStore for RedbStore {
    fn get_blob(&self, key: &str) -> Result<Vec<u8>, StoreError> {
        let read_txn = self
            .db
            .begin_read()
            .map_err(|e| StoreError::Database(e.to_string()))?;
        let table = match read_txn.open_table(CONFIG_TABLE) {
            Ok(table) => table,
            Err(TableError::TableDoesNotExist(_)) => {
                return Err(StoreError::NotFound(key.to_string()));
            }
            Err(e) => return Err(StoreError::Database(e.to_string())),
        };

        let value = table
            .get(key)
            .map_err(|e| StoreError::Database(e.to_string()))?
            .ok_or_else(|| StoreError::NotFound(key.to_string()))?;
        Ok(value.value().to_vec())
    }

    fn set_blob(&self, key: &str, value: &[u8]) -> Result<(), StoreError> {
        let write_txn = self
            .db
            .begin_write()
            .map_err(|e| StoreError::Database(e.to_string()))?;
        {
            let mut table = write_txn
                .open_table(CONFIG_TABLE)
                .map_err(|e| StoreError::Database(e.to_string()))?;
            table
                .insert(key, value)
                .map_err(|e| StoreError::Database(e.to_string()))?;
        }
        write_txn
            .commit()
            .map_err(|e| StoreError::Database(e.to_string()))?;
        Ok(())
    }
}
