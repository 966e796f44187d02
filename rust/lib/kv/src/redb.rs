use std::path::Path;
use std::sync::Arc;

use redb::{Database, ReadableTable, Table, TableDefinition};
use tracing::debug;

use crate::error::KVError;
use crate::traits::KVStore;

const TABLE: TableDefinition<&str, &[u8]> = TableDefinition::new("kv");

/// RedbStore is a KVStore implementation backed by redb, a pure-Rust embedded
/// key-value database. Every mutation is one write transaction, so the
/// batch operations are atomic.
pub struct RedbStore {
    db: Arc<Database>,
}

impl RedbStore {
    /// Open or create a redb database at the given path.
    pub fn open(path: &Path) -> Result<Self, KVError> {
        if let Some(parent) = path.parent() {
            std::fs::create_dir_all(parent).map_err(KVError::storage)?;
        }
        let db = Database::create(path).map_err(KVError::storage)?;
        let store = Self { db: Arc::new(db) };

        // Create the table up front so reads on a fresh file don't fail.
        store.write(|_| Ok(()))?;
        debug!("RedbStore: opened {:?}", path);
        Ok(store)
    }

    /// Run `f` inside a single write transaction and commit it.
    fn write<F>(&self, f: F) -> Result<(), KVError>
    where
        F: FnOnce(&mut Table<'_, &'static str, &'static [u8]>) -> Result<(), KVError>,
    {
        let txn = self.db.begin_write().map_err(KVError::storage)?;
        {
            let mut table = txn.open_table(TABLE).map_err(KVError::storage)?;
            f(&mut table)?;
        }
        txn.commit().map_err(KVError::storage)
    }
}

impl KVStore for RedbStore {
    fn get(&self, key: &str) -> Result<Option<Vec<u8>>, KVError> {
        let txn = self.db.begin_read().map_err(KVError::storage)?;
        let table = txn.open_table(TABLE).map_err(KVError::storage)?;
        let value = table.get(key).map_err(KVError::storage)?;
        Ok(value.map(|v| v.value().to_vec()))
    }

    fn set(&self, key: &str, value: &[u8]) -> Result<(), KVError> {
        self.write(|table| {
            table.insert(key, value).map_err(KVError::storage)?;
            Ok(())
        })
    }

    fn delete(&self, key: &str) -> Result<(), KVError> {
        self.write(|table| {
            table.remove(key).map_err(KVError::storage)?;
            Ok(())
        })
    }

    fn batch_set(&self, entries: &[(&str, &[u8])]) -> Result<(), KVError> {
        self.write(|table| {
            for (key, value) in entries {
                table.insert(*key, *value).map_err(KVError::storage)?;
            }
            Ok(())
        })
    }

    fn batch_delete(&self, keys: &[&str]) -> Result<(), KVError> {
        self.write(|table| {
            for key in keys {
                table.remove(*key).map_err(KVError::storage)?;
            }
            Ok(())
        })
    }
}
