use std::collections::BTreeMap;
use std::sync::RwLock;

use crate::error::KVError;
use crate::traits::KVStore;

/// MemoryKV keeps entries in a `BTreeMap` behind a lock.
///
/// Nothing is written to disk. Used by tests as the injected fake for
/// `RedbStore`, and by the CLI when `--ephemeral` is passed.
#[derive(Default)]
pub struct MemoryKV {
    entries: RwLock<BTreeMap<String, Vec<u8>>>,
}

impl MemoryKV {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn len(&self) -> usize {
        self.entries.read().unwrap().len()
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }
}

impl KVStore for MemoryKV {
    fn get(&self, key: &str) -> Result<Option<Vec<u8>>, KVError> {
        Ok(self.entries.read().unwrap().get(key).cloned())
    }

    fn set(&self, key: &str, value: &[u8]) -> Result<(), KVError> {
        self.entries
            .write()
            .unwrap()
            .insert(key.to_string(), value.to_vec());
        Ok(())
    }

    fn delete(&self, key: &str) -> Result<(), KVError> {
        self.entries.write().unwrap().remove(key);
        Ok(())
    }

    fn batch_set(&self, entries: &[(&str, &[u8])]) -> Result<(), KVError> {
        // One lock acquisition for the whole batch.
        let mut map = self.entries.write().unwrap();
        for (key, value) in entries {
            map.insert(key.to_string(), value.to_vec());
        }
        Ok(())
    }

    fn batch_delete(&self, keys: &[&str]) -> Result<(), KVError> {
        let mut map = self.entries.write().unwrap();
        for key in keys {
            map.remove(*key);
        }
        Ok(())
    }
}
