use crate::error::KVError;

/// KVStore is the key-value contract for client-side persistence.
///
/// Keys are namespaced with a colon (`auth:token`, `auth:user`,
/// `pending:collect`). Values are opaque bytes; callers choose the encoding
/// (JSON everywhere in this workspace).
pub trait KVStore: Send + Sync {
    /// Get the value for a key. Returns None if the key does not exist.
    fn get(&self, key: &str) -> Result<Option<Vec<u8>>, KVError>;

    /// Set a key-value pair, overwriting any previous value.
    fn set(&self, key: &str, value: &[u8]) -> Result<(), KVError>;

    /// Delete a key. Deleting a missing key is not an error.
    fn delete(&self, key: &str) -> Result<(), KVError>;

    /// Write several entries atomically: either all land or none do.
    fn batch_set(&self, entries: &[(&str, &[u8])]) -> Result<(), KVError>;

    /// Delete several keys atomically.
    fn batch_delete(&self, keys: &[&str]) -> Result<(), KVError>;

    /// Check whether a key exists.
    fn contains(&self, key: &str) -> Result<bool, KVError> {
        Ok(self.get(key)?.is_some())
    }
}
