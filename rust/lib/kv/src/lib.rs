//! Durable client-side key-value storage.
//!
//! Everything the client keeps between runs (the auth pair, the pending
//! collect intent) goes through [`KVStore`]. `RedbStore` is the on-disk
//! backend; `MemoryKV` keeps the same contract in memory for tests and
//! throwaway sessions.

pub mod error;
pub mod memory;
pub mod redb;
pub mod traits;

pub use error::KVError;
pub use memory::MemoryKV;
pub use redb::RedbStore;
pub use traits::KVStore;
