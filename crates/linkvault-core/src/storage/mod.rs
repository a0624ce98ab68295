//! Storage layer
//!
//! A small key-value seam standing in for the browser's local storage,
//! plus the persistence adapter that keeps the whole link collection
//! under a single key.
//!
//! ## Backends
//!
//! - **FileStorage**: one JSON file per key in the data directory
//! - **MemoryStorage**: in-process map for tests and throwaway sessions

pub mod error;
pub mod file;
pub mod memory;
pub mod persistence;

pub use error::{StorageError, StorageResult};
pub use file::{is_valid_key, FileStorage};
pub use memory::MemoryStorage;
pub use persistence::{LinkPersistence, DEFAULT_STORAGE_KEY};

/// Key-value storage holding string blobs
///
/// Writes always replace the whole value stored under a key.
pub trait KeyValueStorage {
    /// Read the value stored under `key`, `None` if nothing is stored
    fn get(&self, key: &str) -> StorageResult<Option<String>>;

    /// Store `value` under `key`, replacing any previous value
    fn set(&mut self, key: &str, value: &str) -> StorageResult<()>;

    /// Remove the value stored under `key`, if any
    fn remove(&mut self, key: &str) -> StorageResult<()>;
}
