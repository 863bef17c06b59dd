//! Platform abstraction layer
//!
//! Handles browser/native differences for storage: LocalStorage on web, a
//! directory of files on native, and an in-memory map for tests and hosts
//! without persistence.

pub mod storage;

#[cfg(target_arch = "wasm32")]
pub use storage::LocalStore;
pub use storage::{FileStore, KeyValueStore, MemoryStore, StorageError};
