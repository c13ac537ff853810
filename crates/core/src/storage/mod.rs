//! Persistent key-value layer.
//!
//! This module provides the `KeyValueStore` trait and two implementations:
//! a file-backed store that survives process restarts and an in-memory
//! store for tests and ephemeral sessions.

pub mod base;
pub mod file_store;
pub mod memory_store;

pub use base::{KeyValueStore, StorageError, StorageResult};
pub use file_store::FileStore;
pub use memory_store::MemoryStore;
