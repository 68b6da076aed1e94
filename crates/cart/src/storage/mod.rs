//! Durable key-value storage abstraction.
//!
//! The cart treats persistence as an opaque async get/set-by-key text store.
//! Two backends ship with the crate: [`MemoryStore`] for tests and ephemeral
//! sessions, and [`FileStore`] for real installs.

use async_trait::async_trait;
use thiserror::Error;

mod file;
mod memory;

pub use file::FileStore;
pub use memory::MemoryStore;

/// Errors surfaced by a durable store backend.
#[derive(Debug, Error)]
pub enum StorageError {
    /// Underlying I/O failed.
    #[error("storage i/o error: {0}")]
    Io(#[from] std::io::Error),

    /// Backend-specific failure (malformed store file, encoding error, ...).
    #[error("storage backend error: {0}")]
    Backend(String),
}

/// An opaque durable key-value store.
///
/// Keys are namespaced strings, values are serialized text. Implementations
/// use `&self` with interior mutability so a single instance can be shared
/// behind an `Arc`.
#[async_trait]
pub trait DurableStore: Send + Sync {
    /// Fetch the value stored under `key`.
    ///
    /// Returns `Ok(None)` if the key has never been written.
    ///
    /// # Errors
    ///
    /// Returns [`StorageError`] if the backend cannot be read.
    async fn get(&self, key: &str) -> Result<Option<String>, StorageError>;

    /// Store `value` under `key`, replacing any previous value.
    ///
    /// # Errors
    ///
    /// Returns [`StorageError`] if the write does not reach the backend.
    async fn set(&self, key: &str, value: &str) -> Result<(), StorageError>;
}
