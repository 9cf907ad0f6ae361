//! Storage Module
//!
//! Raw byte storage addressed by string keys.

mod file;
mod memory;

use async_trait::async_trait;

use crate::error::StorageError;

pub use file::FileStorage;
pub use memory::MemoryStorage;

/// Byte-level storage collaborator.
///
/// Implementations must report a missing entry as [`StorageError::NotFound`]
/// from both `read` and `delete`.
#[async_trait]
pub trait StorageBackend: Send + Sync {
    async fn read(&self, key: &str) -> Result<Vec<u8>, StorageError>;

    /// Creates or overwrites the entry at `key`.
    async fn write(&self, data: &[u8], key: &str) -> Result<(), StorageError>;

    async fn delete(&self, key: &str) -> Result<(), StorageError>;

    /// Every key currently stored.
    async fn keys(&self) -> Result<Vec<String>, StorageError>;
}
