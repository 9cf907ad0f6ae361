//! Local Cache - A file-backed key/value cache
//!
//! Persists byte payloads under string keys and rejects reads once a
//! configurable time-to-live has elapsed.

pub mod api;
pub mod cache;
pub mod config;
pub mod error;
pub mod models;
pub mod storage;
pub mod tasks;

pub use api::AppState;
pub use cache::{DefaultExpirationPolicy, ExpirationPolicy, TtlPreset, ValidatingCache};
pub use config::Config;
pub use error::{CacheError, StorageError};
pub use storage::{FileStorage, MemoryStorage, StorageBackend};
pub use tasks::spawn_sweep_task;
