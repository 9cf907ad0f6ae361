//! API Handlers
//!
//! HTTP request handlers for each cache server endpoint.

use std::sync::Arc;

use axum::{
    body::Bytes,
    extract::{Path, State},
    http::header,
    response::IntoResponse,
    Json,
};

use crate::cache::{DefaultExpirationPolicy, ValidatingCache};
use crate::config::Config;
use crate::error::{CacheError, Result};
use crate::models::{DeleteResponse, HealthResponse, StatsResponse, WriteResponse};
use crate::storage::FileStorage;

/// Maximum allowed key length in bytes
pub const MAX_KEY_LENGTH: usize = 1024;

/// Application state shared across all handlers.
#[derive(Clone, Debug)]
pub struct AppState {
    /// Validating cache; cheap to clone
    pub cache: ValidatingCache,
}

impl AppState {
    /// Creates a new AppState around the given cache.
    pub fn new(cache: ValidatingCache) -> Self {
        Self { cache }
    }

    /// Creates a new AppState from configuration.
    ///
    /// Opens file storage at the configured root and applies the configured
    /// time-to-live and payload limit.
    pub fn from_config(config: &Config) -> Result<Self> {
        let storage = FileStorage::open(&config.root_dir)?;
        let policy = DefaultExpirationPolicy::custom(config.ttl);
        let cache = ValidatingCache::new(Arc::new(storage), Arc::new(policy))
            .with_max_payload_size(config.max_payload_size);
        Ok(Self::new(cache))
    }
}

fn validate_key(key: &str) -> Result<()> {
    if key.is_empty() {
        return Err(CacheError::InvalidRequest("Key cannot be empty".to_string()));
    }
    if key.len() > MAX_KEY_LENGTH {
        return Err(CacheError::InvalidRequest(format!(
            "Key exceeds maximum length of {} bytes",
            MAX_KEY_LENGTH
        )));
    }
    Ok(())
}

/// Handler for PUT /entries/*key
///
/// Stores the raw request body under the key.
pub async fn write_handler(
    State(state): State<AppState>,
    Path(key): Path<String>,
    body: Bytes,
) -> Result<Json<WriteResponse>> {
    validate_key(&key)?;
    state.cache.write(&body, &key).await?;

    Ok(Json(WriteResponse::new(key)))
}

/// Handler for GET /entries/*key
///
/// Returns the stored payload as `application/octet-stream`.
pub async fn read_handler(
    State(state): State<AppState>,
    Path(key): Path<String>,
) -> Result<impl IntoResponse> {
    validate_key(&key)?;
    let payload = state.cache.read(&key).await?;

    Ok(([(header::CONTENT_TYPE, "application/octet-stream")], payload))
}

/// Handler for DELETE /entries/*key
pub async fn delete_handler(
    State(state): State<AppState>,
    Path(key): Path<String>,
) -> Result<Json<DeleteResponse>> {
    validate_key(&key)?;
    state.cache.delete(&key).await?;

    Ok(Json(DeleteResponse::new(key)))
}

/// Handler for GET /stats
pub async fn stats_handler(State(state): State<AppState>) -> Json<StatsResponse> {
    Json(StatsResponse::from(state.cache.stats()))
}

/// Handler for GET /health
pub async fn health_handler() -> Json<HealthResponse> {
    Json(HealthResponse::healthy())
}
