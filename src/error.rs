//! Error types for the cache
//!
//! Provides unified error handling using thiserror.

use axum::{
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use thiserror::Error;

use crate::models::ErrorResponse;

// == Storage Error Enum ==
/// Errors reported by a storage backend.
#[derive(Error, Debug)]
pub enum StorageError {
    /// No entry stored under the key
    #[error("Entry not found: {0}")]
    NotFound(String),

    /// Key cannot be mapped to a storage location
    #[error("Invalid key: {0}")]
    InvalidKey(String),

    /// Underlying I/O failure
    #[error("I/O error for '{key}': {source}")]
    Io {
        key: String,
        #[source]
        source: std::io::Error,
    },
}

impl StorageError {
    /// Wraps an I/O error, mapping `NotFound` onto [`StorageError::NotFound`].
    pub fn from_io(key: &str, source: std::io::Error) -> Self {
        if source.kind() == std::io::ErrorKind::NotFound {
            StorageError::NotFound(key.to_string())
        } else {
            StorageError::Io {
                key: key.to_string(),
                source,
            }
        }
    }
}

// == Cache Error Enum ==
/// Unified error type for the validating cache.
#[derive(Error, Debug)]
pub enum CacheError {
    /// Payload could not be wrapped and serialized; the backend was not called
    #[error("Encoding error: {0}")]
    Encoding(String),

    /// Stored bytes are not a valid envelope
    #[error("Decoding error: {0}")]
    Decoding(String),

    /// Entry decoded but its time-to-live has elapsed
    #[error("Data no longer valid: {0}")]
    DataNoLongerValid(String),

    /// Backend read failed, whatever the reason
    #[error("No data: {0}")]
    NoData(String),

    /// Backend failure passed through unchanged
    #[error(transparent)]
    Storage(#[from] StorageError),

    /// Invalid request data
    #[error("Invalid request: {0}")]
    InvalidRequest(String),
}

// == IntoResponse Implementation ==
impl IntoResponse for CacheError {
    fn into_response(self) -> Response {
        let status = match &self {
            CacheError::NoData(_) | CacheError::DataNoLongerValid(_) => StatusCode::NOT_FOUND,
            CacheError::Encoding(_) => StatusCode::PAYLOAD_TOO_LARGE,
            CacheError::Decoding(_) => StatusCode::INTERNAL_SERVER_ERROR,
            CacheError::InvalidRequest(_) => StatusCode::BAD_REQUEST,
            CacheError::Storage(StorageError::NotFound(_)) => StatusCode::NOT_FOUND,
            CacheError::Storage(StorageError::InvalidKey(_)) => StatusCode::BAD_REQUEST,
            CacheError::Storage(StorageError::Io { .. }) => StatusCode::INTERNAL_SERVER_ERROR,
        };

        let body = Json(ErrorResponse::new(self.to_string()));

        (status, body).into_response()
    }
}

// == Result Type Alias ==
/// Convenience Result type for cache operations.
pub type Result<T> = std::result::Result<T, CacheError>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_from_io_maps_not_found() {
        let err = StorageError::from_io(
            "a/b",
            std::io::Error::new(std::io::ErrorKind::NotFound, "missing"),
        );
        assert!(matches!(err, StorageError::NotFound(key) if key == "a/b"));
    }

    #[test]
    fn test_from_io_keeps_other_kinds() {
        let err = StorageError::from_io(
            "a/b",
            std::io::Error::new(std::io::ErrorKind::PermissionDenied, "denied"),
        );
        assert!(matches!(err, StorageError::Io { .. }));
        assert!(err.to_string().contains("a/b"));
    }

    #[test]
    fn test_status_codes() {
        let cases = [
            (CacheError::NoData("k".into()), StatusCode::NOT_FOUND),
            (CacheError::DataNoLongerValid("k".into()), StatusCode::NOT_FOUND),
            (CacheError::Encoding("big".into()), StatusCode::PAYLOAD_TOO_LARGE),
            (CacheError::Decoding("bad".into()), StatusCode::INTERNAL_SERVER_ERROR),
            (
                CacheError::Storage(StorageError::InvalidKey("..".into())),
                StatusCode::BAD_REQUEST,
            ),
            (
                CacheError::Storage(StorageError::NotFound("k".into())),
                StatusCode::NOT_FOUND,
            ),
        ];

        for (err, expected) in cases {
            assert_eq!(err.into_response().status(), expected);
        }
    }
}
