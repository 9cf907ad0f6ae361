//! Response models for the cache server API
//!
//! This module defines the DTOs (Data Transfer Objects) serialized into
//! HTTP response bodies. Entry payloads travel as raw bytes and need none.

pub mod responses;

// Re-export commonly used types
pub use responses::{DeleteResponse, ErrorResponse, HealthResponse, StatsResponse, WriteResponse};
