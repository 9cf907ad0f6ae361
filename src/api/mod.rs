//! API Module
//!
//! HTTP handlers and routing for the cache server REST API.
//!
//! # Endpoints
//! - `PUT /entries/*key` - Store the request body under a key
//! - `GET /entries/*key` - Retrieve a still-valid payload
//! - `DELETE /entries/*key` - Delete an entry
//! - `GET /stats` - Get cache statistics
//! - `GET /health` - Health check endpoint

pub mod handlers;
pub mod routes;

pub use handlers::*;
pub use routes::create_router;
