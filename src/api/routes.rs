//! API Routes
//!
//! Configures the Axum router with all cache server endpoints.

use axum::{
    extract::DefaultBodyLimit,
    routing::{get, put},
    Router,
};
use tower_http::{
    cors::{Any, CorsLayer},
    trace::TraceLayer,
};

use super::handlers::{
    delete_handler, health_handler, read_handler, stats_handler, write_handler, AppState,
};

/// Creates the main router with all endpoints configured.
///
/// # Endpoints
/// - `PUT /entries/*key` - Store the request body under a key
/// - `GET /entries/*key` - Retrieve a payload by key
/// - `DELETE /entries/*key` - Delete an entry
/// - `GET /stats` - Get cache statistics
/// - `GET /health` - Health check endpoint
///
/// # Middleware
/// - Body limit: the cache's payload limit, so oversized bodies are refused early
/// - CORS: Allows any origin (configurable for production)
/// - Tracing: Logs all requests for debugging
pub fn create_router(state: AppState) -> Router {
    // Configure CORS middleware
    let cors = CorsLayer::new()
        .allow_origin(Any)
        .allow_methods(Any)
        .allow_headers(Any);

    let body_limit = state.cache.max_payload_size();

    // Build router with all endpoints
    Router::new()
        .route(
            "/entries/*key",
            put(write_handler).get(read_handler).delete(delete_handler),
        )
        .route("/stats", get(stats_handler))
        .route("/health", get(health_handler))
        .layer(DefaultBodyLimit::max(body_limit))
        .layer(cors)
        .layer(TraceLayer::new_for_http())
        .with_state(state)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::cache::{AlwaysValid, ExpirationPolicy, NeverValid, ValidatingCache};
    use crate::storage::MemoryStorage;
    use axum::{
        body::Body,
        http::{Request, StatusCode},
    };
    use std::sync::Arc;
    use tower::util::ServiceExt;

    fn create_test_app(policy: Arc<dyn ExpirationPolicy>) -> (Router, ValidatingCache) {
        let cache = ValidatingCache::new(Arc::new(MemoryStorage::new()), policy)
            .with_max_payload_size(64);
        (create_router(AppState::new(cache.clone())), cache)
    }

    fn request(method: &str, uri: &str, body: impl Into<Body>) -> Request<Body> {
        Request::builder()
            .method(method)
            .uri(uri)
            .body(body.into())
            .unwrap()
    }

    #[tokio::test]
    async fn test_nested_key_reaches_cache() {
        let (app, cache) = create_test_app(Arc::new(AlwaysValid));

        let response = app
            .oneshot(request("PUT", "/entries/feeds/2024/latest.json", "{}"))
            .await
            .unwrap();

        assert_eq!(response.status(), StatusCode::OK);
        assert_eq!(cache.read("feeds/2024/latest.json").await.unwrap(), b"{}");
    }

    #[tokio::test]
    async fn test_expired_read_is_counted() {
        let (app, cache) = create_test_app(Arc::new(NeverValid));
        cache.write(b"stale", "stale").await.unwrap();

        let response = app
            .oneshot(request("GET", "/entries/stale", Body::empty()))
            .await
            .unwrap();

        assert_eq!(response.status(), StatusCode::NOT_FOUND);
        let stats = cache.stats();
        assert_eq!(stats.expired, 1);
        assert_eq!(stats.misses, 1);
        assert_eq!(stats.hits, 0);
    }

    #[tokio::test]
    async fn test_body_over_payload_limit_is_refused() {
        let (app, cache) = create_test_app(Arc::new(AlwaysValid));

        let response = app
            .oneshot(request("PUT", "/entries/big", vec![1u8; 65]))
            .await
            .unwrap();

        assert_eq!(response.status(), StatusCode::PAYLOAD_TOO_LARGE);
        assert_eq!(cache.stats().writes, 0);
    }

    #[tokio::test]
    async fn test_delete_missing_entry_is_not_found() {
        let (app, cache) = create_test_app(Arc::new(AlwaysValid));

        let response = app
            .oneshot(request("DELETE", "/entries/nonexistent", Body::empty()))
            .await
            .unwrap();

        assert_eq!(response.status(), StatusCode::NOT_FOUND);
        assert_eq!(cache.stats().deletes, 0);
    }
}
