//! API Routes
//!
//! Configures the Axum router for the cache monitor.

use axum::{
    routing::{get, post, put},
    Router,
};
use tower_http::{
    cors::{Any, CorsLayer},
    trace::TraceLayer,
};

use super::handlers::{
    add_relation_handler, clear_handler, get_entry_handler, health_handler,
    invalidate_handler, invalidate_tag_handler, metrics_handler, set_entry_handler, AppState,
};

/// Creates the monitor router with all endpoints configured.
///
/// # Endpoints
/// - `PUT /entries` - Store a value with TTL/tags/priority
/// - `GET /entries/:key` - Read a value (404 when absent)
/// - `DELETE /entries/:key` - Invalidate a key
/// - `POST /invalidate/tags/:tag` - Bulk-invalidate by tag
/// - `POST /relations` - Seed a predictive relation
/// - `GET /metrics` - Metrics snapshot (dashboard polling)
/// - `POST /clear` - Full reset
/// - `GET /health` - Health check
///
/// # Middleware
/// - CORS: allows any origin (configurable for production)
/// - Tracing: logs all requests for debugging
pub fn create_router(state: AppState) -> Router {
    let cors = CorsLayer::new()
        .allow_origin(Any)
        .allow_methods(Any)
        .allow_headers(Any);

    Router::new()
        .route("/entries", put(set_entry_handler))
        .route(
            "/entries/:key",
            get(get_entry_handler).delete(invalidate_handler),
        )
        .route("/invalidate/tags/:tag", post(invalidate_tag_handler))
        .route("/relations", post(add_relation_handler))
        .route("/metrics", get(metrics_handler))
        .route("/clear", post(clear_handler))
        .route("/health", get(health_handler))
        .layer(cors)
        .layer(TraceLayer::new_for_http())
        .with_state(state)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::Config;
    use axum::{
        body::Body,
        http::{Request, StatusCode},
    };
    use tower::util::ServiceExt;

    fn create_test_app() -> Router {
        let state = AppState::from_config(&Config::default());
        create_router(state)
    }

    #[tokio::test]
    async fn test_health_endpoint() {
        let app = create_test_app();

        let response = app
            .oneshot(
                Request::builder()
                    .uri("/health")
                    .body(Body::empty())
                    .unwrap(),
            )
            .await
            .unwrap();

        assert_eq!(response.status(), StatusCode::OK);
    }

    #[tokio::test]
    async fn test_metrics_endpoint() {
        let app = create_test_app();

        let response = app
            .oneshot(
                Request::builder()
                    .uri("/metrics")
                    .body(Body::empty())
                    .unwrap(),
            )
            .await
            .unwrap();

        assert_eq!(response.status(), StatusCode::OK);
    }

    #[tokio::test]
    async fn test_set_endpoint() {
        let app = create_test_app();

        let response = app
            .oneshot(
                Request::builder()
                    .method("PUT")
                    .uri("/entries")
                    .header("content-type", "application/json")
                    .body(Body::from(r#"{"key":"test","value":"hello"}"#))
                    .unwrap(),
            )
            .await
            .unwrap();

        assert_eq!(response.status(), StatusCode::OK);
    }

    #[tokio::test]
    async fn test_get_not_found() {
        let app = create_test_app();

        let response = app
            .oneshot(
                Request::builder()
                    .uri("/entries/nonexistent")
                    .body(Body::empty())
                    .unwrap(),
            )
            .await
            .unwrap();

        assert_eq!(response.status(), StatusCode::NOT_FOUND);
    }
}
