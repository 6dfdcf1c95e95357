//! HTTP route handlers for the probe service.
//!
//! The only route is the health probe; anything else falls through to the
//! router's default 404 and non-GET methods on `/health` get a standard 405.
//! Health responses carry a Cache-Control header so intermediaries never
//! serve a stale liveness answer.
//!
//! Request tracing generates a unique request ID for each incoming request,
//! allowing correlation of all logs within a request.

pub mod health;

use axum::{extract::Request, routing::get, Router};
use http::header::{HeaderValue, CACHE_CONTROL};
use tower_http::set_header::SetResponseHeaderLayer;
use tower_http::trace::{DefaultOnResponse, TraceLayer};
use tracing::Level;
use uuid::Uuid;

use crate::config::CACHE_CONTROL_HEALTH;

/// Creates the Axum router with the health route and tracing layers.
pub fn create_router() -> Router {
    // Health check - no caching, always fresh for liveness probes
    let health_routes = Router::new()
        .route("/health", get(health::health))
        .layer(SetResponseHeaderLayer::if_not_present(
            CACHE_CONTROL,
            HeaderValue::from_static(CACHE_CONTROL_HEALTH),
        ));

    Router::new().merge(health_routes).layer(
        // Request span with request_id for log correlation
        TraceLayer::new_for_http()
            .make_span_with(|request: &Request| {
                tracing::info_span!(
                    "request",
                    request_id = %Uuid::new_v4(),
                    method = %request.method(),
                    path = %request.uri().path(),
                )
            })
            .on_response(DefaultOnResponse::new().level(Level::INFO)),
    )
}

#[cfg(test)]
mod tests {
    use super::*;
    use axum::body::Body;
    use axum::http::{Request, StatusCode};
    use tower::ServiceExt;

    async fn send(app: Router, method: &str, uri: &str) -> axum::response::Response {
        app.oneshot(
            Request::builder()
                .method(method)
                .uri(uri)
                .body(Body::empty())
                .unwrap(),
        )
        .await
        .unwrap()
    }

    #[tokio::test]
    async fn health_returns_ok_with_message() {
        let response = send(create_router(), "GET", "/health").await;
        assert_eq!(response.status(), StatusCode::OK);

        let body = axum::body::to_bytes(response.into_body(), usize::MAX)
            .await
            .unwrap();
        let payload: serde_json::Value = serde_json::from_slice(&body).unwrap();
        assert_eq!(
            payload,
            serde_json::json!({ "message": "the application is healthy" })
        );
    }

    #[tokio::test]
    async fn health_is_json_and_uncacheable() {
        let response = send(create_router(), "GET", "/health").await;

        let content_type = response
            .headers()
            .get(http::header::CONTENT_TYPE)
            .and_then(|v| v.to_str().ok())
            .unwrap_or_default()
            .to_string();
        assert!(content_type.starts_with("application/json"));

        assert_eq!(
            response.headers().get(CACHE_CONTROL).unwrap(),
            CACHE_CONTROL_HEALTH
        );
    }

    #[tokio::test]
    async fn unknown_path_returns_not_found() {
        let response = send(create_router(), "GET", "/unknown").await;
        assert_eq!(response.status(), StatusCode::NOT_FOUND);
    }

    #[tokio::test]
    async fn post_to_health_is_method_not_allowed() {
        let response = send(create_router(), "POST", "/health").await;
        assert_eq!(response.status(), StatusCode::METHOD_NOT_ALLOWED);
        assert!(response.status().is_client_error());
    }
}
