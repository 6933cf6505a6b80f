//! Route definitions for the gateway API.

use axum::http::{header, Method};
use axum::routing::{get, post};
use axum::Router;
use tower_http::cors::{Any, CorsLayer};
use tower_http::trace::TraceLayer;

use crate::{handlers, state::AppState};

/// Create the main API router.
pub fn create_router(state: AppState) -> Router {
    Router::new()
        // Health endpoint
        .route("/health", get(handlers::health_check))
        // Generation endpoints
        .nest("/v1", v1_routes())
        // Apply middleware
        .layer(TraceLayer::new_for_http())
        .layer(cors_layer())
        // Add state
        .with_state(state)
}

/// Generation and introspection routes.
fn v1_routes() -> Router<AppState> {
    Router::new()
        .route("/generate/text", post(handlers::generate_text))
        .route("/generate/image", post(handlers::generate_image))
        .route("/generate/voice", post(handlers::generate_voice))
        .route("/generate/video", post(handlers::generate_video))
        .route("/providers", get(handlers::list_providers))
}

/// Permissive cross-origin layer.
///
/// Browser callers supply their own vendor keys, so every origin is allowed.
/// The layer also short-circuits OPTIONS preflights with an empty 200 before
/// they can reach any handler or the dispatcher.
fn cors_layer() -> CorsLayer {
    CorsLayer::new()
        .allow_origin(Any)
        .allow_methods([Method::POST, Method::OPTIONS])
        .allow_headers([header::CONTENT_TYPE])
}

#[cfg(test)]
mod tests {
    use super::*;
    use axum::body::Body;
    use axum::http::{Request, StatusCode};
    use gateway_core::StaticCredentialResolver;
    use tower::ServiceExt;

    fn create_test_state() -> AppState {
        AppState::builder()
            .credentials(StaticCredentialResolver::new())
            .build()
    }

    #[tokio::test]
    async fn test_health_endpoint() {
        let app = create_router(create_test_state());

        let response = app
            .oneshot(
                Request::builder()
                    .uri("/health")
                    .body(Body::empty())
                    .expect("request"),
            )
            .await
            .expect("response");

        assert_eq!(response.status(), StatusCode::OK);
    }

    #[tokio::test]
    async fn test_providers_endpoint() {
        let app = create_router(create_test_state());

        let response = app
            .oneshot(
                Request::builder()
                    .uri("/v1/providers")
                    .body(Body::empty())
                    .expect("request"),
            )
            .await
            .expect("response");

        assert_eq!(response.status(), StatusCode::OK);
    }

    #[tokio::test]
    async fn test_preflight_returns_empty_success() {
        let app = create_router(create_test_state());

        let response = app
            .oneshot(
                Request::builder()
                    .method(Method::OPTIONS)
                    .uri("/v1/generate/image")
                    .header(header::ORIGIN, "https://app.example")
                    .header(header::ACCESS_CONTROL_REQUEST_METHOD, "POST")
                    .header(header::ACCESS_CONTROL_REQUEST_HEADERS, "content-type")
                    .body(Body::empty())
                    .expect("request"),
            )
            .await
            .expect("response");

        assert_eq!(response.status(), StatusCode::OK);
        let headers = response.headers();
        assert_eq!(headers["access-control-allow-origin"], "*");
        assert!(headers["access-control-allow-methods"]
            .to_str()
            .expect("header")
            .contains("POST"));
    }
}
