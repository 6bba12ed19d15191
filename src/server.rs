//! HTTP surface: liveness and batch-check endpoints.
//!
//! The server is deliberately thin plumbing over the check pipeline:
//!
//! - `GET /ping`: liveness probe, returns `{"message": "pong"}`
//! - `GET /check-all`: runs one batch over the configured targets and
//!   returns the timestamped, input-ordered result set
//!
//! Individual site trouble never fails the API call; it only shows up as an
//! `unknown` entry with a note inside the result list.

use axum::{Json, Router, extract::State, routing::get};
use serde_json::{Value, json};
use std::error::Error;
use std::sync::Arc;
use tower_http::{
    cors::{Any, CorsLayer},
    trace::TraceLayer,
};
use tracing::info;

use crate::checker::SiteChecker;
use crate::fetch::HttpFetcher;
use crate::models::{BatchResult, SiteTarget};
use crate::runner::run_batch;

/// Shared, read-only application state.
#[derive(Clone)]
pub struct AppState {
    pub targets: Arc<Vec<SiteTarget>>,
    pub checker: Arc<SiteChecker<HttpFetcher>>,
    pub workers: usize,
}

/// Build the application router.
pub fn router(state: AppState) -> Router {
    Router::new()
        .route("/ping", get(ping_handler))
        .route("/check-all", get(check_all_handler))
        .layer(
            CorsLayer::new()
                .allow_origin(Any)
                .allow_methods(Any)
                .allow_headers(Any),
        )
        .layer(TraceLayer::new_for_http())
        .with_state(state)
}

/// Bind `addr` and serve the router until the process is stopped.
pub async fn serve(state: AppState, addr: &str) -> Result<(), Box<dyn Error>> {
    let listener = tokio::net::TcpListener::bind(addr).await?;
    info!(%addr, "HTTP server listening");
    axum::serve(listener, router(state)).await?;
    Ok(())
}

async fn ping_handler() -> Json<Value> {
    Json(json!({ "message": "pong" }))
}

async fn check_all_handler(State(state): State<AppState>) -> Json<BatchResult> {
    let batch = run_batch(&state.targets, Arc::clone(&state.checker), state.workers).await;
    Json(batch)
}

#[cfg(test)]
mod tests {
    use super::*;
    use axum::body::Body;
    use axum::http::{Request, StatusCode};
    use std::time::Duration;
    use tower::ServiceExt;

    fn state_with_targets(targets: Vec<SiteTarget>) -> AppState {
        AppState {
            targets: Arc::new(targets),
            checker: Arc::new(SiteChecker::new(HttpFetcher::new(Duration::from_millis(100)))),
            workers: 2,
        }
    }

    async fn body_json(response: axum::response::Response) -> Value {
        let bytes = axum::body::to_bytes(response.into_body(), usize::MAX)
            .await
            .unwrap();
        serde_json::from_slice(&bytes).unwrap()
    }

    #[tokio::test]
    async fn test_ping_responds_pong() {
        let app = router(state_with_targets(vec![]));

        let response = app
            .oneshot(Request::builder().uri("/ping").body(Body::empty()).unwrap())
            .await
            .unwrap();

        assert_eq!(response.status(), StatusCode::OK);
        let json = body_json(response).await;
        assert_eq!(json, json!({ "message": "pong" }));
    }

    #[tokio::test]
    async fn test_check_all_with_no_targets() {
        let app = router(state_with_targets(vec![]));

        let response = app
            .oneshot(
                Request::builder()
                    .uri("/check-all")
                    .body(Body::empty())
                    .unwrap(),
            )
            .await
            .unwrap();

        assert_eq!(response.status(), StatusCode::OK);
        let json = body_json(response).await;
        assert!(json["checked_at"].is_string());
        assert_eq!(json["results"], json!([]));
    }

    #[tokio::test]
    async fn test_unknown_route_is_404() {
        let app = router(state_with_targets(vec![]));

        let response = app
            .oneshot(
                Request::builder()
                    .uri("/nope")
                    .body(Body::empty())
                    .unwrap(),
            )
            .await
            .unwrap();

        assert_eq!(response.status(), StatusCode::NOT_FOUND);
    }
}
