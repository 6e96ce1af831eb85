//! Main HTTP gateway server: routing, CORS, startup.

use std::net::SocketAddr;
use std::sync::Arc;

use anyhow::Result;
use axum::{
    response::Json,
    routing::{get, post},
    Router,
};
use serde_json::{json, Value};
use tokio::net::TcpListener;
use tower_http::cors::{AllowHeaders, AllowMethods, AllowOrigin, CorsLayer};
use tracing::info;

use voicedrop_storage::ArtifactStore;

use crate::upload;

/// Shared application state for API handlers.
#[derive(Clone)]
pub struct AppState {
    pub store: Arc<ArtifactStore>,
}

/// Build the Axum router with all API routes.
pub fn build_router(state: AppState) -> Router {
    // The deployed frontend calls this from arbitrary origins with
    // credentials. tower-http refuses the literal wildcard when credentials
    // are allowed, so each dimension mirrors the request instead.
    let cors = CorsLayer::new()
        .allow_origin(AllowOrigin::mirror_request())
        .allow_methods(AllowMethods::mirror_request())
        .allow_headers(AllowHeaders::mirror_request())
        .allow_credentials(true);

    Router::new()
        .route("/api/send_message", post(upload::send_message))
        .route("/api/health", get(health))
        .layer(cors)
        .with_state(state)
}

/// Health check endpoint.
async fn health() -> Json<Value> {
    Json(json!({
        "status": "ok",
        "service": "voicedrop",
        "version": env!("CARGO_PKG_VERSION"),
    }))
}

/// Start the Axum HTTP server and serve until the process exits.
pub async fn start_server(addr: SocketAddr, state: AppState) -> Result<()> {
    let app = build_router(state);

    info!("Gateway HTTP server listening on {}", addr);
    let listener = TcpListener::bind(&addr).await?;
    axum::serve(listener, app).await?;

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use axum_test::TestServer;
    use tempfile::TempDir;

    fn test_server(dir: &TempDir) -> TestServer {
        let state = AppState {
            store: Arc::new(ArtifactStore::new(dir.path().join("uploads"))),
        };
        TestServer::new(build_router(state)).unwrap()
    }

    #[tokio::test]
    async fn health_reports_ok() {
        let dir = TempDir::new().unwrap();
        let server = test_server(&dir);

        let response = server.get("/api/health").await;

        response.assert_status_ok();
        let body: Value = response.json();
        assert_eq!(body["status"], "ok");
        assert_eq!(body["service"], "voicedrop");
    }

    #[tokio::test]
    async fn cors_mirrors_origin_and_allows_credentials() {
        let dir = TempDir::new().unwrap();
        let server = test_server(&dir);

        let response = server
            .get("/api/health")
            .add_header("origin", "http://example.com")
            .await;

        response.assert_status_ok();
        assert_eq!(
            response.header("access-control-allow-origin"),
            "http://example.com"
        );
        assert_eq!(response.header("access-control-allow-credentials"), "true");
    }
}
