//! HTTP Service Layer
//!
//! Thin axum surface over the analysis pipeline: one analyze endpoint
//! plus service-info and health routes. Error mapping follows the two
//! caller-facing tiers: retrieval/validation problems return 400 with
//! detail; everything else returns 500 with a generic message and the
//! detail stays in the logs.

use axum::{
    Json, Router,
    extract::State,
    http::StatusCode,
    response::{IntoResponse, Response},
    routing::{get, post},
};
use serde::Deserialize;
use serde_json::{Value, json};
use std::sync::Arc;
use tower_http::{cors::CorsLayer, trace::TraceLayer};
use tracing::{error, info};

use crate::config::Config;
use crate::pipeline::AnalysisPipeline;
use crate::types::{AnalysisResponse, RepoLensError, Result};

/// Application state shared across handlers.
#[derive(Clone)]
pub struct AppState {
    pipeline: Arc<AnalysisPipeline>,
}

impl AppState {
    pub fn new(pipeline: AnalysisPipeline) -> Self {
        Self {
            pipeline: Arc::new(pipeline),
        }
    }
}

/// Analyze request body.
#[derive(Debug, Deserialize)]
pub struct AnalyzeRequest {
    pub repository_url: String,
}

/// Build the application router.
pub fn create_app(state: AppState, permissive_cors: bool) -> Router {
    let mut app = Router::new()
        .route("/", get(index))
        .route("/health", get(health_check))
        .route("/analyze", post(analyze))
        .layer(TraceLayer::new_for_http())
        .with_state(state);

    if permissive_cors {
        app = app.layer(CorsLayer::permissive());
    }

    app
}

/// Bind and serve until shutdown.
pub async fn serve(config: Config) -> Result<()> {
    let bind_addr = config.server.bind_addr.clone();
    let permissive_cors = config.server.permissive_cors;

    let state = AppState::new(AnalysisPipeline::new(config));
    let app = create_app(state, permissive_cors);

    let listener = tokio::net::TcpListener::bind(&bind_addr).await?;
    info!("server listening on http://{}", bind_addr);

    axum::serve(listener, app).await?;

    Ok(())
}

// =============================================================================
// Handlers
// =============================================================================

/// Root endpoint: basic service information.
async fn index() -> Json<Value> {
    Json(json!({
        "service": "repolens",
        "version": env!("CARGO_PKG_VERSION"),
        "description": "Analyze public repositories and generate architectural insights",
        "endpoints": {
            "health": "/health",
            "analyze": "/analyze"
        }
    }))
}

/// Health check endpoint.
async fn health_check() -> Json<Value> {
    Json(json!({
        "status": "ok",
        "service": "repolens",
        "version": env!("CARGO_PKG_VERSION")
    }))
}

/// Run one analysis for the posted locator.
async fn analyze(
    State(state): State<AppState>,
    Json(request): Json<AnalyzeRequest>,
) -> std::result::Result<Json<AnalysisResponse>, ApiError> {
    info!(locator = %request.repository_url, "analyze request");

    let response = state.pipeline.analyze(&request.repository_url).await?;
    Ok(Json(response))
}

// =============================================================================
// Error Mapping
// =============================================================================

/// Caller-facing error envelope.
struct ApiError(RepoLensError);

impl From<RepoLensError> for ApiError {
    fn from(err: RepoLensError) -> Self {
        Self(err)
    }
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        let (status, detail) = if self.0.is_client_error() {
            (StatusCode::BAD_REQUEST, self.0.to_string())
        } else {
            error!(error = %self.0, "analysis run failed");
            (
                StatusCode::INTERNAL_SERVER_ERROR,
                "Failed to analyze repository. Please try again later.".to_string(),
            )
        };

        (status, Json(json!({ "detail": detail }))).into_response()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use axum::body::Body;
    use axum::http::Request;
    use tower::util::ServiceExt;

    fn app() -> Router {
        let state = AppState::new(AnalysisPipeline::new(Config::default()));
        create_app(state, true)
    }

    async fn body_json(response: Response) -> Value {
        let bytes = axum::body::to_bytes(response.into_body(), usize::MAX)
            .await
            .unwrap();
        serde_json::from_slice(&bytes).unwrap()
    }

    #[tokio::test]
    async fn test_health_endpoint() {
        let response = app()
            .oneshot(Request::get("/health").body(Body::empty()).unwrap())
            .await
            .unwrap();

        assert_eq!(response.status(), StatusCode::OK);
        let json = body_json(response).await;
        assert_eq!(json["status"], "ok");
    }

    #[tokio::test]
    async fn test_index_lists_endpoints() {
        let response = app()
            .oneshot(Request::get("/").body(Body::empty()).unwrap())
            .await
            .unwrap();

        let json = body_json(response).await;
        assert_eq!(json["service"], "repolens");
        assert_eq!(json["endpoints"]["analyze"], "/analyze");
    }

    #[tokio::test]
    async fn test_invalid_locator_returns_400_with_detail() {
        let request = Request::post("/analyze")
            .header("content-type", "application/json")
            .body(Body::from(
                r#"{"repository_url": "https://gitlab.com/a/b"}"#,
            ))
            .unwrap();

        let response = app().oneshot(request).await.unwrap();
        assert_eq!(response.status(), StatusCode::BAD_REQUEST);

        let json = body_json(response).await;
        assert!(json["detail"].as_str().unwrap().contains("github.com"));
    }

    #[tokio::test]
    async fn test_analyze_local_fixture_returns_contract_shape() {
        let temp = tempfile::TempDir::new().unwrap();
        std::fs::write(temp.path().join("readme.md"), "# demo").unwrap();
        std::fs::create_dir(temp.path().join("src")).unwrap();

        let body = serde_json::to_string(&json!({
            "repository_url": temp.path().to_string_lossy()
        }))
        .unwrap();

        let request = Request::post("/analyze")
            .header("content-type", "application/json")
            .body(Body::from(body))
            .unwrap();

        let response = app().oneshot(request).await.unwrap();
        assert_eq!(response.status(), StatusCode::OK);

        let json = body_json(response).await;
        assert!(json["overview"]["repository_name"].is_string());
        assert!(json["visualization"]["mermaid"].is_string());
        assert!(json["recommendations"].is_array());
    }

    #[tokio::test]
    async fn test_malformed_body_rejected() {
        let request = Request::post("/analyze")
            .header("content-type", "application/json")
            .body(Body::from("{}"))
            .unwrap();

        let response = app().oneshot(request).await.unwrap();
        assert_eq!(response.status(), StatusCode::UNPROCESSABLE_ENTITY);
    }
}
