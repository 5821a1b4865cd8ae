//! JSON HTTP API over the recommend pipeline.
//!
//! | Method | Path | Description |
//! |--------|------|-------------|
//! | `POST` | `/get_remedy` | `{"query": ...}` → recommendation |
//! | `POST` | `/api/analyze-symptoms` | `{"symptoms": ...}` → recommendation |
//! | `GET`  | `/api/symptoms-suggestions` | symptom vocabulary |
//! | `GET`  | `/api/health` | status, version and index size |
//!
//! Errors use `{"error": {"code": ..., "message": ...}}`. All origins are
//! allowed so browser front-ends can call the API directly.

use axum::{
    extract::State,
    http::StatusCode,
    response::{IntoResponse, Response},
    routing::{get, post},
    Json, Router,
};
use serde::{Deserialize, Serialize};
use std::sync::Arc;
use tokio::net::TcpListener;
use tower_http::cors::{Any, CorsLayer};
use tracing::{error, info};

use crate::domain::entities::recommendation::RecommendationResponse;
use crate::domain::error::DomainError;
use crate::RemedyFinder;

#[derive(Clone)]
struct AppState {
    finder: Arc<RemedyFinder>,
}

pub fn router(finder: Arc<RemedyFinder>) -> Router {
    let cors = CorsLayer::new()
        .allow_origin(Any)
        .allow_methods(Any)
        .allow_headers(Any);

    Router::new()
        .route("/get_remedy", post(handle_get_remedy))
        .route("/api/analyze-symptoms", post(handle_analyze_symptoms))
        .route("/api/symptoms-suggestions", get(handle_suggestions))
        .route("/api/health", get(handle_health))
        .layer(cors)
        .with_state(AppState { finder })
}

/// Binds `bind_addr` and serves until the process is terminated.
pub async fn run_server(finder: Arc<RemedyFinder>, bind_addr: &str) -> Result<(), DomainError> {
    let listener = TcpListener::bind(bind_addr)
        .await
        .map_err(|e| DomainError::Server(format!("cannot bind {bind_addr}: {e}")))?;
    serve(listener, finder).await
}

pub async fn serve(listener: TcpListener, finder: Arc<RemedyFinder>) -> Result<(), DomainError> {
    if let Ok(addr) = listener.local_addr() {
        info!("listening on http://{addr}");
    }
    axum::serve(listener, router(finder))
        .await
        .map_err(|e| DomainError::Server(e.to_string()))
}

// ============ Errors ============

#[derive(Serialize)]
struct ErrorBody {
    error: ErrorDetail,
}

#[derive(Serialize)]
struct ErrorDetail {
    code: &'static str,
    message: String,
}

struct AppError {
    status: StatusCode,
    code: &'static str,
    message: String,
}

impl IntoResponse for AppError {
    fn into_response(self) -> Response {
        let body = ErrorBody {
            error: ErrorDetail {
                code: self.code,
                message: self.message,
            },
        };
        (self.status, Json(body)).into_response()
    }
}

impl From<DomainError> for AppError {
    fn from(err: DomainError) -> Self {
        let (status, code) = match &err {
            DomainError::InvalidInput(_) => (StatusCode::BAD_REQUEST, "bad_request"),
            DomainError::IndexUnavailable(_) => (StatusCode::SERVICE_UNAVAILABLE, "index_unavailable"),
            DomainError::Embedding(_) => (StatusCode::BAD_GATEWAY, "embedding_error"),
            _ => (StatusCode::INTERNAL_SERVER_ERROR, "internal"),
        };
        if status.is_server_error() {
            error!(error = %err, "request failed");
        }
        AppError {
            status,
            code,
            message: err.to_string(),
        }
    }
}

// ============ POST /get_remedy ============

#[derive(Deserialize)]
struct QueryRequest {
    query: String,
}

async fn handle_get_remedy(
    State(state): State<AppState>,
    Json(req): Json<QueryRequest>,
) -> Result<Json<RecommendationResponse>, AppError> {
    Ok(Json(state.finder.recommend(&req.query).await?))
}

// ============ POST /api/analyze-symptoms ============

#[derive(Deserialize)]
struct SymptomsRequest {
    symptoms: String,
}

async fn handle_analyze_symptoms(
    State(state): State<AppState>,
    Json(req): Json<SymptomsRequest>,
) -> Result<Json<RecommendationResponse>, AppError> {
    Ok(Json(state.finder.recommend(&req.symptoms).await?))
}

// ============ GET /api/symptoms-suggestions ============

#[derive(Serialize)]
struct SuggestionsResponse {
    suggestions: Vec<String>,
}

async fn handle_suggestions(State(state): State<AppState>) -> Json<SuggestionsResponse> {
    Json(SuggestionsResponse {
        suggestions: state.finder.suggestions().to_vec(),
    })
}

// ============ GET /api/health ============

#[derive(Serialize)]
struct HealthResponse {
    status: &'static str,
    version: &'static str,
    indexed_entries: usize,
}

async fn handle_health(State(state): State<AppState>) -> Result<Json<HealthResponse>, AppError> {
    Ok(Json(HealthResponse {
        status: "ok",
        version: env!("CARGO_PKG_VERSION"),
        indexed_entries: state.finder.indexed_entries()?,
    }))
}
