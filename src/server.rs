//! HTTP API.
//!
//! `/health`, `/upload` and `/chat`, served both at the root and under `/api`.

use crate::orchestrator::Orchestrator;
use crate::rag::MatchSummary;
use crate::record::Record;
use axum::{
    extract::{rejection::JsonRejection, State},
    http::StatusCode,
    response::{IntoResponse, Response},
    routing::{get, post},
    Json, Router,
};
use serde::{Deserialize, Serialize};
use serde_json::Value;
use std::sync::Arc;
use tower_http::cors::{Any, CorsLayer};
use tracing::{error, info, warn};

/// Shared application state.
pub struct AppState {
    pub orchestrator: Orchestrator,
}

/// Build the application router.
pub fn router(state: Arc<AppState>) -> Router {
    let cors = CorsLayer::new()
        .allow_origin(Any)
        .allow_methods(Any)
        .allow_headers(Any);

    let routes = Router::new()
        .route("/health", get(health))
        .route("/upload", post(upload))
        .route("/chat", post(chat));

    Router::new()
        .merge(routes.clone())
        .nest("/api", routes)
        .layer(cors)
        .with_state(state)
}

// === Request/Response Types ===

#[derive(Deserialize)]
struct ChatRequest {
    #[serde(default)]
    question: String,
}

#[derive(Serialize)]
struct ChatResponse {
    answer: String,
    related: Vec<MatchSummary>,
}

#[derive(Serialize)]
struct UploadResponse {
    status: &'static str,
    count: usize,
}

#[derive(Serialize)]
struct ErrorResponse {
    error: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    exception: Option<String>,
}

fn error_response(status: StatusCode, error: impl Into<String>) -> Response {
    (
        status,
        Json(ErrorResponse {
            error: error.into(),
            exception: None,
        }),
    )
        .into_response()
}

/// Accept `{"students": [...]}` or a bare list.
fn parse_records(payload: Value) -> std::result::Result<Vec<Record>, String> {
    let students = match payload {
        Value::Object(mut map) if map.contains_key("students") => {
            map.remove("students").unwrap_or(Value::Null)
        }
        other => other,
    };

    let Value::Array(items) = students else {
        return Err("Payload must be a list of students".to_string());
    };

    items
        .into_iter()
        .enumerate()
        .map(|(i, item)| {
            serde_json::from_value::<Record>(item)
                .map_err(|e| format!("Invalid student at position {}: {}", i + 1, e))
        })
        .collect()
}

// === Handlers ===

async fn health() -> impl IntoResponse {
    Json(serde_json::json!({ "status": "ok" }))
}

async fn upload(
    State(state): State<Arc<AppState>>,
    payload: std::result::Result<Json<Value>, JsonRejection>,
) -> Response {
    let Json(payload) = match payload {
        Ok(payload) => payload,
        Err(rejection) => return error_response(StatusCode::BAD_REQUEST, rejection.body_text()),
    };

    let records = match parse_records(payload) {
        Ok(records) => records,
        Err(message) => {
            warn!("Rejected upload: {}", message);
            return error_response(StatusCode::BAD_REQUEST, message);
        }
    };

    match state.orchestrator.ingest(&records).await {
        Ok(count) => {
            info!("Uploaded {} students", count);
            Json(UploadResponse {
                status: "uploaded",
                count,
            })
            .into_response()
        }
        Err(e) => {
            error!("Upload failed ({}): {}", e.kind().as_str(), e);
            error_response(StatusCode::INTERNAL_SERVER_ERROR, e.to_string())
        }
    }
}

async fn chat(
    State(state): State<Arc<AppState>>,
    payload: std::result::Result<Json<ChatRequest>, JsonRejection>,
) -> Response {
    let question = match payload {
        Ok(Json(req)) => req.question.trim().to_string(),
        Err(rejection) => return error_response(StatusCode::BAD_REQUEST, rejection.body_text()),
    };

    if question.is_empty() {
        return error_response(StatusCode::BAD_REQUEST, "Missing question");
    }

    match state.orchestrator.ask(&question).await {
        Ok(response) => Json(ChatResponse {
            answer: response.answer,
            related: response.related,
        })
        .into_response(),
        Err(e) => {
            error!("Chat failed ({}): {}", e.kind().as_str(), e);
            (
                StatusCode::INTERNAL_SERVER_ERROR,
                Json(ErrorResponse {
                    error: "Server error".to_string(),
                    exception: Some(e.to_string()),
                }),
            )
                .into_response()
        }
    }
}
