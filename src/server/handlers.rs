use super::error::ApiError;
use super::types::{API_VERSION, DOCS_VERSION, HealthResponse, SimilarityResponse};
use crate::similarity::{SimilarityInput, SimilarityWorker, WorkerPayload, validate};
use axum::{
    extract::{State, rejection::JsonRejection},
    response::Json,
};
use serde_json::{Value, json};
use std::sync::Arc;
use tracing::{error, info, warn};
use uuid::Uuid;

#[derive(Clone)]
pub struct AppState {
    pub worker: Arc<dyn SimilarityWorker>,
}

impl AppState {
    pub fn new(worker: Arc<dyn SimilarityWorker>) -> Self {
        Self { worker }
    }
}

pub async fn similarity(
    State(state): State<AppState>,
    payload: Result<Json<SimilarityInput>, JsonRejection>,
) -> Result<Json<SimilarityResponse>, ApiError> {
    let request_id = Uuid::new_v4();

    let Json(input) = payload.map_err(|rejection| {
        warn!(%request_id, "Rejected similarity request body: {}", rejection.body_text());
        ApiError::from(rejection)
    })?;

    let request = validate(input).map_err(|e| {
        warn!(%request_id, "Similarity request failed validation: {}", e);
        ApiError::from(e)
    })?;

    info!(
        %request_id,
        "Received similarity request ({} / {} chars)",
        request.sentence1.chars().count(),
        request.sentence2.chars().count()
    );

    match state.worker.compute(WorkerPayload::from(&request)).await {
        Ok(score) => {
            info!(%request_id, "Computed similarity: {}", score);
            Ok(Json(SimilarityResponse::completed(request, score)))
        }
        Err(e) => {
            error!(%request_id, "Failed to compute similarity: {}", e);
            Err(ApiError::from(e))
        }
    }
}

pub async fn health() -> Json<HealthResponse> {
    Json(HealthResponse::healthy())
}

pub async fn root() -> Json<Value> {
    Json(json!({
        "message": "Welcome to the Text Similarity API",
        "version": API_VERSION,
        "endpoints": {
            "similarity": "POST /api/v1/similarity",
            "health": "GET /health",
            "docs": "GET /docs",
        },
    }))
}

pub async fn docs() -> Json<Value> {
    Json(json!({
        "title": "Text Similarity API",
        "description": "Computes the semantic similarity between two sentences using an external scoring worker",
        "version": DOCS_VERSION,
        "endpoints": {
            "/api/v1/similarity": {
                "method": "POST",
                "description": "Calculate semantic similarity between two sentences",
                "request_body": {
                    "sentence1": "string (required) - First sentence to compare",
                    "sentence2": "string (required) - Second sentence to compare",
                },
                "response": {
                    "sentence1": "string - First sentence, trimmed",
                    "sentence2": "string - Second sentence, trimmed",
                    "similarity": "float - Similarity score as reported by the worker (nominally 0.0 to 1.0)",
                    "processed_at": "string - RFC 3339 UTC timestamp of completion",
                },
                "errors": {
                    "400": "validation_error | empty_sentences",
                    "500": "internal_error",
                },
                "example_request": {
                    "sentence1": "AI is transforming the world.",
                    "sentence2": "Artificial intelligence is changing society.",
                },
            },
            "/health": {
                "method": "GET",
                "description": "Liveness check",
            },
        },
    }))
}
