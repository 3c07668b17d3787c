use serde::{Deserialize, Serialize};

/// Request body as decoded from the wire, before any checks.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct SimilarityInput {
    #[serde(default)]
    pub sentence1: Option<String>,
    #[serde(default)]
    pub sentence2: Option<String>,
}

/// A validated request: both sentences present, trimmed and non-empty.
#[derive(Debug, Clone, PartialEq)]
pub struct SimilarityRequest {
    pub sentence1: String,
    pub sentence2: String,
}

/// What the worker process receives on stdin.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct WorkerPayload {
    pub sentence1: String,
    pub sentence2: String,
}

/// What the worker process writes to stdout.
#[derive(Debug, Clone, PartialEq, Deserialize)]
pub struct WorkerResult {
    #[serde(default)]
    pub similarity: Option<f64>,
    #[serde(default)]
    pub error: Option<String>,
}

impl From<&SimilarityRequest> for WorkerPayload {
    fn from(request: &SimilarityRequest) -> Self {
        Self {
            sentence1: request.sentence1.clone(),
            sentence2: request.sentence2.clone(),
        }
    }
}
