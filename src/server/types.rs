use crate::similarity::SimilarityRequest;
use chrono::{DateTime, SecondsFormat, Utc};
use serde::{Serialize, Serializer};

pub const SERVICE_NAME: &str = "text-similarity-api";

/// Version reported by the service metadata at `/`.
pub const API_VERSION: &str = "2.0.0";

/// Version of the documentation payload served at `/docs`.
pub const DOCS_VERSION: &str = "1.0.0";

#[derive(Debug, Serialize)]
pub struct SimilarityResponse {
    pub sentence1: String,
    pub sentence2: String,
    pub similarity: f64,
    #[serde(serialize_with = "rfc3339_seconds")]
    pub processed_at: DateTime<Utc>,
}

impl SimilarityResponse {
    /// Builds the response for a completed request, stamping it with the current time.
    pub fn completed(request: SimilarityRequest, similarity: f64) -> Self {
        Self {
            sentence1: request.sentence1,
            sentence2: request.sentence2,
            similarity,
            processed_at: Utc::now(),
        }
    }
}

#[derive(Debug, Serialize)]
pub struct HealthResponse {
    pub status: &'static str,
    #[serde(serialize_with = "rfc3339_seconds")]
    pub timestamp: DateTime<Utc>,
    pub service: &'static str,
}

impl HealthResponse {
    pub fn healthy() -> Self {
        Self {
            status: "healthy",
            timestamp: Utc::now(),
            service: SERVICE_NAME,
        }
    }
}

fn rfc3339_seconds<S: Serializer>(value: &DateTime<Utc>, serializer: S) -> Result<S::Ok, S::Error> {
    serializer.serialize_str(&value.to_rfc3339_opts(SecondsFormat::Secs, true))
}
