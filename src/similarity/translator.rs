use super::types::WorkerResult;
use crate::{Error, Result};

/// Turns the worker's stdout into a similarity score.
///
/// A non-empty `error` field wins over any similarity that came with it.
/// The score is passed through as reported, without range checks.
pub fn translate(stdout: &[u8]) -> Result<f64> {
    let result: WorkerResult =
        serde_json::from_slice(stdout).map_err(|e| Error::WorkerOutput(e.to_string()))?;

    if let Some(error) = result.error.filter(|e| !e.is_empty()) {
        return Err(Error::WorkerReported(error));
    }

    result
        .similarity
        .ok_or_else(|| Error::WorkerOutput("missing field 'similarity'".to_string()))
}
