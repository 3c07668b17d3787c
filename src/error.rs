use std::time::Duration;
use thiserror::Error;

pub type Result<T> = std::result::Result<T, Error>;

#[derive(Error, Debug)]
pub enum Error {
    #[error("Configuration error: {0}")]
    Config(String),

    #[error("Validation failed: {0}")]
    Validation(String),

    #[error("Both sentences must be non-empty")]
    EmptySentences,

    #[error("Worker error: {0}")]
    Worker(String),

    #[error("Worker timed out after {}ms", .timeout.as_millis())]
    WorkerTimeout { timeout: Duration },

    #[error("Worker exited with {status}, stderr: {stderr}")]
    WorkerExit { status: String, stderr: String },

    #[error("Failed to parse worker response: {0}")]
    WorkerOutput(String),

    // The worker's own message is surfaced verbatim.
    #[error("{0}")]
    WorkerReported(String),

    #[error("Serialization error: {0}")]
    Serialization(#[from] serde_json::Error),

    #[error("YAML error: {0}")]
    Yaml(#[from] serde_yaml::Error),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("Address parse error: {0}")]
    AddrParse(#[from] std::net::AddrParseError),
}

impl Error {
    pub fn config(msg: impl Into<String>) -> Self {
        Self::Config(msg.into())
    }

    pub fn validation(msg: impl Into<String>) -> Self {
        Self::Validation(msg.into())
    }

    pub fn worker(msg: impl Into<String>) -> Self {
        Self::Worker(msg.into())
    }
}
