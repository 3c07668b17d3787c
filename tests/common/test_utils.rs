use axum::{
    Router,
    body::Body,
    http::{Request, StatusCode},
};
use serde_json::Value;
use similarity_bridge::{
    config::WorkerConfig,
    server::{self, AppState},
    similarity::SimilarityWorker,
};
use std::collections::HashMap;
use std::sync::Arc;
use tower::ServiceExt; // for `oneshot`

/// Build the full router around the given worker
pub fn create_test_app(worker: Arc<dyn SimilarityWorker>) -> Router {
    server::router(AppState::new(worker))
}

/// Worker config that runs `script` with `sh -c`
pub fn shell_worker_config(script: &str, timeout_ms: u64) -> WorkerConfig {
    WorkerConfig {
        command: "sh".to_string(),
        args: vec!["-c".to_string(), script.to_string()],
        env: HashMap::new(),
        working_dir: None,
        timeout_ms,
        ..WorkerConfig::default()
    }
}

pub fn similarity_request(body: impl Into<Body>) -> Request<Body> {
    Request::builder()
        .method("POST")
        .uri("/api/v1/similarity")
        .header("content-type", "application/json")
        .body(body.into())
        .unwrap()
}

pub fn get_request(uri: &str) -> Request<Body> {
    Request::builder()
        .method("GET")
        .uri(uri)
        .body(Body::empty())
        .unwrap()
}

/// Send a request and return the status and decoded JSON body
pub async fn send(app: Router, request: Request<Body>) -> (StatusCode, Value) {
    let response = app.oneshot(request).await.unwrap();
    let status = response.status();
    let bytes = axum::body::to_bytes(response.into_body(), usize::MAX)
        .await
        .unwrap();
    let body = if bytes.is_empty() {
        Value::Null
    } else {
        serde_json::from_slice(&bytes).unwrap()
    };
    (status, body)
}

/// True while a process with this pid is running (zombies count as gone)
#[cfg(target_os = "linux")]
pub fn process_exists(pid: u32) -> bool {
    let Ok(stat) = std::fs::read_to_string(format!("/proc/{}/stat", pid)) else {
        return false;
    };
    // State is the first field after the parenthesised command name
    match stat.rsplit_once(')') {
        Some((_, rest)) => !rest.trim_start().starts_with('Z'),
        None => true,
    }
}

/// Poll until the process is gone or `timeout` passes; returns true if it is gone
#[cfg(target_os = "linux")]
pub async fn wait_for_exit(pid: u32, timeout: std::time::Duration) -> bool {
    let deadline = std::time::Instant::now() + timeout;
    while process_exists(pid) {
        if std::time::Instant::now() >= deadline {
            return false;
        }
        tokio::time::sleep(std::time::Duration::from_millis(20)).await;
    }
    true
}

/// Read a pid written by a worker script
pub fn read_pid(path: &std::path::Path) -> u32 {
    std::fs::read_to_string(path)
        .unwrap()
        .trim()
        .parse()
        .unwrap()
}
