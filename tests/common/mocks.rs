use async_trait::async_trait;
use similarity_bridge::{
    Result,
    similarity::{SimilarityWorker, WorkerPayload},
};
use std::sync::{Arc, Mutex};

type Responder = Box<dyn Fn(&WorkerPayload) -> Result<f64> + Send + Sync>;

/// Mock worker that answers from a closure and records every payload it sees
pub struct MockWorker {
    pub payloads: Arc<Mutex<Vec<WorkerPayload>>>,
    responder: Responder,
}

impl MockWorker {
    pub fn new<F>(responder: F) -> Self
    where
        F: Fn(&WorkerPayload) -> Result<f64> + Send + Sync + 'static,
    {
        Self {
            payloads: Arc::new(Mutex::new(Vec::new())),
            responder: Box::new(responder),
        }
    }

    pub fn with_score(score: f64) -> Self {
        Self::new(move |_| Ok(score))
    }

    pub fn get_payloads(&self) -> Vec<WorkerPayload> {
        self.payloads.lock().unwrap().clone()
    }

    pub fn call_count(&self) -> usize {
        self.payloads.lock().unwrap().len()
    }
}

#[async_trait]
impl SimilarityWorker for MockWorker {
    async fn compute(&self, payload: WorkerPayload) -> Result<f64> {
        let result = (self.responder)(&payload);
        self.payloads.lock().unwrap().push(payload);
        result
    }
}
