mod translator;
mod types;
mod validator;
mod worker;

pub use translator::translate;
pub use types::{SimilarityInput, SimilarityRequest, WorkerPayload, WorkerResult};
pub use validator::validate;
pub use worker::{ProcessWorker, SimilarityWorker};
