pub mod config;
pub mod error;
pub mod server;
pub mod similarity;

pub use error::{Error, Result};
