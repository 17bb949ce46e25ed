// src/services/generator.rs
use std::future::Future;
use std::pin::Pin;

use thiserror::Error;

use super::decoding::DecodingConfig;

/// Failure of an inference backend. The display text is what callers see.
#[derive(Debug, Error)]
pub enum InferenceError {
    #[error("inference request failed: {0}")]
    Transport(#[from] reqwest::Error),
    #[error("{0}")]
    Backend(String),
    #[error("inference backend returned {status}: {body}")]
    Status { status: u16, body: String },
    #[error("unexpected inference response: {0}")]
    InvalidResponse(String),
    #[error("inference backend returned no output")]
    EmptyOutput,
}

/// Boxed so the traits below stay object-safe behind `Arc<dyn _>`.
pub type InferenceFuture<'a, T> = Pin<Box<dyn Future<Output = Result<T, InferenceError>> + Send + 'a>>;

/// Generates a reply conditioned on a prompt.
pub trait TextGenerator: Send + Sync {
    /// Model identifier, for logging.
    fn model_name(&self) -> &str;

    fn generate<'a>(&'a self, prompt: &'a str, config: &'a DecodingConfig) -> InferenceFuture<'a, String>;
}
