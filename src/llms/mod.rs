//! External text-generation providers.
//!
//! Any chat request naming a model other than the scripted-dialogue model is
//! delegated to a [`GenerationProvider`]. Providers are opaque, best-effort
//! and unauthenticated; failures are reported as [`ProviderError`] and never
//! retried.

pub mod ollama;

use std::fmt;

use async_trait::async_trait;
use thiserror::Error;

pub use ollama::OllamaClient;

/// Errors from a generation provider.
#[derive(Debug, Error)]
pub enum ProviderError {
    /// Connection, timeout or other transport failure.
    #[error("transport error: {0}")]
    Transport(#[from] reqwest::Error),

    /// Provider answered with a non-2xx status.
    #[error("provider returned {status}: {body}")]
    Status { status: u16, body: String },

    /// Provider answered 2xx with a body we can't use.
    #[error("malformed provider reply: {0}")]
    Malformed(String),
}

/// A locally hosted text-generation service.
#[async_trait]
pub trait GenerationProvider: Send + Sync + fmt::Debug {
    /// Names of the models the provider can serve.
    async fn list_models(&self) -> Result<Vec<String>, ProviderError>;

    /// Generate a completion for `prompt` with `model`, returned unmodified.
    async fn generate(&self, model: &str, prompt: &str) -> Result<String, ProviderError>;
}
