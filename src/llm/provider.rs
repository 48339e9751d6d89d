use async_trait::async_trait;
use thiserror::Error;

use super::types::ChatRequest;

/// Failure talking to an embeddings or chat-completion backend.
#[derive(Debug, Error)]
pub enum ProviderError {
    #[error("request to {provider} failed: {source}")]
    Http {
        provider: &'static str,
        #[source]
        source: reqwest::Error,
    },
    #[error("{provider} returned {status}: {body}")]
    Status {
        provider: &'static str,
        status: u16,
        body: String,
    },
    #[error("unexpected response from {provider}: {reason}")]
    Protocol {
        provider: &'static str,
        reason: String,
    },
}

/// Turns text into embedding vectors.
#[async_trait]
pub trait EmbeddingProvider: Send + Sync {
    /// return the provider name (e.g. "openai")
    fn name(&self) -> &str;

    /// embed every input, preserving input order
    async fn embed(&self, inputs: &[String]) -> Result<Vec<Vec<f32>>, ProviderError>;
}

/// Produces a completion for a chat request.
#[async_trait]
pub trait ChatProvider: Send + Sync {
    /// return the provider name (e.g. "openai")
    fn name(&self) -> &str;

    /// chat completion (non-streaming)
    async fn chat(&self, request: ChatRequest) -> Result<String, ProviderError>;
}
