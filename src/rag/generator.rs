use std::sync::Arc;

use thiserror::Error;

use super::index::RetrievalError;
use super::prompt::compose;
use super::retriever::ContextRetriever;
use crate::llm::{ChatMessage, ChatProvider, ChatRequest, ProviderError};

#[derive(Debug, Error)]
pub enum GenerationError {
    #[error("retrieval failed: {0}")]
    Retrieval(#[from] RetrievalError),
    #[error("completion failed: {0}")]
    Completion(#[source] ProviderError),
}

/// Drafts replies: retrieve examples, compose the prompt, ask the model.
#[derive(Clone)]
pub struct ResponseGenerator {
    retriever: Arc<dyn ContextRetriever>,
    chat: Arc<dyn ChatProvider>,
    temperature: f64,
}

impl ResponseGenerator {
    pub fn new(
        retriever: Arc<dyn ContextRetriever>,
        chat: Arc<dyn ChatProvider>,
        temperature: f64,
    ) -> Self {
        Self {
            retriever,
            chat,
            temperature,
        }
    }

    /// Runs the whole pipeline for one message. No retries; any failure
    /// aborts the request.
    pub async fn generate(&self, message: &str) -> Result<String, GenerationError> {
        let context = self.retriever.retrieve(message).await?;
        let prompt = compose(message, &context);

        let request = ChatRequest::new(vec![ChatMessage::user(prompt.into_string())])
            .with_temperature(self.temperature);

        let response = self
            .chat
            .chat(request)
            .await
            .map_err(GenerationError::Completion)?;

        tracing::debug!(
            "Generated {} chars from {} examples via {}",
            response.len(),
            context.len(),
            self.chat.name()
        );
        Ok(response)
    }
}
