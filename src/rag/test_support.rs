//! In-process stand-ins for the embedding and chat backends.

use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::Mutex;

use async_trait::async_trait;

use crate::corpus::CorpusRecord;
use crate::llm::{ChatProvider, ChatRequest, EmbeddingProvider, ProviderError};

const VOCABULARY: [&str; 16] = [
    "price", "discount", "annual", "lower", "available", "integration", "slack", "api",
    "security", "compliance", "can", "you", "is", "there", "a", "the",
];

pub fn record(row: usize, text: &str) -> CorpusRecord {
    CorpusRecord {
        text: text.to_string(),
        source: "test.csv".to_string(),
        row,
    }
}

fn outage(reason: &str) -> ProviderError {
    ProviderError::Protocol {
        provider: "test",
        reason: reason.to_string(),
    }
}

/// Bag-of-words embedder over a fixed vocabulary.
///
/// Can be switched into an outage after construction to simulate the
/// backend going away between index build and query.
#[derive(Default)]
pub struct KeywordEmbedder {
    down: AtomicBool,
}

impl KeywordEmbedder {
    pub fn set_down(&self, down: bool) {
        self.down.store(down, Ordering::SeqCst);
    }

    pub fn vectorize(text: &str) -> Vec<f32> {
        let mut vector = vec![0.0; VOCABULARY.len()];
        for word in text
            .split(|c: char| !c.is_alphanumeric())
            .filter(|w| !w.is_empty())
        {
            let word = word.to_lowercase();
            if let Some(pos) = VOCABULARY.iter().position(|v| *v == word) {
                vector[pos] += 1.0;
            }
        }
        vector
    }
}

#[async_trait]
impl EmbeddingProvider for KeywordEmbedder {
    fn name(&self) -> &str {
        "keyword"
    }

    async fn embed(&self, inputs: &[String]) -> Result<Vec<Vec<f32>>, ProviderError> {
        if self.down.load(Ordering::SeqCst) {
            return Err(outage("embedding backend unavailable"));
        }
        Ok(inputs.iter().map(|text| Self::vectorize(text)).collect())
    }
}

pub struct FailingEmbedder;

#[async_trait]
impl EmbeddingProvider for FailingEmbedder {
    fn name(&self) -> &str {
        "failing"
    }

    async fn embed(&self, _inputs: &[String]) -> Result<Vec<Vec<f32>>, ProviderError> {
        Err(outage("embedding backend unavailable"))
    }
}

/// Returns the configured vectors verbatim, ignoring the inputs.
pub struct FixedEmbedder {
    vectors: Vec<Vec<f32>>,
}

impl FixedEmbedder {
    pub fn new(vectors: Vec<Vec<f32>>) -> Self {
        Self { vectors }
    }
}

#[async_trait]
impl EmbeddingProvider for FixedEmbedder {
    fn name(&self) -> &str {
        "fixed"
    }

    async fn embed(&self, _inputs: &[String]) -> Result<Vec<Vec<f32>>, ProviderError> {
        Ok(self.vectors.clone())
    }
}

/// Chat model that answers with the last message it was sent.
#[derive(Default)]
pub struct EchoChat {
    pub requests: Mutex<Vec<ChatRequest>>,
}

#[async_trait]
impl ChatProvider for EchoChat {
    fn name(&self) -> &str {
        "echo"
    }

    async fn chat(&self, request: ChatRequest) -> Result<String, ProviderError> {
        let content = request
            .messages
            .last()
            .map(|m| m.content.clone())
            .unwrap_or_default();
        self.requests
            .lock()
            .map_err(|_| outage("echo state poisoned"))?
            .push(request);
        Ok(content)
    }
}

pub struct FailingChat;

#[async_trait]
impl ChatProvider for FailingChat {
    fn name(&self) -> &str {
        "failing"
    }

    async fn chat(&self, _request: ChatRequest) -> Result<String, ProviderError> {
        Err(outage("completion backend unavailable"))
    }
}
