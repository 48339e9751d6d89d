use std::sync::Arc;

use async_trait::async_trait;

use super::index::{RetrievalError, SimilarityIndex};

/// Default number of corpus examples placed into a prompt.
pub const DEFAULT_TOP_K: usize = 3;

/// Texts of the records most similar to a message, most similar first.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct RetrievedContext(pub Vec<String>);

impl RetrievedContext {
    pub fn entries(&self) -> &[String] {
        &self.0
    }

    pub fn len(&self) -> usize {
        self.0.len()
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }
}

impl From<Vec<String>> for RetrievedContext {
    fn from(entries: Vec<String>) -> Self {
        Self(entries)
    }
}

#[async_trait]
pub trait ContextRetriever: Send + Sync {
    async fn retrieve(&self, message: &str) -> Result<RetrievedContext, RetrievalError>;
}

/// Looks up a fixed number of examples in the shared similarity index.
#[derive(Clone)]
pub struct Retriever {
    index: Arc<SimilarityIndex>,
    top_k: usize,
}

impl Retriever {
    pub fn new(index: Arc<SimilarityIndex>, top_k: usize) -> Self {
        Self { index, top_k }
    }
}

#[async_trait]
impl ContextRetriever for Retriever {
    async fn retrieve(&self, message: &str) -> Result<RetrievedContext, RetrievalError> {
        let matches = self.index.query(message, self.top_k).await?;
        tracing::debug!(
            "Retrieved {} examples (closest distance {:?})",
            matches.len(),
            matches.first().map(|m| m.distance)
        );
        Ok(matches
            .into_iter()
            .map(|m| m.record.text)
            .collect::<Vec<_>>()
            .into())
    }
}
