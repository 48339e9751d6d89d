use std::sync::Arc;

use crate::core::config::AppConfig;
use crate::corpus::load_corpus;
use crate::llm::{ChatProvider, EmbeddingProvider, OpenAiProvider};
use crate::rag::{ResponseGenerator, Retriever, SimilarityIndex};

pub mod error;

use error::InitializationError;

/// Process-wide state shared by every request.
///
/// Built once before the listener is bound. The similarity index is
/// read-only after construction, so handlers share it without locking.
#[derive(Clone)]
pub struct AppState {
    pub config: Arc<AppConfig>,
    pub index: Arc<SimilarityIndex>,
    pub generator: ResponseGenerator,
}

impl AppState {
    /// Initializes the application state against the configured
    /// OpenAI-compatible backend.
    ///
    /// This process includes:
    /// 1. Creating the embeddings/chat client
    /// 2. Loading the corpus CSV
    /// 3. Embedding the corpus into the similarity index
    pub async fn initialize(config: AppConfig) -> Result<Arc<Self>, InitializationError> {
        let provider = Arc::new(OpenAiProvider::new(&config.openai)?);
        tracing::info!(
            "Using chat model {} at temperature {}",
            provider.chat_model(),
            config.generation.temperature
        );
        Self::with_providers(config, provider.clone(), provider).await
    }

    /// Initializes the application state with explicit model backends.
    pub async fn with_providers(
        config: AppConfig,
        embedder: Arc<dyn EmbeddingProvider>,
        chat: Arc<dyn ChatProvider>,
    ) -> Result<Arc<Self>, InitializationError> {
        let records = load_corpus(&config.corpus.path)?;
        tracing::info!(
            "Loaded {} corpus records from {}",
            records.len(),
            config.corpus.path.display()
        );

        let index = Arc::new(SimilarityIndex::build(records, embedder).await?);

        let retriever = Retriever::new(index.clone(), config.retrieval.top_k);
        let generator =
            ResponseGenerator::new(Arc::new(retriever), chat, config.generation.temperature);

        Ok(Arc::new(AppState {
            config: Arc::new(config),
            index,
            generator,
        }))
    }
}

#[cfg(test)]
mod tests {
    use std::io::Write;

    use super::*;
    use crate::rag::test_support::{EchoChat, FailingEmbedder, KeywordEmbedder};

    fn config_for(path: &std::path::Path) -> AppConfig {
        let mut config = AppConfig::default();
        config.openai.api_key = "sk-test".to_string();
        config.corpus.path = path.to_path_buf();
        config
    }

    #[tokio::test]
    async fn unreadable_corpus_aborts_startup() {
        let dir = tempfile::tempdir().unwrap();
        let config = config_for(&dir.path().join("missing.csv"));

        let err = AppState::with_providers(
            config,
            Arc::new(KeywordEmbedder::default()),
            Arc::new(EchoChat::default()),
        )
        .await
        .err()
        .unwrap();

        assert!(matches!(err, InitializationError::DataLoad(_)));
    }

    #[tokio::test]
    async fn embedding_failure_aborts_startup() {
        let mut file = tempfile::NamedTempFile::new().unwrap();
        writeln!(file, "message,response\nhi,hello").unwrap();

        let err = AppState::with_providers(
            config_for(file.path()),
            Arc::new(FailingEmbedder),
            Arc::new(EchoChat::default()),
        )
        .await
        .err()
        .unwrap();

        assert!(matches!(err, InitializationError::IndexBuild(_)));
    }

    #[tokio::test]
    async fn builds_index_over_whole_corpus() {
        let mut file = tempfile::NamedTempFile::new().unwrap();
        writeln!(file, "message,response\nhi,hello\nprice?,discount").unwrap();

        let state = AppState::with_providers(
            config_for(file.path()),
            Arc::new(KeywordEmbedder::default()),
            Arc::new(EchoChat::default()),
        )
        .await
        .unwrap();

        assert_eq!(state.index.len(), 2);
    }
}
