//! In-memory similarity index over the embedded corpus.
//!
//! The index is built once from the full corpus and is read-only afterwards.
//! Queries embed the query text and rank every stored vector by Euclidean
//! distance (exact search).

use std::sync::Arc;

use thiserror::Error;

use super::vector_math::{is_finite, rank_ascending_by_distance};
use crate::corpus::CorpusRecord;
use crate::llm::{EmbeddingProvider, ProviderError};

#[derive(Debug, Error)]
pub enum IndexBuildError {
    #[error("cannot build an index from an empty corpus")]
    EmptyCorpus,
    #[error("failed to embed corpus: {0}")]
    Embedding(#[source] ProviderError),
    #[error("embedding provider returned {actual} vectors for {expected} records")]
    CountMismatch { expected: usize, actual: usize },
    #[error("embedding provider returned empty vectors")]
    EmptyEmbedding,
    #[error("embedding for row {row} contains non-finite values")]
    NonFiniteEmbedding { row: usize },
    #[error("embedding for row {row} has dimension {actual}, expected {expected}")]
    DimensionMismatch {
        row: usize,
        expected: usize,
        actual: usize,
    },
}

#[derive(Debug, Error)]
pub enum RetrievalError {
    #[error("k must be at least 1")]
    InvalidK,
    #[error("failed to embed query: {0}")]
    Embedding(#[source] ProviderError),
    #[error("embedding provider returned no vector for the query")]
    MissingQueryEmbedding,
    #[error("query embedding has dimension {actual}, index expects {expected}")]
    DimensionMismatch { expected: usize, actual: usize },
    #[error("query embedding contains non-finite values")]
    NonFiniteQuery,
}

/// A corpus record returned by a similarity query.
#[derive(Debug, Clone)]
pub struct RecordMatch {
    pub record: CorpusRecord,
    /// Euclidean distance to the query embedding (lower = more similar).
    pub distance: f32,
}

pub struct SimilarityIndex {
    records: Vec<CorpusRecord>,
    embeddings: Vec<Vec<f32>>,
    dimension: usize,
    embedder: Arc<dyn EmbeddingProvider>,
}

impl SimilarityIndex {
    /// Embeds every record and builds the index.
    pub async fn build(
        records: Vec<CorpusRecord>,
        embedder: Arc<dyn EmbeddingProvider>,
    ) -> Result<Self, IndexBuildError> {
        if records.is_empty() {
            return Err(IndexBuildError::EmptyCorpus);
        }

        let texts: Vec<String> = records.iter().map(|r| r.text.clone()).collect();
        let embeddings = embedder
            .embed(&texts)
            .await
            .map_err(IndexBuildError::Embedding)?;

        if embeddings.len() != records.len() {
            return Err(IndexBuildError::CountMismatch {
                expected: records.len(),
                actual: embeddings.len(),
            });
        }

        let dimension = embeddings[0].len();
        if dimension == 0 {
            return Err(IndexBuildError::EmptyEmbedding);
        }
        for (row, embedding) in embeddings.iter().enumerate() {
            if embedding.len() != dimension {
                return Err(IndexBuildError::DimensionMismatch {
                    row,
                    expected: dimension,
                    actual: embedding.len(),
                });
            }
            if !is_finite(embedding) {
                return Err(IndexBuildError::NonFiniteEmbedding { row });
            }
        }

        tracing::info!(
            "Built similarity index: {} records, dimension {}, provider {}",
            records.len(),
            dimension,
            embedder.name()
        );

        Ok(Self {
            records,
            embeddings,
            dimension,
            embedder,
        })
    }

    pub fn len(&self) -> usize {
        self.records.len()
    }

    pub fn is_empty(&self) -> bool {
        self.records.is_empty()
    }

    /// Returns the `min(k, len)` records closest to `text`, closest first.
    pub async fn query(&self, text: &str, k: usize) -> Result<Vec<RecordMatch>, RetrievalError> {
        if k == 0 {
            return Err(RetrievalError::InvalidK);
        }

        let query_embedding = self
            .embedder
            .embed(&[text.to_string()])
            .await
            .map_err(RetrievalError::Embedding)?
            .into_iter()
            .next()
            .ok_or(RetrievalError::MissingQueryEmbedding)?;

        if query_embedding.len() != self.dimension {
            return Err(RetrievalError::DimensionMismatch {
                expected: self.dimension,
                actual: query_embedding.len(),
            });
        }
        if !is_finite(&query_embedding) {
            return Err(RetrievalError::NonFiniteQuery);
        }

        let ranked = rank_ascending_by_distance(&query_embedding, &self.embeddings).ok_or(
            RetrievalError::DimensionMismatch {
                expected: self.dimension,
                actual: query_embedding.len(),
            },
        )?;

        Ok(ranked
            .into_iter()
            .take(k)
            .map(|(idx, distance)| RecordMatch {
                record: self.records[idx].clone(),
                distance,
            })
            .collect())
    }
}
