//! Retrieval-augmented reply generation.
//!
//! This module provides:
//! - `SimilarityIndex`: the corpus embedded once at startup, queried per request
//! - `Retriever`: fetches the top-k example texts for a message
//! - `compose`: renders the reply-drafting prompt
//! - `ResponseGenerator`: retrieval, composition and the model call in sequence

mod generator;
mod index;
mod prompt;
mod retriever;
mod vector_math;

#[cfg(test)]
pub(crate) mod test_support;

pub use generator::{GenerationError, ResponseGenerator};
pub use index::{IndexBuildError, RecordMatch, RetrievalError, SimilarityIndex};
pub use prompt::{compose, ComposedPrompt};
pub use retriever::{ContextRetriever, RetrievedContext, Retriever, DEFAULT_TOP_K};
