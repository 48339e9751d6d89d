use thiserror::Error;

use crate::corpus::DataLoadError;
use crate::llm::ProviderError;
use crate::rag::IndexBuildError;

/// Startup failure. Any of these stops the process before it serves.
#[derive(Debug, Error)]
pub enum InitializationError {
    #[error("Failed to load corpus: {0}")]
    DataLoad(#[from] DataLoadError),

    #[error("Failed to create model client: {0}")]
    Provider(#[from] ProviderError),

    #[error("Failed to build similarity index: {0}")]
    IndexBuild(#[from] IndexBuildError),
}
