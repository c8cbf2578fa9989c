//! Error types for aggregation and summarization.

use crate::provider::ports::CredentialStoreError;
use crate::task::ports::TaskRepositoryError;
use std::sync::Arc;
use thiserror::Error;

/// Result type for aggregation operations.
pub type AggregationResult<T> = Result<T, AggregationError>;

/// Fatal aggregation failure.
///
/// Provider failures never appear here; they are reported per provider in
/// the [`super::AggregateView`].
#[derive(Debug, Clone, Error)]
pub enum AggregationError {
    /// Local task storage or the credential store could not be read.
    #[error("storage unavailable: {0}")]
    StorageUnavailable(Arc<dyn std::error::Error + Send + Sync>),
}

impl From<TaskRepositoryError> for AggregationError {
    fn from(err: TaskRepositoryError) -> Self {
        Self::StorageUnavailable(Arc::new(err))
    }
}

impl From<CredentialStoreError> for AggregationError {
    fn from(err: CredentialStoreError) -> Self {
        Self::StorageUnavailable(Arc::new(err))
    }
}

/// Failure of the summarization collaborator.
#[derive(Debug, Clone, Error, PartialEq, Eq)]
pub enum SummarizerError {
    /// The service could not be reached or timed out.
    #[error("summarizer unavailable: {0}")]
    Unavailable(String),
    /// The service answered with an error status.
    #[error("summarizer rejected the request with HTTP {0}")]
    Rejected(u16),
    /// The response carried no text.
    #[error("summarizer response malformed: {0}")]
    Malformed(String),
}
