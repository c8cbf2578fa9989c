//! Summarization port.

use crate::aggregation::domain::SummarizerError;
use async_trait::async_trait;

/// Turns a prompt into a short natural-language summary.
#[async_trait]
pub trait Summarizer: Send + Sync {
    /// Summarizes `prompt`.
    ///
    /// # Errors
    ///
    /// Returns [`SummarizerError`] when no summary could be produced.
    async fn summarize(&self, prompt: &str) -> Result<String, SummarizerError>;
}
