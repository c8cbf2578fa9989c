//! Adapter implementations for aggregation collaborators.

mod anthropic;

pub use anthropic::{ANTHROPIC_API_BASE, AnthropicSummarizer, ApiKey, DEFAULT_ANTHROPIC_MODEL};
