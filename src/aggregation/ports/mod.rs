//! Port contracts for aggregation collaborators.

mod summarizer;

pub use summarizer::Summarizer;
