//! Domain model for aggregated task views.

mod error;
mod view;

pub use error::{AggregationError, AggregationResult, SummarizerError};
pub use view::{AggregateView, Digest, ProviderOutcome, ProviderStatus};
