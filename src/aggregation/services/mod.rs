//! Application services for aggregation and digests.

mod digest;
mod engine;

pub use digest::{DIGEST_TEMPLATE, DigestService};
pub use engine::{AggregationEngine, DEFAULT_ADAPTER_TIMEOUT};
