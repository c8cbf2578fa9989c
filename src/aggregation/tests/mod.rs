//! Unit tests for aggregation and digests.

mod engine_tests;
mod support;
