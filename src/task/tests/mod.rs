//! Unit tests for the local task context.
