//! Adapter implementations for local task storage.

pub mod memory;
pub mod postgres;
