//! Adapter implementations for account storage.

pub mod memory;
pub mod postgres;
