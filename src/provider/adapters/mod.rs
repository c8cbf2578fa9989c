//! Adapter implementations for provider access and credential storage.

pub mod github;
pub mod gmail;
pub mod http;
pub mod memory;
pub mod postgres;
pub mod slack;
