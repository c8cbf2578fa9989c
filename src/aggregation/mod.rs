//! Unified task view across local storage and linked providers.
//!
//! The [`services::AggregationEngine`] reads a user's local tasks and
//! provider links, calls every linked provider concurrently, and merges the
//! results in a fixed order: local tasks, then tracker, mailbox and chat
//! items. A failing provider contributes no items and is reported in the
//! per-provider status list; only storage failures abort the request.
//! [`services::DigestService`] adds an optional natural-language summary.
//!
//! - Domain types in [`domain`]
//! - Port contracts in [`ports`]
//! - Adapter implementations in [`adapters`]
//! - Orchestration services in [`services`]

pub mod adapters;
pub mod domain;
pub mod ports;
pub mod services;

#[cfg(test)]
mod tests;
