//! Locally owned tasks and the normalized task view.
//!
//! Local tasks are the only work items this crate persists. Every task
//! source, local or external, is projected into a [`domain::TaskView`] before
//! it reaches the aggregation layer.
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
