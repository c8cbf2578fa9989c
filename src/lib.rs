//! Taskmesh: one task list across an issue tracker, a mailbox and team chat.
//!
//! Users link their GitHub, Gmail and Slack identities through the OAuth
//! authorization-code grant. Each aggregate request reads the caller's local
//! tasks and fans out to every linked provider concurrently, merging the
//! results in a fixed order and reporting per-provider failures instead of
//! failing the whole request.
//!
//! # Architecture
//!
//! Each bounded context follows hexagonal architecture:
//!
//! - **Domain**: plain types and validation, no I/O
//! - **Ports**: async traits for storage and external services
//! - **Adapters**: in-memory, `PostgreSQL` and HTTP implementations
//! - **Services**: orchestration over ports
//!
//! # Modules
//!
//! - [`identity`]: accounts and bearer sessions
//! - [`provider`]: provider kinds, links, the credential store and adapters
//! - [`oauth`]: authorization URLs, signed state and the code exchange
//! - [`aggregation`]: the unified view and summarized digests
//! - [`task`]: locally owned tasks and the normalized task view
//! - [`http`]: the axum routing layer
//! - [`config`], [`telemetry`], [`persistence`], [`signing`]: process plumbing

pub mod aggregation;
pub mod config;
pub mod http;
pub mod identity;
pub mod oauth;
pub mod persistence;
pub mod provider;
pub mod signing;
pub mod task;
pub mod telemetry;

#[cfg(test)]
pub(crate) mod test_support;
