//! Domain model for providers, provider links and provider failures.

mod error;
mod kind;
mod link;
mod token;

pub use error::{ParseProviderKindError, ProviderError, ProviderFailureKind, ProviderResult};
pub use kind::ProviderKind;
pub use link::{PersistedProviderLinkData, ProviderLink};
pub use token::AccessToken;
