//! Domain model for provider authorization.

mod callback;
mod descriptor;
mod error;
mod state;

pub use callback::{AuthorizationRedirect, CallbackParams, LinkedProvider};
pub use descriptor::{ClientCredentials, ClientSecret, ProviderDescriptor};
pub use error::{ExchangeError, OAuthError, OAuthResult, StateRejection};
pub use state::{STATE_LIFETIME_SECS, StateClaims};
