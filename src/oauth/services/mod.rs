//! Application services for provider authorization.

mod flow;

pub use flow::{OAUTH_STATE_PURPOSE, OAuthExchangeFlow};
