//! Port contracts for the authorization-code exchange.

mod exchanger;

pub use exchanger::{ExchangedToken, TokenExchanger};
