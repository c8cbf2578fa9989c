//! Adapter implementations for the token exchange.

mod http;

pub use http::HttpTokenExchanger;
