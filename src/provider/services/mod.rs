//! Provider adapter lookup.

mod registry;

pub use registry::ProviderRegistry;
