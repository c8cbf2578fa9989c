//! Step definitions for unified task view scenarios.

mod given;
mod then;
mod when;
pub mod world;
