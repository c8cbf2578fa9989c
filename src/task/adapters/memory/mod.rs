//! In-memory adapters for local task storage.

mod task;

pub use task::InMemoryTaskRepository;
