//! Application services for local task mutations.

mod lifecycle;

pub use lifecycle::{CreateTaskRequest, TaskService, TaskServiceError, TaskServiceResult};
