//! Domain model for local tasks and normalized task views.

mod error;
mod ids;
mod priority;
mod task;
mod view;

pub use error::{ParsePriorityError, TaskDomainError};
pub use ids::TaskId;
pub use priority::Priority;
pub use task::{PersistedTaskData, Task};
pub use view::{TaskSource, TaskView};
