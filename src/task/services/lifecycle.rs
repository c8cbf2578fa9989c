//! Service layer for creating, completing, deleting and listing local tasks.

use crate::identity::domain::UserId;
use crate::task::{
    domain::{Priority, Task, TaskDomainError, TaskId},
    ports::{TaskRepository, TaskRepositoryError},
};
use mockable::Clock;
use std::sync::Arc;
use thiserror::Error;
use tracing::debug;

/// Request payload for creating a local task.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CreateTaskRequest {
    title: String,
    priority: Priority,
    schedule_hint: String,
}

impl CreateTaskRequest {
    /// Creates a request with a title and the default priority.
    #[must_use]
    pub fn new(title: impl Into<String>) -> Self {
        Self {
            title: title.into(),
            priority: Priority::default(),
            schedule_hint: String::new(),
        }
    }

    /// Sets the task priority.
    #[must_use]
    pub const fn with_priority(mut self, priority: Priority) -> Self {
        self.priority = priority;
        self
    }

    /// Sets the free-form schedule hint.
    #[must_use]
    pub fn with_schedule_hint(mut self, schedule_hint: impl Into<String>) -> Self {
        self.schedule_hint = schedule_hint.into();
        self
    }
}

/// Service-level errors for task mutations.
#[derive(Debug, Error)]
pub enum TaskServiceError {
    /// Domain validation failed.
    #[error(transparent)]
    Domain(#[from] TaskDomainError),

    /// Repository operation failed.
    #[error(transparent)]
    Repository(#[from] TaskRepositoryError),

    /// The task does not exist.
    #[error("task not found: {0}")]
    NotFound(TaskId),

    /// The task exists but belongs to another user.
    #[error("task {0} belongs to another user")]
    Forbidden(TaskId),
}

/// Result type for task service operations.
pub type TaskServiceResult<T> = Result<T, TaskServiceError>;

/// Local task orchestration service.
///
/// Every mutation checks ownership before touching storage: a caller that
/// does not own the task gets [`TaskServiceError::Forbidden`] and the task is
/// left unchanged.
pub struct TaskService<R, C>
where
    R: TaskRepository + ?Sized,
    C: Clock + Send + Sync,
{
    repository: Arc<R>,
    clock: Arc<C>,
}

impl<R, C> TaskService<R, C>
where
    R: TaskRepository + ?Sized,
    C: Clock + Send + Sync,
{
    /// Creates a new task service.
    #[must_use]
    pub const fn new(repository: Arc<R>, clock: Arc<C>) -> Self {
        Self { repository, clock }
    }

    /// Creates a task owned by `owner`.
    ///
    /// # Errors
    ///
    /// Returns [`TaskServiceError::Domain`] when the title is blank, or
    /// [`TaskServiceError::Repository`] when persistence fails.
    pub async fn create(&self, owner: UserId, request: CreateTaskRequest) -> TaskServiceResult<Task> {
        let task = Task::new(
            owner,
            request.title,
            request.priority,
            request.schedule_hint,
            &*self.clock,
        )?;
        self.repository.store(&task).await?;
        debug!(task_id = %task.id(), owner = %owner, "created local task");
        Ok(task)
    }

    /// Sets the completion flag on a task owned by `caller`.
    ///
    /// # Errors
    ///
    /// Returns [`TaskServiceError::NotFound`], [`TaskServiceError::Forbidden`]
    /// or [`TaskServiceError::Repository`].
    pub async fn set_completed(
        &self,
        caller: UserId,
        id: TaskId,
        completed: bool,
    ) -> TaskServiceResult<Task> {
        let mut task = self.owned_task(caller, id).await?;
        task.set_completed(completed, &*self.clock);
        self.repository.update(&task).await?;
        debug!(task_id = %id, completed, "updated task completion");
        Ok(task)
    }

    /// Deletes a task owned by `caller`.
    ///
    /// # Errors
    ///
    /// Returns [`TaskServiceError::NotFound`], [`TaskServiceError::Forbidden`]
    /// or [`TaskServiceError::Repository`].
    pub async fn delete(&self, caller: UserId, id: TaskId) -> TaskServiceResult<()> {
        self.owned_task(caller, id).await?;
        self.repository.delete(id).await?;
        debug!(task_id = %id, "deleted local task");
        Ok(())
    }

    /// Lists the tasks owned by `owner` in creation order.
    ///
    /// # Errors
    ///
    /// Returns [`TaskServiceError::Repository`] when the lookup fails.
    pub async fn list(&self, owner: UserId) -> TaskServiceResult<Vec<Task>> {
        Ok(self.repository.list_by_owner(owner).await?)
    }

    async fn owned_task(&self, caller: UserId, id: TaskId) -> TaskServiceResult<Task> {
        let task = self
            .repository
            .find_by_id(id)
            .await?
            .ok_or(TaskServiceError::NotFound(id))?;
        if !task.is_owned_by(caller) {
            return Err(TaskServiceError::Forbidden(id));
        }
        Ok(task)
    }
}
