//! Task aggregate root.

use super::{Priority, TaskDomainError, TaskId, TaskSource, TaskView};
use crate::identity::domain::UserId;
use chrono::{DateTime, Utc};
use mockable::Clock;
use serde::{Deserialize, Serialize};

/// Locally owned work item.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Task {
    id: TaskId,
    owner: UserId,
    title: String,
    priority: Priority,
    schedule_hint: String,
    completed: bool,
    created_at: DateTime<Utc>,
    updated_at: DateTime<Utc>,
}

/// Parameter object for reconstructing a persisted task aggregate.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PersistedTaskData {
    /// Persisted task identifier.
    pub id: TaskId,
    /// Persisted owning account.
    pub owner: UserId,
    /// Persisted title.
    pub title: String,
    /// Persisted priority.
    pub priority: Priority,
    /// Persisted free-form schedule hint.
    pub schedule_hint: String,
    /// Persisted completion flag.
    pub completed: bool,
    /// Persisted creation timestamp.
    pub created_at: DateTime<Utc>,
    /// Persisted latest update timestamp.
    pub updated_at: DateTime<Utc>,
}

impl Task {
    /// Creates a new, incomplete task for `owner`.
    ///
    /// # Errors
    ///
    /// Returns [`TaskDomainError::EmptyTitle`] when the title is blank.
    pub fn new(
        owner: UserId,
        title: impl Into<String>,
        priority: Priority,
        schedule_hint: impl Into<String>,
        clock: &impl Clock,
    ) -> Result<Self, TaskDomainError> {
        let title = title.into().trim().to_owned();
        if title.is_empty() {
            return Err(TaskDomainError::EmptyTitle);
        }

        let timestamp = clock.utc();
        Ok(Self {
            id: TaskId::new(),
            owner,
            title,
            priority,
            schedule_hint: schedule_hint.into().trim().to_owned(),
            completed: false,
            created_at: timestamp,
            updated_at: timestamp,
        })
    }

    /// Reconstructs a task from persisted storage.
    #[must_use]
    pub fn from_persisted(data: PersistedTaskData) -> Self {
        Self {
            id: data.id,
            owner: data.owner,
            title: data.title,
            priority: data.priority,
            schedule_hint: data.schedule_hint,
            completed: data.completed,
            created_at: data.created_at,
            updated_at: data.updated_at,
        }
    }

    /// Returns the task identifier.
    #[must_use]
    pub const fn id(&self) -> TaskId {
        self.id
    }

    /// Returns the owning account.
    #[must_use]
    pub const fn owner(&self) -> UserId {
        self.owner
    }

    /// Returns `true` when `user` owns this task.
    #[must_use]
    pub fn is_owned_by(&self, user: UserId) -> bool {
        self.owner == user
    }

    /// Returns the title.
    #[must_use]
    pub fn title(&self) -> &str {
        &self.title
    }

    /// Returns the priority.
    #[must_use]
    pub const fn priority(&self) -> Priority {
        self.priority
    }

    /// Returns the free-form schedule hint.
    #[must_use]
    pub fn schedule_hint(&self) -> &str {
        &self.schedule_hint
    }

    /// Returns the completion flag.
    #[must_use]
    pub const fn is_completed(&self) -> bool {
        self.completed
    }

    /// Returns the creation timestamp.
    #[must_use]
    pub const fn created_at(&self) -> DateTime<Utc> {
        self.created_at
    }

    /// Returns the latest update timestamp.
    #[must_use]
    pub const fn updated_at(&self) -> DateTime<Utc> {
        self.updated_at
    }

    /// Sets the completion flag and touches the update timestamp.
    pub fn set_completed(&mut self, completed: bool, clock: &impl Clock) {
        self.completed = completed;
        self.updated_at = clock.utc();
    }

    /// Projects the task into its normalized view.
    #[must_use]
    pub fn to_view(&self) -> TaskView {
        TaskView::new(TaskSource::Local, self.title.clone(), self.priority)
            .with_completed(self.completed)
    }
}
