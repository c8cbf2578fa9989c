//! Normalized task view produced by every task source.

use super::Priority;
use serde::{Deserialize, Serialize};
use std::fmt;

/// Origin of a normalized task.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum TaskSource {
    /// Task created in this system.
    Local,
    /// Issue tracker item.
    Tracker,
    /// Mailbox message.
    Mailbox,
    /// Team chat message.
    Chat,
}

impl TaskSource {
    /// Returns the canonical wire representation.
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Local => "local",
            Self::Tracker => "tracker",
            Self::Mailbox => "mailbox",
            Self::Chat => "chat",
        }
    }
}

impl fmt::Display for TaskSource {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Source-agnostic projection of a work item.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TaskView {
    source: TaskSource,
    title: String,
    priority: Priority,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    url: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    completed: Option<bool>,
}

impl TaskView {
    /// Creates a view without URL or completion state.
    #[must_use]
    pub fn new(source: TaskSource, title: impl Into<String>, priority: Priority) -> Self {
        Self {
            source,
            title: title.into(),
            priority,
            url: None,
            completed: None,
        }
    }

    /// Sets the external URL.
    #[must_use]
    pub fn with_url(mut self, url: impl Into<String>) -> Self {
        self.url = Some(url.into());
        self
    }

    /// Sets the completion flag.
    #[must_use]
    pub fn with_completed(mut self, completed: bool) -> Self {
        self.completed = Some(completed);
        self
    }

    /// Returns the task source.
    #[must_use]
    pub const fn source(&self) -> TaskSource {
        self.source
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

    /// Returns the external URL, if any.
    #[must_use]
    pub fn url(&self) -> Option<&str> {
        self.url.as_deref()
    }

    /// Returns the completion flag, if the source reports one.
    #[must_use]
    pub const fn completed(&self) -> Option<bool> {
        self.completed
    }
}
