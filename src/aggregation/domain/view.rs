//! Aggregated task list and per-provider outcomes.

use crate::provider::domain::{ProviderFailureKind, ProviderKind};
use crate::task::domain::TaskView;
use serde::Serialize;

/// What happened to one provider during an aggregate request.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(tag = "status", rename_all = "snake_case")]
pub enum ProviderOutcome {
    /// The user has not linked this provider.
    NotLinked,
    /// Items were fetched.
    Fetched {
        /// Number of items contributed.
        count: usize,
    },
    /// The provider call failed and contributed no items.
    Failed {
        /// Failure classification.
        kind: ProviderFailureKind,
    },
}

/// Outcome for one provider.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct ProviderStatus {
    /// Provider reported on.
    pub provider: ProviderKind,
    /// What happened.
    #[serde(flatten)]
    pub outcome: ProviderOutcome,
}

/// Merged task list plus one status per provider.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct AggregateView {
    tasks: Vec<TaskView>,
    providers: Vec<ProviderStatus>,
}

impl AggregateView {
    /// Creates a view from merged tasks and provider statuses.
    #[must_use]
    pub const fn new(tasks: Vec<TaskView>, providers: Vec<ProviderStatus>) -> Self {
        Self { tasks, providers }
    }

    /// Returns the merged tasks in source order.
    #[must_use]
    pub fn tasks(&self) -> &[TaskView] {
        &self.tasks
    }

    /// Returns one status per provider in merge order.
    #[must_use]
    pub fn providers(&self) -> &[ProviderStatus] {
        &self.providers
    }

    /// Returns the status for `provider`.
    #[must_use]
    pub fn status(&self, provider: ProviderKind) -> Option<ProviderOutcome> {
        self.providers
            .iter()
            .find(|status| status.provider == provider)
            .map(|status| status.outcome)
    }

    /// Returns providers whose stored token was rejected.
    ///
    /// The user has to run the authorize step again for each of them.
    #[must_use]
    pub fn reconnect_required(&self) -> Vec<ProviderKind> {
        self.providers
            .iter()
            .filter(|status| {
                status.outcome
                    == ProviderOutcome::Failed {
                        kind: ProviderFailureKind::AuthInvalid,
                    }
            })
            .map(|status| status.provider)
            .collect()
    }

    /// Consumes the view and returns the merged tasks.
    #[must_use]
    pub fn into_tasks(self) -> Vec<TaskView> {
        self.tasks
    }
}

/// Aggregate view with an optional summary.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Digest {
    /// The aggregate the summary was produced from.
    #[serde(flatten)]
    pub view: AggregateView,
    /// Natural-language summary; absent when the summarizer failed.
    pub summary: Option<String>,
}
