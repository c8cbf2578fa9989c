//! Provider identifiers.

use super::ParseProviderKindError;
use crate::task::domain::TaskSource;
use serde::{Deserialize, Serialize};
use std::fmt;

/// External provider a user can link.
///
/// The declaration order is the aggregation merge order.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub enum ProviderKind {
    /// Issue tracker (GitHub).
    #[serde(rename = "github")]
    Tracker,
    /// Mailbox (Gmail).
    #[serde(rename = "gmail")]
    Mailbox,
    /// Team chat (Slack).
    #[serde(rename = "slack")]
    Chat,
}

impl ProviderKind {
    /// Every provider in merge order.
    pub const ALL: [Self; 3] = [Self::Tracker, Self::Mailbox, Self::Chat];

    /// Returns the canonical storage and routing name.
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Tracker => "github",
            Self::Mailbox => "gmail",
            Self::Chat => "slack",
        }
    }

    /// Returns the task source tag for items fetched from this provider.
    #[must_use]
    pub const fn task_source(self) -> TaskSource {
        match self {
            Self::Tracker => TaskSource::Tracker,
            Self::Mailbox => TaskSource::Mailbox,
            Self::Chat => TaskSource::Chat,
        }
    }
}

impl TryFrom<&str> for ProviderKind {
    type Error = ParseProviderKindError;

    fn try_from(value: &str) -> Result<Self, Self::Error> {
        match value.trim().to_ascii_lowercase().as_str() {
            "github" => Ok(Self::Tracker),
            "gmail" | "google" => Ok(Self::Mailbox),
            "slack" => Ok(Self::Chat),
            _ => Err(ParseProviderKindError(value.to_owned())),
        }
    }
}

impl fmt::Display for ProviderKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}
