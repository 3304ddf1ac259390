//! MessageDraft - A message before it enters the store
//!
//! `add` ignores any supplied id/timestamp and generates fresh ones; seed
//! messages keep what they carry and only fill the gaps.

use serde::{Deserialize, Serialize};

use super::role::Role;

/// Partial message accepted by `add` and by seed configuration.
#[derive(Serialize, Deserialize, Clone, Debug, PartialEq, Eq)]
pub struct MessageDraft {
    pub role: Role,

    pub content: String,

    /// Only honored when seeding an engine
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub id: Option<String>,

    /// Only honored when seeding an engine
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub timestamp: Option<i64>,

    /// Target branch; the active branch when unset
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub branch_id: Option<String>,

    /// Only honored when seeding an engine
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub parent_id: Option<String>,
}

impl MessageDraft {
    /// Create a draft with the given role and content
    pub fn new(role: Role, content: impl Into<String>) -> Self {
        Self {
            role,
            content: content.into(),
            id: None,
            timestamp: None,
            branch_id: None,
            parent_id: None,
        }
    }

    pub fn user(content: impl Into<String>) -> Self {
        Self::new(Role::User, content)
    }

    pub fn assistant(content: impl Into<String>) -> Self {
        Self::new(Role::Assistant, content)
    }

    pub fn system(content: impl Into<String>) -> Self {
        Self::new(Role::System, content)
    }

    /// Target a specific branch instead of the active one
    pub fn on_branch(mut self, branch_id: impl Into<String>) -> Self {
        self.branch_id = Some(branch_id.into());
        self
    }

    pub fn with_id(mut self, id: impl Into<String>) -> Self {
        self.id = Some(id.into());
        self
    }

    pub fn with_timestamp(mut self, timestamp: i64) -> Self {
        self.timestamp = Some(timestamp);
        self
    }

    pub fn with_parent(mut self, parent_id: impl Into<String>) -> Self {
        self.parent_id = Some(parent_id.into());
        self
    }
}
