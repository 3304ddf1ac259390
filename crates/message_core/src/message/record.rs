//! Message - One turn in a conversation
//!
//! Tracks edit history through `original_content` (write-once) and
//! `version` (incremented by one per committed edit).

use serde::{Deserialize, Serialize};

use super::draft::MessageDraft;
use super::role::Role;
use crate::ids::{new_message_id, now_millis};

/// A stored conversation message
#[derive(Serialize, Deserialize, Clone, Debug, PartialEq, Eq)]
pub struct Message {
    /// Identifier, never reused. Unique within a branch; a fork-point copy
    /// shares the id of the message it was forked from.
    pub id: String,

    pub role: Role,

    /// Current text payload
    pub content: String,

    /// Creation time in epoch milliseconds
    pub timestamp: i64,

    /// Message this one was forked from
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub parent_id: Option<String>,

    /// Timeline this message belongs to
    pub branch_id: String,

    /// True only while an edit session is open
    #[serde(default)]
    pub is_editing: bool,

    /// Content before the first edit
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub original_content: Option<String>,

    /// Edit counter, absent until the first edit
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub version: Option<u32>,
}

impl Message {
    /// Build a fresh message from a draft, always generating id and timestamp.
    ///
    /// `parent_id` is left unset; only forking assigns lineage.
    pub fn create(draft: MessageDraft, default_branch: &str) -> Self {
        Self {
            id: new_message_id(),
            role: draft.role,
            content: draft.content,
            timestamp: now_millis(),
            parent_id: None,
            branch_id: draft
                .branch_id
                .unwrap_or_else(|| default_branch.to_string()),
            is_editing: false,
            original_content: None,
            version: None,
        }
    }

    /// Normalize a seed draft, keeping any id/timestamp it already carries.
    pub fn seed(draft: MessageDraft, default_branch: &str) -> Self {
        Self {
            id: draft.id.unwrap_or_else(new_message_id),
            role: draft.role,
            content: draft.content,
            timestamp: draft.timestamp.unwrap_or_else(now_millis),
            parent_id: draft.parent_id,
            branch_id: draft
                .branch_id
                .unwrap_or_else(|| default_branch.to_string()),
            is_editing: false,
            original_content: None,
            version: None,
        }
    }

    /// Commit an edit: record the original content once, bump the version
    /// and close any open edit session.
    pub fn apply_edit(&mut self, new_content: impl Into<String>) {
        if self.original_content.is_none() {
            self.original_content = Some(self.content.clone());
        }
        self.content = new_content.into();
        self.version = Some(self.version.unwrap_or(0) + 1);
        self.is_editing = false;
    }

    /// Deep copy of this message onto another branch.
    ///
    /// The fork-point copy keeps this message's id and `parent_id`, so the
    /// fork point is addressable by the same id on both branches. Every other
    /// copy gets a fresh id and points back at the message it was copied from.
    pub fn fork_copy(&self, branch_id: &str, is_fork_point: bool) -> Self {
        let (id, parent_id) = if is_fork_point {
            (self.id.clone(), self.parent_id.clone())
        } else {
            (new_message_id(), Some(self.id.clone()))
        };
        Self {
            id,
            parent_id,
            branch_id: branch_id.to_string(),
            ..self.clone()
        }
    }

    pub fn is_on_branch(&self, branch_id: &str) -> bool {
        self.branch_id == branch_id
    }

    pub fn is_edited(&self) -> bool {
        self.version.is_some()
    }
}
