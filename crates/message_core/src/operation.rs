//! Operation - Reversible records kept by the undo/redo log
//!
//! Each variant carries exactly what is needed to invert and re-apply its
//! mutation, so log dispatch is an exhaustive match over `OperationKind`.

use std::fmt;

use serde::{Deserialize, Serialize};

use crate::ids::now_millis;
use crate::message::Message;

/// A logged mutation.
#[derive(Serialize, Deserialize, Clone, Debug, PartialEq, Eq)]
pub struct Operation {
    /// When the mutation was committed (epoch milliseconds)
    pub timestamp: i64,

    pub kind: OperationKind,
}

/// Per-kind payload of a logged mutation.
#[derive(Serialize, Deserialize, Clone, Debug, PartialEq, Eq)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum OperationKind {
    /// A message was appended
    Add {
        message: Message,
        /// Store position the message was appended at
        index: usize,
    },

    /// A message's content was replaced
    Edit { before: Message, after: Message },

    /// A message was removed
    Delete {
        message: Message,
        /// Store position the message occupied
        index: usize,
    },

    /// Regeneration was requested; the store was not touched
    Regenerate { snapshot: Message },

    /// A new branch was forked from `fork_point_id`
    Branch {
        branch_id: String,
        fork_point_id: String,
        /// Branch that was active before forking
        previous_branch_id: String,
        /// Records appended to the store by the fork
        copies: Vec<Message>,
    },
}

/// Discriminant of `OperationKind`, for callers that only need the type.
#[derive(Serialize, Deserialize, Clone, Copy, Debug, PartialEq, Eq, Hash)]
#[serde(rename_all = "snake_case")]
pub enum OperationType {
    Add,
    Edit,
    Delete,
    Regenerate,
    Branch,
}

impl fmt::Display for OperationType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            OperationType::Add => "add",
            OperationType::Edit => "edit",
            OperationType::Delete => "delete",
            OperationType::Regenerate => "regenerate",
            OperationType::Branch => "branch",
        };
        f.write_str(name)
    }
}

impl Operation {
    /// Stamp a payload with the current time
    pub fn new(kind: OperationKind) -> Self {
        Self {
            timestamp: now_millis(),
            kind,
        }
    }

    pub fn op_type(&self) -> OperationType {
        match &self.kind {
            OperationKind::Add { .. } => OperationType::Add,
            OperationKind::Edit { .. } => OperationType::Edit,
            OperationKind::Delete { .. } => OperationType::Delete,
            OperationKind::Regenerate { .. } => OperationType::Regenerate,
            OperationKind::Branch { .. } => OperationType::Branch,
        }
    }

    /// The primary subject of the operation. For a branch this is the fork point.
    pub fn message_id(&self) -> &str {
        match &self.kind {
            OperationKind::Add { message, .. } | OperationKind::Delete { message, .. } => {
                &message.id
            }
            OperationKind::Edit { before, .. } => &before.id,
            OperationKind::Regenerate { snapshot } => &snapshot.id,
            OperationKind::Branch { fork_point_id, .. } => fork_point_id,
        }
    }

    /// Snapshot of the subject before the operation, where one exists.
    ///
    /// For `Add` this is the added message itself.
    pub fn previous_state(&self) -> Option<&Message> {
        match &self.kind {
            OperationKind::Add { message, .. } | OperationKind::Delete { message, .. } => {
                Some(message)
            }
            OperationKind::Edit { before, .. } => Some(before),
            OperationKind::Regenerate { snapshot } => Some(snapshot),
            OperationKind::Branch { .. } => None,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::ids::MAIN_BRANCH_ID;
    use crate::message::MessageDraft;

    fn sample() -> Message {
        Message::create(MessageDraft::user("Hello"), MAIN_BRANCH_ID)
    }

    #[test]
    fn test_edit_subject_is_the_edited_message() {
        let before = sample();
        let mut after = before.clone();
        after.apply_edit("Hi");

        let op = Operation::new(OperationKind::Edit {
            before: before.clone(),
            after,
        });
        assert_eq!(op.op_type(), OperationType::Edit);
        assert_eq!(op.message_id(), before.id);
        assert_eq!(op.previous_state(), Some(&before));
    }

    #[test]
    fn test_branch_subject_is_fork_point() {
        let op = Operation::new(OperationKind::Branch {
            branch_id: "branch-1".to_string(),
            fork_point_id: "m1".to_string(),
            previous_branch_id: MAIN_BRANCH_ID.to_string(),
            copies: Vec::new(),
        });
        assert_eq!(op.op_type().to_string(), "branch");
        assert_eq!(op.message_id(), "m1");
        assert!(op.previous_state().is_none());
    }

    #[test]
    fn test_operation_serializes_with_type_tag() {
        let op = Operation::new(OperationKind::Regenerate { snapshot: sample() });
        let value = serde_json::to_value(&op).unwrap();
        assert_eq!(value["kind"]["type"], "regenerate");
    }
}
