//! Command executors and undo/redo dispatch.
//!
//! Every committed mutation logs exactly one `Operation` and clears the redo
//! stack. Unknown ids are silent no-ops reported through the return value.
//! Ids resolve on the active branch first, then anywhere in the store.

use message_core::{Message, MessageDraft, Operation, OperationKind};

use super::MessageEngine;

impl MessageEngine {
    /// Append a message, defaulting its branch to the active one. Returns the new id.
    pub fn add(&mut self, draft: MessageDraft) -> String {
        let message = Message::create(draft, &self.active_branch_id);
        let message_id = message.id.clone();

        tracing::info!(
            message_id = %message_id,
            branch = %message.branch_id,
            role = %message.role,
            content_len = message.content.len(),
            "MessageEngine: Adding message"
        );

        let index = self.store.push(message.clone());
        self.log
            .record(Operation::new(OperationKind::Add { message, index }));
        message_id
    }

    /// Replace a message's content, tracking its original content and version.
    pub fn edit(&mut self, message_id: &str, new_content: impl Into<String>) -> bool {
        let new_content = new_content.into();
        let Some(message) = self.store.get_mut(message_id, &self.active_branch_id) else {
            tracing::debug!(message_id, "MessageEngine: edit target not found");
            return false;
        };

        let before = message.clone();
        message.apply_edit(new_content.as_str());
        let after = message.clone();

        tracing::info!(
            message_id,
            version = ?after.version,
            content_len = new_content.len(),
            "MessageEngine: Edited message"
        );

        self.log
            .record(Operation::new(OperationKind::Edit { before, after }));
        self.observer.on_edit(message_id, &new_content);
        true
    }

    /// Open an edit session. Not logged.
    pub fn start_editing(&mut self, message_id: &str) -> bool {
        self.set_editing(message_id, true)
    }

    /// Close an edit session without changing content. Not logged.
    pub fn cancel_editing(&mut self, message_id: &str) -> bool {
        self.set_editing(message_id, false)
    }

    fn set_editing(&mut self, message_id: &str, editing: bool) -> bool {
        match self.store.get_mut(message_id, &self.active_branch_id) {
            Some(message) => {
                message.is_editing = editing;
                tracing::debug!(message_id, editing, "MessageEngine: Edit session toggled");
                true
            }
            None => false,
        }
    }

    /// Remove a message permanently, preferring its record on the active branch.
    pub fn delete(&mut self, message_id: &str) -> bool {
        let Some((index, message)) = self.store.remove(message_id, &self.active_branch_id) else {
            tracing::debug!(message_id, "MessageEngine: delete target not found");
            return false;
        };

        tracing::info!(
            message_id,
            branch = %message.branch_id,
            index,
            "MessageEngine: Deleted message"
        );

        self.log
            .record(Operation::new(OperationKind::Delete { message, index }));
        self.observer.on_delete(message_id);
        true
    }

    /// Request new content for a message. The store is untouched; the
    /// collaborator answers by calling `edit`.
    pub fn regenerate(&mut self, message_id: &str) -> bool {
        let Some(snapshot) = self.store.get(message_id, &self.active_branch_id).cloned() else {
            tracing::debug!(message_id, "MessageEngine: regenerate target not found");
            return false;
        };

        tracing::info!(message_id, role = %snapshot.role, "MessageEngine: Regeneration requested");

        self.log
            .record(Operation::new(OperationKind::Regenerate { snapshot }));
        self.observer.on_regenerate(message_id);
        true
    }

    /// Revert the most recent operation. Returns `false` when there is nothing to undo.
    pub fn undo(&mut self) -> bool {
        let Some(operation) = self.log.pop_undo() else {
            return false;
        };

        tracing::debug!(
            op_type = %operation.op_type(),
            message_id = %operation.message_id(),
            "MessageEngine: Undo"
        );

        self.apply_inverse(&operation);
        self.log.push_redo(operation);
        true
    }

    /// Re-apply the most recently undone operation. Returns `false` when there is nothing to redo.
    pub fn redo(&mut self) -> bool {
        let Some(operation) = self.log.pop_redo() else {
            return false;
        };

        tracing::debug!(
            op_type = %operation.op_type(),
            message_id = %operation.message_id(),
            "MessageEngine: Redo"
        );

        self.apply_forward(&operation);
        self.log.push_redone(operation);
        true
    }

    fn apply_inverse(&mut self, operation: &Operation) {
        match &operation.kind {
            OperationKind::Add { message, .. } => {
                if self.store.remove_exact(&message.id, &message.branch_id).is_none() {
                    tracing::warn!(message_id = %message.id, "MessageEngine: Undo add found no message");
                }
            }
            OperationKind::Edit { before, .. } => self.restore_snapshot(before),
            OperationKind::Regenerate { snapshot } => self.restore_snapshot(snapshot),
            OperationKind::Delete { message, index } => {
                self.store.insert_at(*index, message.clone());
            }
            OperationKind::Branch {
                branch_id,
                previous_branch_id,
                ..
            } => {
                let removed = self.store.remove_branch(branch_id);
                if self.active_branch_id == *branch_id {
                    self.active_branch_id = previous_branch_id.clone();
                }
                tracing::debug!(
                    branch = %branch_id,
                    removed,
                    active_branch = %self.active_branch_id,
                    "MessageEngine: Branch removed by undo"
                );
            }
        }
    }

    fn apply_forward(&mut self, operation: &Operation) {
        match &operation.kind {
            OperationKind::Add { message, index } => {
                self.store.insert_at(*index, message.clone());
            }
            OperationKind::Edit { after, .. } => self.restore_snapshot(after),
            OperationKind::Regenerate { snapshot } => self.restore_snapshot(snapshot),
            OperationKind::Delete { message, .. } => {
                if self.store.remove_exact(&message.id, &message.branch_id).is_none() {
                    tracing::warn!(message_id = %message.id, "MessageEngine: Redo delete found no message");
                }
            }
            OperationKind::Branch {
                branch_id, copies, ..
            } => {
                for copy in copies {
                    self.store.push(copy.clone());
                }
                self.active_branch_id = branch_id.clone();
            }
        }
    }

    fn restore_snapshot(&mut self, snapshot: &Message) {
        if !self.store.replace(snapshot.clone()) {
            tracing::warn!(
                message_id = %snapshot.id,
                "MessageEngine: Snapshot target missing from store"
            );
        }
    }
}
