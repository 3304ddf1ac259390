//! Read-only views. Nothing here mutates the engine.

use std::collections::VecDeque;

use message_core::{Message, Operation};

use super::MessageEngine;

impl MessageEngine {
    /// Messages on the active branch, in store order.
    pub fn messages(&self) -> Vec<&Message> {
        self.store.on_branch(&self.active_branch_id).collect()
    }

    /// Active-branch prefix ending at (and including) `message_id`.
    ///
    /// Empty when the message is not on the active branch.
    pub fn messages_up_to(&self, message_id: &str) -> Vec<&Message> {
        let visible = self.messages();
        match visible.iter().position(|m| m.id == message_id) {
            Some(index) => visible[..=index].to_vec(),
            None => Vec::new(),
        }
    }

    /// Look up a message, preferring its record on the active branch.
    pub fn get_message(&self, message_id: &str) -> Option<&Message> {
        self.store.get(message_id, &self.active_branch_id)
    }

    /// The full cross-branch store.
    pub fn all_messages(&self) -> &[Message] {
        self.store.as_slice()
    }

    /// Undoable operations, oldest first.
    pub fn history(&self) -> &VecDeque<Operation> {
        self.log.history()
    }

    /// Undone operations, most recent last.
    pub fn redo_stack(&self) -> &[Operation] {
        self.log.redo_stack()
    }

    pub fn can_undo(&self) -> bool {
        self.log.can_undo()
    }

    pub fn can_redo(&self) -> bool {
        self.log.can_redo()
    }
}
