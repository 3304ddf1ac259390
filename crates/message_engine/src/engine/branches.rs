//! Branching - Forking timelines and the derived branch index
//!
//! A branch is not stored on its own: it is the set of messages sharing a
//! `branch_id`. Forking deep-copies a store prefix into new records so
//! edits on one branch never reach another. The fork point's copy keeps its
//! id, so the fork point is addressable by the same id on both branches.

use std::collections::HashMap;

use message_core::{new_branch_id, Message, Operation, OperationKind};

use super::MessageEngine;

/// Messages grouped by branch, keyed in order of first appearance in the store.
#[derive(Debug, Clone)]
pub struct BranchIndex<'a> {
    branches: Vec<(&'a str, Vec<&'a Message>)>,
}

impl<'a> BranchIndex<'a> {
    pub fn build(messages: &'a [Message]) -> Self {
        let mut positions: HashMap<&'a str, usize> = HashMap::new();
        let mut branches: Vec<(&'a str, Vec<&'a Message>)> = Vec::new();

        for message in messages {
            let branch_id = message.branch_id.as_str();
            let slot = *positions.entry(branch_id).or_insert_with(|| {
                branches.push((branch_id, Vec::new()));
                branches.len() - 1
            });
            branches[slot].1.push(message);
        }

        Self { branches }
    }

    /// Messages of one branch in store order
    pub fn get(&self, branch_id: &str) -> Option<&[&'a Message]> {
        self.branches
            .iter()
            .find(|(id, _)| *id == branch_id)
            .map(|(_, messages)| messages.as_slice())
    }

    pub fn contains(&self, branch_id: &str) -> bool {
        self.get(branch_id).is_some()
    }

    pub fn branch_ids(&self) -> impl Iterator<Item = &'a str> + '_ {
        self.branches.iter().map(|(id, _)| *id)
    }

    pub fn iter(&self) -> impl Iterator<Item = (&'a str, &[&'a Message])> + '_ {
        self.branches
            .iter()
            .map(|(id, messages)| (*id, messages.as_slice()))
    }

    pub fn len(&self) -> usize {
        self.branches.len()
    }

    pub fn is_empty(&self) -> bool {
        self.branches.is_empty()
    }
}

impl MessageEngine {
    /// Fork a new branch at `message_id` and make it active.
    ///
    /// The store prefix up to and including the fork point is copied onto the
    /// new branch; the source messages are left untouched. The fork point is
    /// resolved on the active branch first. Returns `None` if the message does
    /// not exist.
    pub fn branch_conversation(&mut self, message_id: &str) -> Option<String> {
        let Some(index) = self.store.position(message_id, &self.active_branch_id) else {
            tracing::debug!(message_id, "MessageEngine: branch fork point not found");
            return None;
        };

        let branch_id = new_branch_id();
        let copies: Vec<Message> = self.store.as_slice()[..=index]
            .iter()
            .enumerate()
            .map(|(i, m)| m.fork_copy(&branch_id, i == index))
            .collect();

        for copy in &copies {
            self.store.push(copy.clone());
        }
        let previous_branch_id = std::mem::replace(&mut self.active_branch_id, branch_id.clone());

        tracing::info!(
            branch = %branch_id,
            fork_point = message_id,
            previous_branch = %previous_branch_id,
            copied = copies.len(),
            "MessageEngine: Forked branch"
        );

        self.log.record(Operation::new(OperationKind::Branch {
            branch_id: branch_id.clone(),
            fork_point_id: message_id.to_string(),
            previous_branch_id,
            copies,
        }));
        self.observer.on_branch(&branch_id, message_id);
        Some(branch_id)
    }

    /// Point the engine at another branch. Unknown branches are valid and empty.
    pub fn switch_to_branch(&mut self, branch_id: impl Into<String>) {
        let branch_id = branch_id.into();
        tracing::debug!(
            from = %self.active_branch_id,
            to = %branch_id,
            "MessageEngine: Switching branch"
        );
        self.active_branch_id = branch_id;
    }

    pub fn current_branch_id(&self) -> &str {
        &self.active_branch_id
    }

    /// Every branch present in the store with its messages.
    pub fn branches(&self) -> BranchIndex<'_> {
        BranchIndex::build(self.store.as_slice())
    }
}
