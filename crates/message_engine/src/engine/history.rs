//! OperationLog - Bounded undo history with a companion redo stack
//!
//! New mutations invalidate the redo stack. When the history grows past its
//! bound the oldest entry is dropped for good.

use std::collections::VecDeque;

use message_core::Operation;

#[derive(Debug, Clone)]
pub(crate) struct OperationLog {
    /// Oldest first
    history: VecDeque<Operation>,
    /// Most recently undone last
    redo: Vec<Operation>,
    max_size: usize,
}

impl OperationLog {
    pub fn new(max_size: usize) -> Self {
        Self {
            history: VecDeque::with_capacity(max_size.min(64)),
            redo: Vec::new(),
            max_size: max_size.max(1),
        }
    }

    /// Log a fresh mutation and discard any undone future.
    pub fn record(&mut self, operation: Operation) {
        self.push_bounded(operation);
        if !self.redo.is_empty() {
            tracing::debug!(
                discarded = self.redo.len(),
                "OperationLog: Clearing redo stack"
            );
            self.redo.clear();
        }
    }

    /// Take the most recent operation for undo
    pub fn pop_undo(&mut self) -> Option<Operation> {
        self.history.pop_back()
    }

    pub fn push_redo(&mut self, operation: Operation) {
        self.redo.push(operation);
    }

    pub fn pop_redo(&mut self) -> Option<Operation> {
        self.redo.pop()
    }

    /// Put a redone operation back on the history without touching redo.
    pub fn push_redone(&mut self, operation: Operation) {
        self.push_bounded(operation);
    }

    fn push_bounded(&mut self, operation: Operation) {
        self.history.push_back(operation);
        while self.history.len() > self.max_size {
            if let Some(evicted) = self.history.pop_front() {
                tracing::debug!(
                    op_type = %evicted.op_type(),
                    message_id = %evicted.message_id(),
                    max_size = self.max_size,
                    "OperationLog: Evicting oldest operation"
                );
            }
        }
    }

    pub fn history(&self) -> &VecDeque<Operation> {
        &self.history
    }

    pub fn redo_stack(&self) -> &[Operation] {
        &self.redo
    }

    pub fn can_undo(&self) -> bool {
        !self.history.is_empty()
    }

    pub fn can_redo(&self) -> bool {
        !self.redo.is_empty()
    }

    pub fn max_size(&self) -> usize {
        self.max_size
    }

    pub fn clear(&mut self) {
        self.history.clear();
        self.redo.clear();
    }
}
