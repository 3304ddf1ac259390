//! Engine module - The conversation message-operations engine
//!
//! `MessageEngine` owns the message store, the active-branch pointer and the
//! operation log. Commands live in `commands`, branching in `branches`,
//! read-only views in `queries`.

mod branches;
mod commands;
mod history;
mod queries;
mod store;

pub use branches::BranchIndex;

use message_core::{EngineConfig, Message, Result, MAIN_BRANCH_ID};

use crate::observer::{MessageObserver, NoopObserver};
use history::OperationLog;
use store::MessageStore;

/// A single conversation's message timeline, branches and undo history.
pub struct MessageEngine {
    store: MessageStore,
    active_branch_id: String,
    log: OperationLog,
    observer: Box<dyn MessageObserver>,
}

impl Default for MessageEngine {
    fn default() -> Self {
        Self::new()
    }
}

impl std::fmt::Debug for MessageEngine {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("MessageEngine")
            .field("active_branch_id", &self.active_branch_id)
            .field("message_count", &self.store.len())
            .field("history_len", &self.log.history().len())
            .field("redo_len", &self.log.redo_stack().len())
            .field("max_history_size", &self.log.max_size())
            .finish()
    }
}

impl MessageEngine {
    /// Empty engine on `"main"` with the default history bound.
    pub fn new() -> Self {
        Self::from_parts(
            Vec::new(),
            MAIN_BRANCH_ID.to_string(),
            EngineConfig::default().max_history_size,
        )
    }

    /// Build an engine from configuration, seeding `initial_messages`.
    pub fn with_config(config: EngineConfig) -> Result<Self> {
        config.validate()?;
        let messages: Vec<Message> = config
            .initial_messages
            .into_iter()
            .map(|draft| Message::seed(draft, MAIN_BRANCH_ID))
            .collect();

        tracing::info!(
            seeded = messages.len(),
            max_history_size = config.max_history_size,
            "MessageEngine: Created from config"
        );

        Ok(Self::from_parts(
            messages,
            MAIN_BRANCH_ID.to_string(),
            config.max_history_size,
        ))
    }

    /// Attach the observer that receives edit/delete/regenerate/branch notifications.
    pub fn with_observer(mut self, observer: impl MessageObserver + 'static) -> Self {
        self.observer = Box::new(observer);
        self
    }

    pub(crate) fn from_parts(
        messages: Vec<Message>,
        active_branch_id: String,
        max_history_size: usize,
    ) -> Self {
        Self {
            store: MessageStore::from_messages(messages),
            active_branch_id,
            log: OperationLog::new(max_history_size),
            observer: Box::new(NoopObserver),
        }
    }

    /// Drop every message and all history, and return to `"main"`. Not undoable.
    pub fn clear(&mut self) {
        tracing::info!(
            dropped_messages = self.store.len(),
            dropped_operations = self.log.history().len(),
            "MessageEngine: Clearing"
        );
        self.store.clear();
        self.log.clear();
        self.active_branch_id = MAIN_BRANCH_ID.to_string();
    }

    pub fn max_history_size(&self) -> usize {
        self.log.max_size()
    }
}
