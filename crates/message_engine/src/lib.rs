//! message_engine - Conversation message-operations engine
//!
//! Tracks a user-editable message timeline with edit versioning,
//! conversation branching and a bounded undo/redo log. Each
//! `MessageEngine` owns its state outright; run one per conversation.

pub mod engine;
pub mod observer;
pub mod snapshot;

// Re-export commonly used types
pub use engine::{BranchIndex, MessageEngine};
pub use message_core::{
    EngineConfig, EngineError, Message, MessageDraft, Operation, OperationKind, OperationType,
    Result, Role, MAIN_BRANCH_ID,
};
pub use observer::{Callbacks, MessageObserver, NoopObserver};
pub use snapshot::EngineSnapshot;
