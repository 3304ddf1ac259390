//! message_core - Core types for the conversation message-operations engine
//!
//! This crate provides the foundational types shared by the engine and the
//! applications embedding it:
//! - `ids` - opaque message and branch identifiers
//! - `message` - Message records, roles and drafts
//! - `operation` - reversible operation records for the undo/redo log
//! - `config` - engine configuration loading
//! - `error` - errors raised by fallible (non-lookup) operations

pub mod config;
pub mod error;
pub mod ids;
pub mod message;
pub mod operation;

// Re-export commonly used types
pub use config::{EngineConfig, DEFAULT_MAX_HISTORY_SIZE, MAX_HISTORY_ENV};
pub use error::{EngineError, Result};
pub use ids::{new_branch_id, new_message_id, now_millis, MAIN_BRANCH_ID};
pub use message::{Message, MessageDraft, Role};
pub use operation::{Operation, OperationKind, OperationType};
