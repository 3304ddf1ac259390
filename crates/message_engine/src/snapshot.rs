//! EngineSnapshot - Serializable capture of a conversation
//!
//! Persistence is left to the embedding application; this only captures the
//! store and the active branch. History is not part of a snapshot.

use std::collections::HashSet;

use serde::{Deserialize, Serialize};

use message_core::{EngineConfig, EngineError, Message, Result};

use crate::engine::MessageEngine;

#[derive(Serialize, Deserialize, Clone, Debug, PartialEq, Eq)]
pub struct EngineSnapshot {
    /// Full cross-branch store in insertion order
    pub messages: Vec<Message>,
    pub active_branch_id: String,
}

impl EngineSnapshot {
    pub fn to_json(&self) -> Result<String> {
        Ok(serde_json::to_string(self)?)
    }

    pub fn to_json_pretty(&self) -> Result<String> {
        Ok(serde_json::to_string_pretty(self)?)
    }

    pub fn from_json(content: &str) -> Result<Self> {
        Ok(serde_json::from_str(content)?)
    }

    /// Reject snapshots holding two records with the same id on one branch.
    pub fn validate(&self) -> Result<()> {
        let mut seen = HashSet::new();
        for message in &self.messages {
            if !seen.insert((message.branch_id.as_str(), message.id.as_str())) {
                return Err(EngineError::InvalidConfig(format!(
                    "duplicate message id {:?} on branch {:?}",
                    message.id, message.branch_id
                )));
            }
        }
        Ok(())
    }
}

impl MessageEngine {
    pub fn snapshot(&self) -> EngineSnapshot {
        EngineSnapshot {
            messages: self.all_messages().to_vec(),
            active_branch_id: self.current_branch_id().to_string(),
        }
    }

    /// Rebuild an engine from a snapshot with empty history.
    ///
    /// Open edit sessions are closed; `config.initial_messages` is ignored.
    pub fn restore(snapshot: EngineSnapshot, config: EngineConfig) -> Result<Self> {
        config.validate()?;
        snapshot.validate()?;
        let messages: Vec<Message> = snapshot
            .messages
            .into_iter()
            .map(|mut message| {
                message.is_editing = false;
                message
            })
            .collect();

        tracing::info!(
            restored = messages.len(),
            active_branch = %snapshot.active_branch_id,
            "MessageEngine: Restored from snapshot"
        );

        Ok(Self::from_parts(
            messages,
            snapshot.active_branch_id,
            config.max_history_size,
        ))
    }
}
