use std::collections::HashSet;
use std::path::Path;

use serde::{Deserialize, Serialize};

use crate::error::{EngineError, Result};
use crate::ids::MAIN_BRANCH_ID;
use crate::message::MessageDraft;

/// Default bound on the undo history.
pub const DEFAULT_MAX_HISTORY_SIZE: usize = 50;

/// Environment variable overriding `max_history_size`.
pub const MAX_HISTORY_ENV: &str = "MESSAGE_ENGINE_MAX_HISTORY";

/// Construction-time settings for a message engine.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
#[serde(default)]
pub struct EngineConfig {
    /// Number of operations kept for undo before the oldest is dropped
    pub max_history_size: usize,
    /// Seed messages; missing ids, timestamps and branches are filled in
    pub initial_messages: Vec<MessageDraft>,
}

impl Default for EngineConfig {
    fn default() -> Self {
        Self {
            max_history_size: DEFAULT_MAX_HISTORY_SIZE,
            initial_messages: Vec::new(),
        }
    }
}

fn parse_history_size(value: &str) -> Option<usize> {
    match value.trim().parse::<usize>() {
        Ok(size) if size > 0 => Some(size),
        _ => None,
    }
}

impl EngineConfig {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_max_history_size(mut self, size: usize) -> Self {
        self.max_history_size = size;
        self
    }

    pub fn with_initial_messages(mut self, messages: Vec<MessageDraft>) -> Self {
        self.initial_messages = messages;
        self
    }

    pub fn from_toml_str(content: &str) -> Result<Self> {
        let config: EngineConfig = toml::from_str(content)?;
        config.validate()?;
        Ok(config)
    }

    pub fn from_json_str(content: &str) -> Result<Self> {
        let config: EngineConfig = serde_json::from_str(content)?;
        config.validate()?;
        Ok(config)
    }

    /// Load from a file; `.json` files are parsed as JSON, anything else as TOML.
    pub fn load(path: impl AsRef<Path>) -> Result<Self> {
        let path = path.as_ref();
        let content = std::fs::read_to_string(path)?;
        let is_json = path
            .extension()
            .and_then(|ext| ext.to_str())
            .is_some_and(|ext| ext.eq_ignore_ascii_case("json"));

        tracing::debug!(path = %path.display(), is_json, "EngineConfig: loading");

        if is_json {
            Self::from_json_str(&content)
        } else {
            Self::from_toml_str(&content)
        }
    }

    /// Apply `MESSAGE_ENGINE_MAX_HISTORY` when it holds a positive integer.
    pub fn with_env_overrides(self) -> Self {
        let value = std::env::var(MAX_HISTORY_ENV).ok();
        self.apply_history_override(value.as_deref())
    }

    fn apply_history_override(mut self, value: Option<&str>) -> Self {
        if let Some(raw) = value {
            match parse_history_size(raw) {
                Some(size) => self.max_history_size = size,
                None => tracing::warn!(
                    value = raw,
                    "EngineConfig: ignoring invalid {}",
                    MAX_HISTORY_ENV
                ),
            }
        }
        self
    }

    pub fn validate(&self) -> Result<()> {
        if self.max_history_size == 0 {
            return Err(EngineError::InvalidConfig(
                "max_history_size must be at least 1".to_string(),
            ));
        }

        // Explicit seed ids must be unique within their branch
        let mut seen = HashSet::new();
        for draft in &self.initial_messages {
            let Some(id) = draft.id.as_deref() else {
                continue;
            };
            let branch = draft.branch_id.as_deref().unwrap_or(MAIN_BRANCH_ID);
            if !seen.insert((branch, id)) {
                return Err(EngineError::InvalidConfig(format!(
                    "duplicate seed message id {id:?} on branch {branch:?}"
                )));
            }
        }
        Ok(())
    }
}
