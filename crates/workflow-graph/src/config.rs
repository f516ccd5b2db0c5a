//! Editor configuration
//!
//! Hosts usually keep this next to their other settings as JSON:
//!
//! ```json
//! { "history": { "capacity": 50 } }
//! ```
//!
//! Every field has a default, so an empty object is a valid config.

use std::path::Path;

use serde::{Deserialize, Serialize};

use crate::error::{GraphError, Result};

/// Default number of undo steps kept per editing session
pub const DEFAULT_HISTORY_CAPACITY: usize = 50;

/// Undo/redo history settings
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct HistoryConfig {
    /// Maximum number of undo entries; the oldest is evicted first
    #[serde(default = "default_history_capacity")]
    pub capacity: usize,
}

fn default_history_capacity() -> usize {
    DEFAULT_HISTORY_CAPACITY
}

impl Default for HistoryConfig {
    fn default() -> Self {
        Self {
            capacity: default_history_capacity(),
        }
    }
}

impl HistoryConfig {
    pub fn with_capacity(capacity: usize) -> Self {
        Self { capacity }
    }
}

/// Configuration for one editing session
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct EditorConfig {
    #[serde(default)]
    pub history: HistoryConfig,
}

impl EditorConfig {
    /// Parse a config from JSON
    pub fn from_json_str(json: &str) -> Result<Self> {
        let config: EditorConfig = serde_json::from_str(json)?;
        config.validate()?;
        Ok(config)
    }

    /// Load a config file
    pub fn load(path: impl AsRef<Path>) -> Result<Self> {
        let path = path.as_ref();
        let json = std::fs::read_to_string(path)?;
        let config = Self::from_json_str(&json)?;
        log::debug!("Loaded editor config from {:?}: {:?}", path, config);
        Ok(config)
    }

    fn validate(&self) -> Result<()> {
        if self.history.capacity == 0 {
            return Err(GraphError::config("history.capacity must be at least 1"));
        }
        Ok(())
    }
}
