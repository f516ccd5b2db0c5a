//! Error types for the workflow graph core
//!
//! Validation findings are never errors; they are reported as
//! [`Diagnostic`](crate::validation::Diagnostic) values. This enum only covers
//! the ambient operations that can fail: snapshot (de)serialization, config
//! loading and committed edits that address a node or edge that is not there.

use thiserror::Error;

/// Result type alias using GraphError
pub type Result<T> = std::result::Result<T, GraphError>;

/// Errors that can occur in the graph core
#[derive(Debug, Error)]
pub enum GraphError {
    /// A node with this id already exists in the graph
    #[error("Duplicate node id: {0}")]
    DuplicateNodeId(String),

    /// An edge with this id already exists in the graph
    #[error("Duplicate edge id: {0}")]
    DuplicateEdgeId(String),

    /// No node with this id exists in the graph
    #[error("Node not found: {0}")]
    NodeNotFound(String),

    /// No edge with this id exists in the graph
    #[error("Edge not found: {0}")]
    EdgeNotFound(String),

    /// Invalid editor configuration
    #[error("Invalid configuration: {0}")]
    Config(String),

    /// Serialization error
    #[error("Serialization error: {0}")]
    Serialization(#[from] serde_json::Error),

    /// I/O error
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),
}

impl GraphError {
    /// Create a configuration error with a message
    pub fn config(msg: impl Into<String>) -> Self {
        Self::Config(msg.into())
    }
}
