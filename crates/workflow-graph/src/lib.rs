//! Workflow Graph - editing core for the dashboard's workflow builder
//!
//! This crate holds everything about a workflow graph that is independent of
//! the canvas and of persistence:
//!
//! - The node/edge model with typed node categories
//! - A registry of node definitions (label, category, configuration fields)
//! - Snapshot-based undo/redo for committed edits
//! - Validation that decides whether a workflow can be submitted
//!
//! # Architecture
//!
//! - `GraphState`: live graph for one editing session, with separate
//!   committed (undoable) and transient edit APIs
//! - `HistoryManager`: bounded undo stack of structural snapshots
//! - `validate`: pure function producing `Diagnostic`s, never errors
//!
//! # Example
//!
//! ```ignore
//! use workflow_graph::{EditorConfig, GraphState, Node, Edge, NodeRegistry};
//!
//! let registry = NodeRegistry::with_builtins();
//! let mut state = GraphState::new(&EditorConfig::default());
//! state.add_node(Node::new("start", "trigger:form_submitted"))?;
//! state.add_node(Node::new("notify", "action:send_email"))?;
//! state.connect(Edge::between("start", "notify"))?;
//!
//! let result = state.validate(&registry);
//! state.undo();
//! ```

pub mod builder;
pub mod config;
pub mod descriptor;
pub mod error;
pub mod history;
pub mod registry;
pub mod state;
pub mod stats;
pub mod types;
pub mod validation;

// Re-export key types
pub use builder::WorkflowBuilder;
pub use config::{EditorConfig, HistoryConfig, DEFAULT_HISTORY_CAPACITY};
pub use descriptor::{ConfigField, DescriptorFn, NodeDefinition, NodeDescriptor};
pub use error::{GraphError, Result};
pub use history::{GraphSnapshot, HistoryEntry, HistoryInfo, HistoryManager};
pub use registry::NodeRegistry;
pub use state::{GraphState, TransientEdit, RESET_ACTION};
pub use stats::{workflow_stats, WorkflowStats};
pub use types::{
    Branch, Edge, EdgeId, Node, NodeCategory, NodeConfig, NodeId, NodeType, Position,
    WorkflowSnapshot,
};
pub use validation::{validate, Diagnostic, DiagnosticCode, Severity, ValidationResult};

