//! Workflow Nodes
//!
//! The built-in node catalog of the dashboard's workflow editor. Each node
//! type is a unit struct that describes itself through `NodeDescriptor` and
//! is submitted to the registry at link time.
//!
//! # Categories
//!
//! - **Trigger**: Entry points (form submitted, lead created, schedule, ...)
//! - **Action**: CRM side effects (send email, create task, update lead, ...)
//! - **Logic**: Conditions and delays
//! - **AI**: Text generation, classification, summaries, extraction
//! - **Webhook**: Outbound HTTP calls

pub mod action;
pub mod ai;
pub mod logic;
pub mod trigger;
pub mod webhook;

// Re-export all node types for convenience
pub use action::*;
pub use ai::*;
pub use logic::*;
pub use trigger::*;
pub use webhook::*;

use workflow_graph::NodeRegistry;

/// Registry with the full built-in catalog
///
/// Prefer this over calling `NodeRegistry::with_builtins` directly from a
/// host crate: referencing this crate guarantees its submissions are linked.
pub fn builtin_registry() -> NodeRegistry {
    let registry = NodeRegistry::with_builtins();
    log::info!("Loaded {} built-in workflow node types", registry.len());
    registry
}
