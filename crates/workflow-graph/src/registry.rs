//! Node type registry
//!
//! Maps node types to their definitions. The registry is built once when an
//! editing session opens and is read-only afterwards; the validator and the
//! palette only ever look things up in it.
//!
//! # Usage
//!
//! ```ignore
//! use workflow_graph::NodeRegistry;
//!
//! // Everything submitted through `inventory::submit!(DescriptorFn(..))`
//! let registry = NodeRegistry::with_builtins();
//! let def = registry.lookup_str("logic:condition");
//! ```

use std::collections::{BTreeMap, HashMap};

use crate::descriptor::{DescriptorFn, NodeDefinition};
use crate::types::{NodeCategory, NodeType};

/// Registry of node types and their definitions
///
/// # Composability
///
/// Registries can be composed by merging:
/// ```ignore
/// let mut registry = NodeRegistry::with_builtins();
/// registry.merge(workspace_registry); // Add workspace-specific nodes
/// ```
#[derive(Debug, Clone)]
pub struct NodeRegistry {
    definitions: HashMap<NodeType, NodeDefinition>,
}

impl NodeRegistry {
    /// Create a new empty registry
    pub fn new() -> Self {
        Self {
            definitions: HashMap::new(),
        }
    }

    /// Create a registry holding every built-in definition linked into the binary
    pub fn with_builtins() -> Self {
        let mut registry = Self::new();
        for descriptor in inventory::iter::<DescriptorFn> {
            registry.register((descriptor.0)());
        }
        log::debug!(
            "NodeRegistry: collected {} built-in node definitions",
            registry.len()
        );
        registry
    }

    /// Register a node definition, replacing any previous one for the same type
    pub fn register(&mut self, definition: NodeDefinition) {
        if let Some(previous) = self
            .definitions
            .insert(definition.node_type.clone(), definition)
        {
            log::debug!("NodeRegistry: replaced definition for '{}'", previous.node_type);
        }
    }

    /// Look up the definition for a node type
    pub fn lookup(&self, node_type: &NodeType) -> Option<&NodeDefinition> {
        self.definitions.get(node_type)
    }

    /// Look up the definition for a `category:subtype` string
    pub fn lookup_str(&self, node_type: &str) -> Option<&NodeDefinition> {
        self.lookup(&NodeType::parse(node_type))
    }

    /// Check if a node type is registered
    pub fn has_node_type(&self, node_type: &NodeType) -> bool {
        self.definitions.contains_key(node_type)
    }

    /// Get all registered definitions, sorted by type
    pub fn all_definitions(&self) -> Vec<&NodeDefinition> {
        let mut all: Vec<&NodeDefinition> = self.definitions.values().collect();
        all.sort_by_key(|d| d.node_type.to_string());
        all
    }

    /// Get definitions grouped by category, each group sorted by label
    pub fn definitions_by_category(&self) -> BTreeMap<NodeCategory, Vec<&NodeDefinition>> {
        let mut grouped: BTreeMap<NodeCategory, Vec<&NodeDefinition>> = BTreeMap::new();
        for def in self.definitions.values() {
            grouped.entry(def.category).or_default().push(def);
        }
        for group in grouped.values_mut() {
            group.sort_by(|a, b| a.label.cmp(&b.label));
        }
        grouped
    }

    /// List all registered node types
    pub fn node_types(&self) -> Vec<&NodeType> {
        self.definitions.keys().collect()
    }

    pub fn len(&self) -> usize {
        self.definitions.len()
    }

    pub fn is_empty(&self) -> bool {
        self.definitions.is_empty()
    }

    /// Merge another registry into this one
    ///
    /// Entries from `other` override entries in `self` if they share the same type.
    pub fn merge(&mut self, other: NodeRegistry) {
        self.definitions.extend(other.definitions);
    }
}

impl Default for NodeRegistry {
    fn default() -> Self {
        Self::new()
    }
}

impl FromIterator<NodeDefinition> for NodeRegistry {
    fn from_iter<I: IntoIterator<Item = NodeDefinition>>(iter: I) -> Self {
        let mut registry = Self::new();
        for definition in iter {
            registry.register(definition);
        }
        registry
    }
}
