//! Fluent builder for workflow graphs
//!
//! Provides a compact way to construct graphs programmatically, mostly for
//! templates and tests.

use crate::types::{Branch, Edge, EdgeId, Node, NodeId, NodeType, Position, WorkflowSnapshot};

/// Fluent builder for constructing workflow graphs
///
/// # Example
///
/// ```ignore
/// let graph = WorkflowBuilder::new()
///     .add_node("start", "trigger:form_submitted")
///     .add_node("check", "logic:condition")
///     .with_value("expression", serde_json::json!("lead.score > 50"))
///     .configured()
///     .add_edge("start", "check")
///     .build();
/// ```
#[derive(Debug, Default)]
pub struct WorkflowBuilder {
    nodes: Vec<Node>,
    edges: Vec<Edge>,
    viewport: serde_json::Value,
    edge_counter: usize,
}

impl WorkflowBuilder {
    /// Create a new workflow builder
    pub fn new() -> Self {
        Self::default()
    }

    /// Add a node to the graph
    pub fn add_node(mut self, id: impl Into<NodeId>, node_type: impl Into<NodeType>) -> Self {
        self.nodes.push(Node::new(id, node_type));
        self
    }

    /// Set the position of the most recently added node
    pub fn at(mut self, x: f64, y: f64) -> Self {
        if let Some(node) = self.nodes.last_mut() {
            node.position = Position::new(x, y);
        }
        self
    }

    /// Set a config value on the most recently added node
    ///
    /// Must be called immediately after `add_node`.
    pub fn with_value(mut self, field: impl Into<String>, value: serde_json::Value) -> Self {
        if let Some(node) = self.nodes.last_mut() {
            node.config.insert(field.into(), value);
        }
        self
    }

    /// Mark the most recently added node as configured
    pub fn configured(mut self) -> Self {
        if let Some(node) = self.nodes.last_mut() {
            node.is_configured = true;
        }
        self
    }

    /// Add an edge between two nodes
    ///
    /// The generated id is the first free `edge-N`, skipping ids already
    /// taken by `add_edge_with_id`.
    pub fn add_edge(self, source: impl Into<NodeId>, target: impl Into<NodeId>) -> Self {
        self.push_edge(None, source.into(), target.into(), None)
    }

    /// Add an edge with an explicit ID
    ///
    /// The id is not checked against edges added earlier.
    pub fn add_edge_with_id(
        self,
        edge_id: impl Into<EdgeId>,
        source: impl Into<NodeId>,
        target: impl Into<NodeId>,
    ) -> Self {
        self.push_edge(Some(edge_id.into()), source.into(), target.into(), None)
    }

    /// Add a branch-tagged edge out of a condition node
    pub fn add_branch(
        self,
        source: impl Into<NodeId>,
        target: impl Into<NodeId>,
        branch: Branch,
    ) -> Self {
        self.push_edge(None, source.into(), target.into(), Some(branch))
    }

    pub fn with_viewport(mut self, viewport: serde_json::Value) -> Self {
        self.viewport = viewport;
        self
    }

    fn push_edge(
        mut self,
        edge_id: Option<EdgeId>,
        source: NodeId,
        target: NodeId,
        branch: Option<Branch>,
    ) -> Self {
        let id = match edge_id {
            Some(id) => id,
            None => self.next_edge_id(),
        };
        self.edges.push(Edge {
            id,
            source,
            target,
            branch,
        });
        self
    }

    fn next_edge_id(&mut self) -> EdgeId {
        loop {
            self.edge_counter += 1;
            let id = format!("edge-{}", self.edge_counter);
            if !self.edges.iter().any(|e| e.id == id) {
                return id;
            }
        }
    }

    /// Build the graph without validation
    pub fn build(self) -> WorkflowSnapshot {
        WorkflowSnapshot {
            nodes: self.nodes,
            edges: self.edges,
            viewport: self.viewport,
        }
    }
}
