//! Graph state for one editing session
//!
//! `GraphState` owns the live `(nodes, edges)` pair and its history. There
//! are two ways to change it, and they are deliberately separate APIs:
//!
//! - **Committed edits** (`update_nodes`, `update_edges`, `update_state` and
//!   the helpers built on them) record the pre-edit snapshot, clear redo and
//!   then apply the transform. Exactly one history entry per call.
//! - **Transient edits** go through [`GraphState::transient`] and never touch
//!   history. They are meant for in-progress interaction such as a node being
//!   dragged, or for host-side markers like `hasErrors`.
//!
//! A transient drag keeps the graph as it was before the drag started. The
//! next committed edit records that state, so committing the drop with
//! [`GraphState::move_node`] undoes back to where the node was picked up.
//!
//! Transforms receive the current collection by reference and return a new
//! one; the previous collection stays shared with the history entry.

use crate::config::EditorConfig;
use crate::error::{GraphError, Result};
use crate::history::{GraphSnapshot, HistoryInfo, HistoryManager};
use crate::registry::NodeRegistry;
use crate::stats::{workflow_stats, WorkflowStats};
use crate::types::{Edge, Node, NodeConfig, NodeId, Position, WorkflowSnapshot};
use crate::validation::{validate, ValidationResult};

/// Label recorded by [`GraphState::reset`]
pub const RESET_ACTION: &str = "reset";

/// Live graph plus undo/redo history for one editing session
#[derive(Debug)]
pub struct GraphState {
    current: GraphSnapshot,
    history: HistoryManager,
    /// State before an uncommitted drag, recorded by the next commit
    drag_origin: Option<GraphSnapshot>,
}

impl GraphState {
    /// Create an empty graph
    pub fn new(config: &EditorConfig) -> Self {
        Self::with_graph(Vec::new(), Vec::new(), config)
    }

    /// Create a graph with initial contents and empty history
    pub fn with_graph(nodes: Vec<Node>, edges: Vec<Edge>, config: &EditorConfig) -> Self {
        Self {
            current: GraphSnapshot::new(nodes, edges),
            history: HistoryManager::new(&config.history),
            drag_origin: None,
        }
    }

    /// Open a session from a persisted snapshot
    ///
    /// The viewport is not part of the graph; keep it on the host side and
    /// hand it back to [`GraphState::to_snapshot`] when saving.
    pub fn from_snapshot(snapshot: WorkflowSnapshot, config: &EditorConfig) -> Self {
        log::debug!(
            "GraphState: opening session with {} nodes and {} edges",
            snapshot.nodes.len(),
            snapshot.edges.len()
        );
        Self::with_graph(snapshot.nodes, snapshot.edges, config)
    }

    /// Produce the persisted shape of the current graph
    pub fn to_snapshot(&self, viewport: serde_json::Value) -> WorkflowSnapshot {
        self.current.to_workflow_snapshot(viewport)
    }

    pub fn nodes(&self) -> &[Node] {
        &self.current.nodes
    }

    pub fn edges(&self) -> &[Edge] {
        &self.current.edges
    }

    /// Cheap copy of the current state
    pub fn snapshot(&self) -> GraphSnapshot {
        self.current.clone()
    }

    /// Find a node by ID
    pub fn find_node(&self, id: &str) -> Option<&Node> {
        self.current.nodes.iter().find(|n| n.id == id)
    }

    /// Find an edge by ID
    pub fn find_edge(&self, id: &str) -> Option<&Edge> {
        self.current.edges.iter().find(|e| e.id == id)
    }

    /// Get edges coming into a node
    pub fn incoming_edges<'a>(&'a self, node_id: &'a str) -> impl Iterator<Item = &'a Edge> + 'a {
        self.current.edges.iter().filter(move |e| e.target == node_id)
    }

    /// Get edges going out of a node
    pub fn outgoing_edges<'a>(&'a self, node_id: &'a str) -> impl Iterator<Item = &'a Edge> + 'a {
        self.current.edges.iter().filter(move |e| e.source == node_id)
    }

    // ------------------------------------------------------------------
    // Untracked
    // ------------------------------------------------------------------

    /// Start a transient edit that bypasses history
    pub fn transient(&mut self) -> TransientEdit<'_> {
        TransientEdit {
            current: &mut self.current,
            drag_origin: &mut self.drag_origin,
        }
    }

    // ------------------------------------------------------------------
    // Tracked
    // ------------------------------------------------------------------

    /// Replace the nodes with `transform(current)` and record one history entry
    pub fn update_nodes<F>(&mut self, transform: F, action_label: Option<&str>)
    where
        F: FnOnce(&[Node]) -> Vec<Node>,
    {
        let next = GraphSnapshot {
            nodes: transform(&self.current.nodes).into(),
            edges: self.current.edges.clone(),
        };
        self.commit(next, action_label);
    }

    /// Replace the edges with `transform(current)` and record one history entry
    pub fn update_edges<F>(&mut self, transform: F, action_label: Option<&str>)
    where
        F: FnOnce(&[Edge]) -> Vec<Edge>,
    {
        let next = GraphSnapshot {
            nodes: self.current.nodes.clone(),
            edges: transform(&self.current.edges).into(),
        };
        self.commit(next, action_label);
    }

    /// Replace nodes and edges together as a single history entry
    pub fn update_state<N, E>(&mut self, nodes_fn: N, edges_fn: E, action_label: Option<&str>)
    where
        N: FnOnce(&[Node]) -> Vec<Node>,
        E: FnOnce(&[Edge]) -> Vec<Edge>,
    {
        let next = GraphSnapshot {
            nodes: nodes_fn(&self.current.nodes).into(),
            edges: edges_fn(&self.current.edges).into(),
        };
        self.commit(next, action_label);
    }

    fn commit(&mut self, next: GraphSnapshot, action_label: Option<&str>) {
        log::debug!(
            "GraphState: commit {:?} ({} nodes, {} edges)",
            action_label,
            next.nodes.len(),
            next.edges.len()
        );
        let replaced = std::mem::replace(&mut self.current, next);
        let before = self.drag_origin.take().unwrap_or(replaced);
        self.history.record(before, action_label.map(str::to_string));
    }

    /// Undo the most recent committed edit. Returns false if there is none.
    pub fn undo(&mut self) -> bool {
        self.drag_origin = None;
        match self.history.undo(self.current.clone()) {
            Some(previous) => {
                self.current = previous;
                log::debug!("GraphState: undo ({:?})", self.history.info().next_redo_action);
                true
            }
            None => false,
        }
    }

    /// Reapply the most recently undone edit. Returns false if there is none.
    pub fn redo(&mut self) -> bool {
        self.drag_origin = None;
        match self.history.redo(self.current.clone()) {
            Some(next) => {
                self.current = next;
                log::debug!("GraphState: redo ({:?})", self.history.info().last_action);
                true
            }
            None => false,
        }
    }

    /// Check if undo is available
    pub fn can_undo(&self) -> bool {
        self.history.can_undo()
    }

    /// Check if redo is available
    pub fn can_redo(&self) -> bool {
        self.history.can_redo()
    }

    pub fn history_info(&self) -> HistoryInfo {
        self.history.info()
    }

    /// Drop all history, keeping the current graph
    pub fn clear_history(&mut self) {
        log::info!("GraphState: clearing history");
        self.drag_origin = None;
        self.history.clear();
    }

    /// Replace the graph, keeping the previous one as an undoable checkpoint
    pub fn reset(&mut self, nodes: Vec<Node>, edges: Vec<Edge>) {
        log::info!(
            "GraphState: reset to {} nodes and {} edges",
            nodes.len(),
            edges.len()
        );
        self.commit(GraphSnapshot::new(nodes, edges), Some(RESET_ACTION));
    }

    // ------------------------------------------------------------------
    // Committed editor actions
    // ------------------------------------------------------------------

    /// Add a node. Fails without recording history if the id is taken.
    pub fn add_node(&mut self, node: Node) -> Result<()> {
        if self.find_node(&node.id).is_some() {
            log::warn!("GraphState: refusing to add duplicate node '{}'", node.id);
            return Err(GraphError::DuplicateNodeId(node.id));
        }
        self.update_nodes(
            move |nodes| {
                let mut next = nodes.to_vec();
                next.push(node);
                next
            },
            Some("add node"),
        );
        Ok(())
    }

    /// Delete a node together with every edge attached to it
    pub fn remove_node(&mut self, id: &str) -> Result<()> {
        if self.find_node(id).is_none() {
            return Err(GraphError::NodeNotFound(id.to_string()));
        }
        self.remove_nodes(&[id]);
        Ok(())
    }

    /// Delete several nodes and their edges as one history entry
    ///
    /// Ids that do not exist are ignored. Returns the number of nodes removed;
    /// nothing is recorded when that is zero.
    pub fn remove_nodes(&mut self, ids: &[&str]) -> usize {
        let removed = self
            .current
            .nodes
            .iter()
            .filter(|n| ids.contains(&n.id.as_str()))
            .count();
        if removed == 0 {
            return 0;
        }

        let label = if removed == 1 { "delete node" } else { "delete nodes" };
        self.update_state(
            |nodes| {
                nodes
                    .iter()
                    .filter(|n| !ids.contains(&n.id.as_str()))
                    .cloned()
                    .collect()
            },
            |edges| {
                edges
                    .iter()
                    .filter(|e| !ids.contains(&e.source.as_str()) && !ids.contains(&e.target.as_str()))
                    .cloned()
                    .collect()
            },
            Some(label),
        );
        removed
    }

    /// Add an edge. Endpoints are not checked here; validation reports dangling edges.
    pub fn connect(&mut self, edge: Edge) -> Result<()> {
        if self.find_edge(&edge.id).is_some() {
            log::warn!("GraphState: refusing to add duplicate edge '{}'", edge.id);
            return Err(GraphError::DuplicateEdgeId(edge.id));
        }
        self.update_edges(
            move |edges| {
                let mut next = edges.to_vec();
                next.push(edge);
                next
            },
            Some("connect"),
        );
        Ok(())
    }

    /// Delete an edge
    pub fn remove_edge(&mut self, id: &str) -> Result<()> {
        if self.find_edge(id).is_none() {
            return Err(GraphError::EdgeNotFound(id.to_string()));
        }
        self.update_edges(
            |edges| edges.iter().filter(|e| e.id != id).cloned().collect(),
            Some("delete edge"),
        );
        Ok(())
    }

    /// Point an existing edge at new endpoints, keeping its id and branch
    pub fn reconnect_edge(
        &mut self,
        id: &str,
        source: impl Into<NodeId>,
        target: impl Into<NodeId>,
    ) -> Result<()> {
        if self.find_edge(id).is_none() {
            return Err(GraphError::EdgeNotFound(id.to_string()));
        }
        let (source, target) = (source.into(), target.into());
        self.update_edges(
            move |edges| {
                edges
                    .iter()
                    .map(|e| {
                        if e.id == id {
                            Edge {
                                source: source.clone(),
                                target: target.clone(),
                                ..e.clone()
                            }
                        } else {
                            e.clone()
                        }
                    })
                    .collect()
            },
            Some("reconnect edge"),
        );
        Ok(())
    }

    /// Store the settings-panel values for a node and mark it configured
    pub fn configure_node(&mut self, id: &str, config: NodeConfig) -> Result<()> {
        self.map_node(id, "configure node", move |node| {
            node.config = config;
            node.is_configured = true;
        })
    }

    /// Commit a node's final position (e.g. on drag end)
    ///
    /// After a transient drag, the recorded entry holds the position the drag
    /// started from.
    pub fn move_node(&mut self, id: &str, position: Position) -> Result<()> {
        self.map_node(id, "move node", move |node| node.position = position)
    }

    fn map_node<F>(&mut self, id: &str, action_label: &str, edit: F) -> Result<()>
    where
        F: FnOnce(&mut Node),
    {
        let index = self
            .current
            .nodes
            .iter()
            .position(|n| n.id == id)
            .ok_or_else(|| GraphError::NodeNotFound(id.to_string()))?;
        self.update_nodes(
            move |nodes| {
                let mut next = nodes.to_vec();
                edit(&mut next[index]);
                next
            },
            Some(action_label),
        );
        Ok(())
    }

    // ------------------------------------------------------------------
    // Read-only views
    // ------------------------------------------------------------------

    /// Validate the current graph
    pub fn validate(&self, registry: &NodeRegistry) -> ValidationResult {
        validate(self.nodes(), self.edges(), registry)
    }

    pub fn stats(&self) -> WorkflowStats {
        workflow_stats(self.nodes(), self.edges())
    }
}

impl Default for GraphState {
    fn default() -> Self {
        Self::new(&EditorConfig::default())
    }
}

/// Handle for edits that do not enter history
///
/// Obtained from [`GraphState::transient`]. Nothing done through this handle
/// can be undone; use the committed API for user edits.
pub struct TransientEdit<'a> {
    current: &'a mut GraphSnapshot,
    drag_origin: &'a mut Option<GraphSnapshot>,
}

impl TransientEdit<'_> {
    /// Replace the nodes with `transform(current)`
    pub fn set_nodes<F>(&mut self, transform: F) -> &mut Self
    where
        F: FnOnce(&[Node]) -> Vec<Node>,
    {
        self.current.nodes = transform(&self.current.nodes).into();
        self
    }

    /// Replace the edges with `transform(current)`
    pub fn set_edges<F>(&mut self, transform: F) -> &mut Self
    where
        F: FnOnce(&[Edge]) -> Vec<Edge>,
    {
        self.current.edges = transform(&self.current.edges).into();
        self
    }

    /// Move a node while it is being dragged. Unknown ids are ignored.
    ///
    /// The first move of a drag remembers the graph as it was, for the next
    /// committed edit to record.
    pub fn move_node(&mut self, id: &str, position: Position) -> &mut Self {
        if self.drag_origin.is_none() {
            *self.drag_origin = Some(self.current.clone());
        }
        self.set_nodes(|nodes| {
            nodes
                .iter()
                .map(|n| {
                    if n.id == id {
                        Node {
                            position,
                            ..n.clone()
                        }
                    } else {
                        n.clone()
                    }
                })
                .collect()
        })
    }

    /// Set each node's `hasErrors` flag from a validation result
    pub fn mark_errors(&mut self, result: &ValidationResult) -> &mut Self {
        self.set_nodes(|nodes| {
            nodes
                .iter()
                .map(|n| Node {
                    has_errors: result.has_errors_for(&n.id),
                    ..n.clone()
                })
                .collect()
        })
    }
}
