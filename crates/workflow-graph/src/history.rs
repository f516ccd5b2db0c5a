//! Undo/redo history using structural snapshots
//!
//! Each tracked edit records the pre-edit `(nodes, edges)` pair. The pair is
//! held as `Arc<[T]>`, and edits always build fresh collections instead of
//! mutating in place, so recording a snapshot only bumps two reference counts.
//!
//! The undo stack is bounded (oldest entries are evicted first). The redo
//! stack is unbounded but is cleared by every new recorded edit.

use std::collections::VecDeque;
use std::sync::Arc;

use chrono::{DateTime, Utc};
use serde::Serialize;

use crate::config::HistoryConfig;
use crate::types::{Edge, Node, WorkflowSnapshot};

/// Immutable `(nodes, edges)` pair shared between the live state and history
#[derive(Debug, Clone, PartialEq)]
pub struct GraphSnapshot {
    pub nodes: Arc<[Node]>,
    pub edges: Arc<[Edge]>,
}

impl GraphSnapshot {
    pub fn new(nodes: Vec<Node>, edges: Vec<Edge>) -> Self {
        Self {
            nodes: nodes.into(),
            edges: edges.into(),
        }
    }

    pub fn empty() -> Self {
        Self::new(Vec::new(), Vec::new())
    }

    /// Check whether two snapshots share the same allocations
    pub fn ptr_eq(&self, other: &GraphSnapshot) -> bool {
        Arc::ptr_eq(&self.nodes, &other.nodes) && Arc::ptr_eq(&self.edges, &other.edges)
    }

    /// Convert into the persisted shape
    pub fn to_workflow_snapshot(&self, viewport: serde_json::Value) -> WorkflowSnapshot {
        WorkflowSnapshot {
            nodes: self.nodes.to_vec(),
            edges: self.edges.to_vec(),
            viewport,
        }
    }
}

impl Default for GraphSnapshot {
    fn default() -> Self {
        Self::empty()
    }
}

/// One recorded step of history
#[derive(Debug, Clone)]
pub struct HistoryEntry {
    /// Graph state to return to
    pub snapshot: GraphSnapshot,
    /// When the entry was recorded
    pub timestamp: DateTime<Utc>,
    /// Label shown in the UI ("Undo: delete node")
    pub action_label: Option<String>,
}

impl HistoryEntry {
    fn new(snapshot: GraphSnapshot, action_label: Option<String>) -> Self {
        Self {
            snapshot,
            timestamp: Utc::now(),
            action_label,
        }
    }
}

/// Read-only summary of the history stacks for the toolbar
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct HistoryInfo {
    pub undo_count: usize,
    pub redo_count: usize,
    /// Label of the edit the next undo reverts
    pub last_action: Option<String>,
    /// Label of the edit the next redo reapplies
    pub next_redo_action: Option<String>,
}

/// Bounded undo stack plus redo stack
#[derive(Debug)]
pub struct HistoryManager {
    /// Oldest entry at the front
    undo: VecDeque<HistoryEntry>,
    /// Most recently undone entry at the back
    redo: Vec<HistoryEntry>,
    capacity: usize,
}

impl HistoryManager {
    /// Create a history with the configured capacity (at least 1)
    pub fn new(config: &HistoryConfig) -> Self {
        Self {
            undo: VecDeque::new(),
            redo: Vec::new(),
            capacity: config.capacity.max(1),
        }
    }

    /// Record the state that existed before a tracked edit
    ///
    /// This discards any redo history.
    pub fn record(&mut self, before: GraphSnapshot, action_label: Option<String>) {
        if !self.redo.is_empty() {
            log::debug!("History: discarding {} redo entries", self.redo.len());
            self.redo.clear();
        }
        self.push_undo(HistoryEntry::new(before, action_label));
    }

    /// Step back: returns the state to restore, or None if there is nothing to undo
    ///
    /// `current` is kept on the redo stack under the same label.
    pub fn undo(&mut self, current: GraphSnapshot) -> Option<GraphSnapshot> {
        let entry = self.undo.pop_back()?;
        self.redo
            .push(HistoryEntry::new(current, entry.action_label.clone()));
        Some(entry.snapshot)
    }

    /// Step forward: returns the state to restore, or None if there is nothing to redo
    pub fn redo(&mut self, current: GraphSnapshot) -> Option<GraphSnapshot> {
        let entry = self.redo.pop()?;
        self.push_undo(HistoryEntry::new(current, entry.action_label.clone()));
        Some(entry.snapshot)
    }

    /// Check if undo is available
    pub fn can_undo(&self) -> bool {
        !self.undo.is_empty()
    }

    /// Check if redo is available
    pub fn can_redo(&self) -> bool {
        !self.redo.is_empty()
    }

    pub fn info(&self) -> HistoryInfo {
        HistoryInfo {
            undo_count: self.undo.len(),
            redo_count: self.redo.len(),
            last_action: self.undo.back().and_then(|e| e.action_label.clone()),
            next_redo_action: self.redo.last().and_then(|e| e.action_label.clone()),
        }
    }

    /// Most recent undo entry
    pub fn last_entry(&self) -> Option<&HistoryEntry> {
        self.undo.back()
    }

    pub fn capacity(&self) -> usize {
        self.capacity
    }

    /// Empty both stacks
    pub fn clear(&mut self) {
        self.undo.clear();
        self.redo.clear();
    }

    fn push_undo(&mut self, entry: HistoryEntry) {
        self.undo.push_back(entry);
        while self.undo.len() > self.capacity {
            if let Some(evicted) = self.undo.pop_front() {
                log::debug!(
                    "History: evicted oldest entry {:?} (capacity {})",
                    evicted.action_label,
                    self.capacity
                );
            }
        }
    }
}

impl Default for HistoryManager {
    fn default() -> Self {
        Self::new(&HistoryConfig::default())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn make_snapshot(id: &str) -> GraphSnapshot {
        GraphSnapshot::new(vec![Node::new(id, "action:create_task")], Vec::new())
    }

    fn first_id(snapshot: &GraphSnapshot) -> &str {
        &snapshot.nodes[0].id
    }

    #[test]
    fn test_record_and_undo() {
        let mut history = HistoryManager::default();

        history.record(make_snapshot("first"), Some("add node".to_string()));
        history.record(make_snapshot("second"), Some("connect".to_string()));

        let restored = history.undo(make_snapshot("third")).unwrap();
        assert_eq!(first_id(&restored), "second");

        let restored = history.undo(restored).unwrap();
        assert_eq!(first_id(&restored), "first");

        assert!(history.undo(restored).is_none());
    }

    #[test]
    fn test_redo() {
        let mut history = HistoryManager::default();
        history.record(make_snapshot("first"), None);

        let undone = history.undo(make_snapshot("second")).unwrap();
        assert_eq!(first_id(&undone), "first");

        let redone = history.redo(undone).unwrap();
        assert_eq!(first_id(&redone), "second");

        assert!(history.redo(redone).is_none());
    }

    #[test]
    fn test_record_truncates_redo() {
        let mut history = HistoryManager::default();
        history.record(make_snapshot("first"), None);
        let undone = history.undo(make_snapshot("second")).unwrap();
        assert!(history.can_redo());

        history.record(undone, None);
        assert!(!history.can_redo());
    }

    #[test]
    fn test_capacity_evicts_oldest() {
        let mut history = HistoryManager::new(&HistoryConfig::with_capacity(3));

        for i in 0..5 {
            history.record(make_snapshot(&format!("graph_{}", i)), None);
        }
        assert_eq!(history.info().undo_count, 3);

        let mut current = make_snapshot("graph_5");
        let mut seen = Vec::new();
        while let Some(previous) = history.undo(current.clone()) {
            seen.push(first_id(&previous).to_string());
            current = previous;
        }
        assert_eq!(seen, vec!["graph_4", "graph_3", "graph_2"]);
    }

    #[test]
    fn test_redo_onto_full_stack_evicts_oldest() {
        let mut history = HistoryManager::new(&HistoryConfig::with_capacity(2));
        history.record(make_snapshot("graph_0"), None);
        history.record(make_snapshot("graph_1"), None);
        history.record(make_snapshot("graph_2"), None);

        let undone = history.undo(make_snapshot("graph_3")).unwrap();
        let redone = history.redo(undone).unwrap();
        assert_eq!(first_id(&redone), "graph_3");
        assert_eq!(history.info().undo_count, 2);

        let mut current = redone;
        let mut seen = Vec::new();
        while let Some(previous) = history.undo(current.clone()) {
            seen.push(first_id(&previous).to_string());
            current = previous;
        }
        assert_eq!(seen, vec!["graph_2", "graph_1"]);
    }

    #[test]
    fn test_zero_capacity_is_clamped() {
        let mut history = HistoryManager::new(&HistoryConfig::with_capacity(0));
        assert_eq!(history.capacity(), 1);
        history.record(make_snapshot("a"), None);
        history.record(make_snapshot("b"), None);
        assert_eq!(history.info().undo_count, 1);
    }

    #[test]
    fn test_info_labels() {
        let mut history = HistoryManager::default();
        assert_eq!(
            history.info(),
            HistoryInfo {
                undo_count: 0,
                redo_count: 0,
                last_action: None,
                next_redo_action: None,
            }
        );

        history.record(make_snapshot("a"), Some("add node".to_string()));
        history.record(make_snapshot("b"), Some("delete node".to_string()));
        assert_eq!(history.info().last_action.as_deref(), Some("delete node"));
        assert!(history.last_entry().unwrap().timestamp <= Utc::now());

        history.undo(make_snapshot("c"));
        let info = history.info();
        assert_eq!(info.undo_count, 1);
        assert_eq!(info.redo_count, 1);
        assert_eq!(info.last_action.as_deref(), Some("add node"));
        assert_eq!(info.next_redo_action.as_deref(), Some("delete node"));
    }

    #[test]
    fn test_clear() {
        let mut history = HistoryManager::default();
        history.record(make_snapshot("a"), None);
        history.undo(make_snapshot("b"));
        history.record(make_snapshot("c"), None);

        history.clear();
        assert!(!history.can_undo());
        assert!(!history.can_redo());
    }

    #[test]
    fn test_snapshot_clone_shares_allocation() {
        let snapshot = make_snapshot("a");
        let copy = snapshot.clone();
        assert!(snapshot.ptr_eq(&copy));
        assert!(!snapshot.ptr_eq(&make_snapshot("a")));
    }
}
