//! Node counts for the editor's summary panel

use std::collections::BTreeMap;

use serde::Serialize;

use crate::types::{Edge, Node, NodeCategory};

/// Counts shown next to the canvas. No correctness meaning.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct WorkflowStats {
    pub total_nodes: usize,
    pub total_edges: usize,
    pub by_category: BTreeMap<NodeCategory, usize>,
    /// Nodes whose type has no recognised category
    pub uncategorized: usize,
    pub configured: usize,
    pub unconfigured: usize,
}

pub fn workflow_stats(nodes: &[Node], edges: &[Edge]) -> WorkflowStats {
    let mut stats = WorkflowStats {
        total_nodes: nodes.len(),
        total_edges: edges.len(),
        ..Default::default()
    };

    for node in nodes {
        match node.node_type.category() {
            Some(category) => *stats.by_category.entry(category).or_insert(0) += 1,
            None => stats.uncategorized += 1,
        }
        if node.is_configured {
            stats.configured += 1;
        } else {
            stats.unconfigured += 1;
        }
    }

    stats
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_counts() {
        let nodes = vec![
            Node::new("t", "trigger:manual").configured(),
            Node::new("a", "action:send_email"),
            Node::new("b", "action:create_task").configured(),
            Node::new("x", "whatever"),
        ];
        let edges = vec![Edge::new("e1", "t", "a")];

        let stats = workflow_stats(&nodes, &edges);
        assert_eq!(stats.total_nodes, 4);
        assert_eq!(stats.total_edges, 1);
        assert_eq!(stats.by_category.get(&NodeCategory::Action), Some(&2));
        assert_eq!(stats.by_category.get(&NodeCategory::Trigger), Some(&1));
        assert_eq!(stats.by_category.get(&NodeCategory::Ai), None);
        assert_eq!(stats.uncategorized, 1);
        assert_eq!(stats.configured, 2);
        assert_eq!(stats.unconfigured, 2);
    }

    #[test]
    fn test_empty() {
        assert_eq!(workflow_stats(&[], &[]), WorkflowStats::default());
    }
}
