//! Workflow graph validation
//!
//! Decides whether a workflow can be submitted. Every problem found becomes
//! a [`Diagnostic`]; nothing here returns an error or panics, so a half-built
//! graph on the canvas can always be validated.
//!
//! Checks, in order:
//! 1. Empty graph (short-circuits)
//! 2. Trigger presence
//! 3. Per-node checks (duplicate id, known type, configuration, orphans)
//! 4. Edge endpoints exist
//! 5. Cycles (depth-first, reports the first cycle found)
//! 6. Condition branch completeness

use std::collections::{HashMap, HashSet};
use std::fmt;

use serde::{Deserialize, Serialize};

use crate::registry::NodeRegistry;
use crate::types::{Branch, Edge, EdgeId, Node, NodeId};

/// Severity of a diagnostic
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Severity {
    /// Blocks submission
    Error,
    /// Shown to the user; does not affect validity
    Warning,
}

/// What a diagnostic is about
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum DiagnosticCode {
    EmptyWorkflow,
    NoTrigger,
    MultipleTriggers,
    DuplicateNodeId,
    UnknownNodeType,
    UnconfiguredNode,
    MissingRequiredField,
    OrphanNode,
    InvalidEdge,
    CircularDependency,
    ConditionNoBranches,
    ConditionMissingTrue,
    ConditionMissingFalse,
    ConditionDuplicateBranch,
    ConditionUntaggedBranch,
}

impl DiagnosticCode {
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::EmptyWorkflow => "EMPTY_WORKFLOW",
            Self::NoTrigger => "NO_TRIGGER",
            Self::MultipleTriggers => "MULTIPLE_TRIGGERS",
            Self::DuplicateNodeId => "DUPLICATE_NODE_ID",
            Self::UnknownNodeType => "UNKNOWN_NODE_TYPE",
            Self::UnconfiguredNode => "UNCONFIGURED_NODE",
            Self::MissingRequiredField => "MISSING_REQUIRED_FIELD",
            Self::OrphanNode => "ORPHAN_NODE",
            Self::InvalidEdge => "INVALID_EDGE",
            Self::CircularDependency => "CIRCULAR_DEPENDENCY",
            Self::ConditionNoBranches => "CONDITION_NO_BRANCHES",
            Self::ConditionMissingTrue => "CONDITION_MISSING_TRUE",
            Self::ConditionMissingFalse => "CONDITION_MISSING_FALSE",
            Self::ConditionDuplicateBranch => "CONDITION_DUPLICATE_BRANCH",
            Self::ConditionUntaggedBranch => "CONDITION_UNTAGGED_BRANCH",
        }
    }
}

impl fmt::Display for DiagnosticCode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// A single validation finding
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Diagnostic {
    pub severity: Severity,
    pub code: DiagnosticCode,
    pub message: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub node_id: Option<NodeId>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub edge_id: Option<EdgeId>,
}

impl Diagnostic {
    pub fn error(code: DiagnosticCode, message: impl Into<String>) -> Self {
        Self::new(Severity::Error, code, message)
    }

    pub fn warning(code: DiagnosticCode, message: impl Into<String>) -> Self {
        Self::new(Severity::Warning, code, message)
    }

    fn new(severity: Severity, code: DiagnosticCode, message: impl Into<String>) -> Self {
        Self {
            severity,
            code,
            message: message.into(),
            node_id: None,
            edge_id: None,
        }
    }

    pub fn for_node(mut self, node_id: impl Into<NodeId>) -> Self {
        self.node_id = Some(node_id.into());
        self
    }

    pub fn for_edge(mut self, edge_id: impl Into<EdgeId>) -> Self {
        self.edge_id = Some(edge_id.into());
        self
    }
}

impl fmt::Display for Diagnostic {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "[{}] {}", self.code, self.message)
    }
}

/// Outcome of validating a workflow
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ValidationResult {
    /// True when there are no errors; warnings never affect this
    pub is_valid: bool,
    pub errors: Vec<Diagnostic>,
    pub warnings: Vec<Diagnostic>,
}

impl ValidationResult {
    fn from_parts(errors: Vec<Diagnostic>, warnings: Vec<Diagnostic>) -> Self {
        Self {
            is_valid: errors.is_empty(),
            errors,
            warnings,
        }
    }

    /// Errors followed by warnings
    pub fn diagnostics(&self) -> impl Iterator<Item = &Diagnostic> {
        self.errors.iter().chain(self.warnings.iter())
    }

    /// Check whether any diagnostic carries this code
    pub fn has_code(&self, code: DiagnosticCode) -> bool {
        self.diagnostics().any(|d| d.code == code)
    }

    /// Diagnostics attached to a node
    pub fn for_node<'a>(&'a self, node_id: &'a str) -> impl Iterator<Item = &'a Diagnostic> + 'a {
        self.diagnostics()
            .filter(move |d| d.node_id.as_deref() == Some(node_id))
    }

    /// Check whether a node has at least one error
    pub fn has_errors_for(&self, node_id: &str) -> bool {
        self.errors
            .iter()
            .any(|d| d.node_id.as_deref() == Some(node_id))
    }
}

#[derive(Default)]
struct Report {
    errors: Vec<Diagnostic>,
    warnings: Vec<Diagnostic>,
}

impl Report {
    fn push(&mut self, diagnostic: Diagnostic) {
        match diagnostic.severity {
            Severity::Error => self.errors.push(diagnostic),
            Severity::Warning => self.warnings.push(diagnostic),
        }
    }

    fn finish(self) -> ValidationResult {
        ValidationResult::from_parts(self.errors, self.warnings)
    }
}

/// Validate a workflow graph against a registry
///
/// Deterministic: the same input always yields an identical result.
pub fn validate(nodes: &[Node], edges: &[Edge], registry: &NodeRegistry) -> ValidationResult {
    if nodes.is_empty() {
        return ValidationResult::from_parts(
            vec![Diagnostic::error(
                DiagnosticCode::EmptyWorkflow,
                "Workflow is empty. Add a trigger to get started.",
            )],
            Vec::new(),
        );
    }

    let node_ids: HashSet<&str> = nodes.iter().map(|n| n.id.as_str()).collect();
    let mut report = Report::default();

    check_triggers(nodes, &mut report);
    check_nodes(nodes, edges, registry, &mut report);
    check_edge_references(edges, &node_ids, &mut report);
    detect_cycle(nodes, edges, &node_ids, &mut report);
    check_condition_branches(nodes, edges, registry, &mut report);

    let result = report.finish();
    log::debug!(
        "Validated workflow ({} nodes, {} edges): {} errors, {} warnings",
        nodes.len(),
        edges.len(),
        result.errors.len(),
        result.warnings.len()
    );
    result
}

/// Display label for a node, falling back to its id for unknown types
fn node_label<'a>(node: &'a Node, registry: &'a NodeRegistry) -> &'a str {
    registry
        .lookup(&node.node_type)
        .map(|d| d.label.as_str())
        .unwrap_or(node.id.as_str())
}

/// Exactly one trigger is expected
fn check_triggers(nodes: &[Node], report: &mut Report) {
    let trigger_count = nodes.iter().filter(|n| n.node_type.is_trigger()).count();

    if trigger_count == 0 {
        report.push(Diagnostic::error(
            DiagnosticCode::NoTrigger,
            "Workflow needs a trigger to start",
        ));
    } else if trigger_count > 1 {
        report.push(Diagnostic::warning(
            DiagnosticCode::MultipleTriggers,
            format!(
                "Workflow has {} triggers; only the first one will start it",
                trigger_count
            ),
        ));
    }
}

fn check_nodes(nodes: &[Node], edges: &[Edge], registry: &NodeRegistry, report: &mut Report) {
    let targets: HashSet<&str> = edges.iter().map(|e| e.target.as_str()).collect();
    let mut seen: HashSet<&str> = HashSet::new();

    for node in nodes {
        if !seen.insert(node.id.as_str()) {
            report.push(
                Diagnostic::error(
                    DiagnosticCode::DuplicateNodeId,
                    format!("Node id '{}' is used more than once", node.id),
                )
                .for_node(&node.id),
            );
        }

        let Some(definition) = registry.lookup(&node.node_type) else {
            report.push(
                Diagnostic::error(
                    DiagnosticCode::UnknownNodeType,
                    format!("Node '{}' has unknown type '{}'", node.id, node.node_type),
                )
                .for_node(&node.id),
            );
            continue;
        };

        if definition.needs_configuration() && !node.is_configured {
            report.push(
                Diagnostic::error(
                    DiagnosticCode::UnconfiguredNode,
                    format!("{} is not configured", definition.label),
                )
                .for_node(&node.id),
            );
        }

        for field in definition.required_fields() {
            if !node.has_value(&field.name) {
                report.push(
                    Diagnostic::error(
                        DiagnosticCode::MissingRequiredField,
                        format!("\"{}\" is required on {}", field.label, definition.label),
                    )
                    .for_node(&node.id),
                );
            }
        }

        if !node.node_type.is_trigger() && !targets.contains(node.id.as_str()) {
            report.push(
                Diagnostic::warning(
                    DiagnosticCode::OrphanNode,
                    format!("{} has no incoming connection", definition.label),
                )
                .for_node(&node.id),
            );
        }
    }
}

/// Check that all edge source/target nodes exist
fn check_edge_references(edges: &[Edge], node_ids: &HashSet<&str>, report: &mut Report) {
    for edge in edges {
        let missing: Vec<String> = [("source", &edge.source), ("target", &edge.target)]
            .into_iter()
            .filter(|(_, id)| !node_ids.contains(id.as_str()))
            .map(|(end, id)| format!("{} '{}'", end, id))
            .collect();

        if !missing.is_empty() {
            report.push(
                Diagnostic::error(
                    DiagnosticCode::InvalidEdge,
                    format!(
                        "Edge '{}' references a missing node ({})",
                        edge.id,
                        missing.join(", ")
                    ),
                )
                .for_edge(&edge.id),
            );
        }
    }
}

/// Report the first cycle found by a depth-first walk
///
/// Every node is tried as a root (in node order) so cycles in disconnected
/// components are found too. The message lists the cycle as
/// `A -> B -> C -> A`, starting at the node the back-edge re-enters.
fn detect_cycle(nodes: &[Node], edges: &[Edge], node_ids: &HashSet<&str>, report: &mut Report) {
    let mut adjacency: HashMap<&str, Vec<&str>> = HashMap::new();
    for edge in edges {
        if node_ids.contains(edge.source.as_str()) && node_ids.contains(edge.target.as_str()) {
            adjacency
                .entry(edge.source.as_str())
                .or_default()
                .push(edge.target.as_str());
        }
    }

    let mut visited: HashSet<&str> = HashSet::new();
    for node in nodes {
        if visited.contains(node.id.as_str()) {
            continue;
        }
        if let Some(cycle) = find_cycle_from(node.id.as_str(), &adjacency, &mut visited) {
            report.push(
                Diagnostic::error(
                    DiagnosticCode::CircularDependency,
                    format!("Circular dependency detected: {}", cycle.join(" -> ")),
                )
                .for_node(cycle[0]),
            );
            return;
        }
    }
}

/// Iterative DFS; the explicit stack doubles as the recursion stack
fn find_cycle_from<'a>(
    root: &'a str,
    adjacency: &HashMap<&'a str, Vec<&'a str>>,
    visited: &mut HashSet<&'a str>,
) -> Option<Vec<&'a str>> {
    let mut stack: Vec<(&'a str, usize)> = vec![(root, 0)];
    let mut on_stack: HashSet<&'a str> = HashSet::from([root]);
    visited.insert(root);

    while let Some(frame) = stack.last_mut() {
        let (node, index) = *frame;
        let neighbors = adjacency.get(node).map(Vec::as_slice).unwrap_or(&[]);

        match neighbors.get(index) {
            Some(&next) => {
                frame.1 += 1;
                if on_stack.contains(next) {
                    let start = stack.iter().position(|(id, _)| *id == next).unwrap_or(0);
                    let mut cycle: Vec<&str> = stack[start..].iter().map(|(id, _)| *id).collect();
                    cycle.push(next);
                    return Some(cycle);
                }
                if visited.insert(next) {
                    on_stack.insert(next);
                    stack.push((next, 0));
                }
            }
            None => {
                on_stack.remove(node);
                stack.pop();
            }
        }
    }

    None
}

/// Condition nodes should have exactly one `true` and one `false` continuation
fn check_condition_branches(
    nodes: &[Node],
    edges: &[Edge],
    registry: &NodeRegistry,
    report: &mut Report,
) {
    for node in nodes.iter().filter(|n| n.node_type.is_condition()) {
        let label = node_label(node, registry);
        let outgoing: Vec<&Edge> = edges.iter().filter(|e| e.source == node.id).collect();

        if outgoing.is_empty() {
            report.push(
                Diagnostic::warning(
                    DiagnosticCode::ConditionNoBranches,
                    format!("{} has no outgoing branches", label),
                )
                .for_node(&node.id),
            );
            continue;
        }

        let count = |branch: Branch| outgoing.iter().filter(|e| e.branch == Some(branch)).count();
        let (true_count, false_count) = (count(Branch::True), count(Branch::False));

        match (true_count > 0, false_count > 0) {
            (true, false) => report.push(
                Diagnostic::warning(
                    DiagnosticCode::ConditionMissingFalse,
                    format!("{} has no \"false\" branch", label),
                )
                .for_node(&node.id),
            ),
            (false, true) => report.push(
                Diagnostic::warning(
                    DiagnosticCode::ConditionMissingTrue,
                    format!("{} has no \"true\" branch", label),
                )
                .for_node(&node.id),
            ),
            _ => {}
        }

        for (branch, n) in [(Branch::True, true_count), (Branch::False, false_count)] {
            if n > 1 {
                report.push(
                    Diagnostic::warning(
                        DiagnosticCode::ConditionDuplicateBranch,
                        format!("{} has {} \"{}\" branches", label, n, branch.as_str()),
                    )
                    .for_node(&node.id),
                );
            }
        }

        for edge in outgoing.iter().filter(|e| e.branch.is_none()) {
            report.push(
                Diagnostic::warning(
                    DiagnosticCode::ConditionUntaggedBranch,
                    format!("Edge '{}' from {} is not tagged true or false", edge.id, label),
                )
                .for_node(&node.id)
                .for_edge(&edge.id),
            );
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::builder::WorkflowBuilder;
    use crate::descriptor::{ConfigField, NodeDefinition};
    use crate::types::{NodeCategory, WorkflowSnapshot};
    use serde_json::json;

    fn make_test_registry() -> NodeRegistry {
        [
            NodeDefinition::new(NodeCategory::Trigger, "manual", "Manual Trigger"),
            NodeDefinition::new(NodeCategory::Action, "send_email", "Send Email")
                .with_field(ConfigField::required("to", "Recipient"))
                .with_field(ConfigField::required("subject", "Subject"))
                .with_field(ConfigField::optional("cc", "CC")),
            NodeDefinition::new(NodeCategory::Action, "create_task", "Create Task"),
            NodeDefinition::new(NodeCategory::Logic, "condition", "Condition")
                .with_field(ConfigField::required("expression", "Expression")),
        ]
        .into_iter()
        .collect()
    }

    fn run(graph: &WorkflowSnapshot) -> ValidationResult {
        validate(&graph.nodes, &graph.edges, &make_test_registry())
    }

    fn codes(diagnostics: &[Diagnostic]) -> Vec<DiagnosticCode> {
        diagnostics.iter().map(|d| d.code).collect()
    }

    /// trigger -> condition, configured
    fn condition_graph() -> WorkflowBuilder {
        WorkflowBuilder::new()
            .add_node("t", "trigger:manual")
            .add_node("c", "logic:condition")
            .with_value("expression", json!("lead.score > 50"))
            .configured()
            .add_edge("t", "c")
    }

    #[test]
    fn test_valid_graph() {
        let graph = WorkflowBuilder::new()
            .add_node("t", "trigger:manual")
            .add_node("a", "action:create_task")
            .add_edge("t", "a")
            .build();

        let result = run(&graph);
        assert!(result.is_valid, "Expected no errors, got: {:?}", result.errors);
        assert!(result.warnings.is_empty());
    }

    #[test]
    fn test_empty_graph() {
        let result = validate(&[], &[Edge::new("e1", "a", "b")], &make_test_registry());
        assert!(!result.is_valid);
        assert_eq!(codes(&result.errors), vec![DiagnosticCode::EmptyWorkflow]);
        assert!(result.warnings.is_empty());
    }

    #[test]
    fn test_no_trigger() {
        let graph = WorkflowBuilder::new()
            .add_node("a", "action:create_task")
            .build();

        let result = run(&graph);
        assert!(!result.is_valid);
        assert!(codes(&result.errors).contains(&DiagnosticCode::NoTrigger));
    }

    #[test]
    fn test_multiple_triggers_is_warning() {
        let graph = WorkflowBuilder::new()
            .add_node("t1", "trigger:manual")
            .add_node("t2", "trigger:manual")
            .build();

        let result = run(&graph);
        assert!(result.is_valid);
        assert_eq!(codes(&result.warnings), vec![DiagnosticCode::MultipleTriggers]);
    }

    #[test]
    fn test_unknown_node_type_skips_other_checks() {
        let graph = WorkflowBuilder::new()
            .add_node("t", "trigger:manual")
            .add_node("x", "action:teleport")
            .add_node("y", "garbage")
            .build();

        let result = run(&graph);
        assert!(!result.is_valid);
        assert_eq!(
            codes(&result.errors),
            vec![DiagnosticCode::UnknownNodeType, DiagnosticCode::UnknownNodeType]
        );
        // No orphan warnings for nodes whose type could not be resolved
        assert!(result.warnings.is_empty());
        assert_eq!(result.errors[1].node_id.as_deref(), Some("y"));
    }

    #[test]
    fn test_unconfigured_node_and_missing_fields() {
        let graph = WorkflowBuilder::new()
            .add_node("t", "trigger:manual")
            .add_node("e", "action:send_email")
            .with_value("subject", json!("Welcome"))
            .add_edge("t", "e")
            .build();

        let result = run(&graph);
        assert_eq!(
            codes(&result.errors),
            vec![
                DiagnosticCode::UnconfiguredNode,
                DiagnosticCode::MissingRequiredField
            ]
        );
        let missing = &result.errors[1];
        assert!(missing.message.contains("Recipient"));
        assert!(missing.message.contains("Send Email"));
        assert_eq!(missing.node_id.as_deref(), Some("e"));
    }

    #[test]
    fn test_blank_value_counts_as_missing() {
        let graph = WorkflowBuilder::new()
            .add_node("t", "trigger:manual")
            .add_node("e", "action:send_email")
            .with_value("to", json!(""))
            .with_value("subject", json!(null))
            .configured()
            .add_edge("t", "e")
            .build();

        let result = run(&graph);
        assert_eq!(
            codes(&result.errors),
            vec![
                DiagnosticCode::MissingRequiredField,
                DiagnosticCode::MissingRequiredField
            ]
        );
    }

    #[test]
    fn test_orphan_node_is_warning() {
        let graph = WorkflowBuilder::new()
            .add_node("t", "trigger:manual")
            .add_node("a", "action:create_task")
            .build();

        let result = run(&graph);
        assert!(result.is_valid);
        assert_eq!(codes(&result.warnings), vec![DiagnosticCode::OrphanNode]);
        assert_eq!(result.warnings[0].node_id.as_deref(), Some("a"));
    }

    #[test]
    fn test_duplicate_node_id() {
        let graph = WorkflowBuilder::new()
            .add_node("t", "trigger:manual")
            .add_node("a", "action:create_task")
            .add_node("a", "action:create_task")
            .add_edge("t", "a")
            .build();

        let result = run(&graph);
        assert_eq!(codes(&result.errors), vec![DiagnosticCode::DuplicateNodeId]);
    }

    #[test]
    fn test_edge_references_missing_node() {
        let graph = WorkflowBuilder::new()
            .add_node("t", "trigger:manual")
            .add_edge_with_id("dangling", "t", "missing")
            .add_edge_with_id("lost", "nowhere", "void")
            .build();

        let result = run(&graph);
        assert_eq!(
            codes(&result.errors),
            vec![DiagnosticCode::InvalidEdge, DiagnosticCode::InvalidEdge]
        );
        assert_eq!(result.errors[0].edge_id.as_deref(), Some("dangling"));
        assert!(result.errors[1].message.contains("source 'nowhere'"));
        assert!(result.errors[1].message.contains("target 'void'"));
    }

    #[test]
    fn test_detect_cycle_path() {
        let graph = WorkflowBuilder::new()
            .add_node("A", "trigger:manual")
            .add_node("B", "action:create_task")
            .add_node("C", "action:create_task")
            .add_edge("A", "B")
            .add_edge("B", "C")
            .add_edge("C", "A")
            .build();

        let result = run(&graph);
        let cycles: Vec<&Diagnostic> = result
            .errors
            .iter()
            .filter(|d| d.code == DiagnosticCode::CircularDependency)
            .collect();
        assert_eq!(cycles.len(), 1);
        assert!(cycles[0].message.contains("A -> B -> C -> A"), "{}", cycles[0].message);
        assert_eq!(cycles[0].node_id.as_deref(), Some("A"));
    }

    #[test]
    fn test_cycle_starts_where_back_edge_lands() {
        let graph = WorkflowBuilder::new()
            .add_node("t", "trigger:manual")
            .add_node("a", "action:create_task")
            .add_node("b", "action:create_task")
            .add_edge("t", "a")
            .add_edge("a", "b")
            .add_edge("b", "a")
            .build();

        let result = run(&graph);
        let cycle = result
            .errors
            .iter()
            .find(|d| d.code == DiagnosticCode::CircularDependency)
            .unwrap();
        assert!(cycle.message.ends_with("a -> b -> a"), "{}", cycle.message);
    }

    #[test]
    fn test_cycle_in_disconnected_component() {
        let graph = WorkflowBuilder::new()
            .add_node("t", "trigger:manual")
            .add_node("a", "action:create_task")
            .add_node("x", "action:create_task")
            .add_node("y", "action:create_task")
            .add_edge("t", "a")
            .add_edge("x", "y")
            .add_edge("y", "x")
            .build();

        let result = run(&graph);
        assert!(result.has_code(DiagnosticCode::CircularDependency));
    }

    #[test]
    fn test_self_loop() {
        let graph = WorkflowBuilder::new()
            .add_node("t", "trigger:manual")
            .add_edge("t", "t")
            .build();

        let result = run(&graph);
        let cycle = result
            .errors
            .iter()
            .find(|d| d.code == DiagnosticCode::CircularDependency)
            .unwrap();
        assert!(cycle.message.contains("t -> t"));
    }

    #[test]
    fn test_diamond_is_not_a_cycle() {
        let graph = WorkflowBuilder::new()
            .add_node("t", "trigger:manual")
            .add_node("a", "action:create_task")
            .add_node("b", "action:create_task")
            .add_node("c", "action:create_task")
            .add_edge("t", "a")
            .add_edge("t", "b")
            .add_edge("a", "c")
            .add_edge("b", "c")
            .build();

        let result = run(&graph);
        assert!(result.is_valid, "{:?}", result.errors);
    }

    #[test]
    fn test_long_chain_does_not_overflow() {
        let mut builder = WorkflowBuilder::new().add_node("n0", "trigger:manual");
        for i in 1..20_000 {
            builder = builder
                .add_node(format!("n{}", i), "action:create_task")
                .add_edge(format!("n{}", i - 1), format!("n{}", i));
        }
        let result = run(&builder.build());
        assert!(result.is_valid);
    }

    #[test]
    fn test_condition_without_branches() {
        let result = run(&condition_graph().build());
        assert!(result.is_valid);
        assert_eq!(codes(&result.warnings), vec![DiagnosticCode::ConditionNoBranches]);
    }

    #[test]
    fn test_condition_missing_false() {
        let graph = condition_graph()
            .add_node("a", "action:create_task")
            .add_branch("c", "a", Branch::True)
            .build();

        let result = run(&graph);
        assert!(result.is_valid);
        assert_eq!(codes(&result.warnings), vec![DiagnosticCode::ConditionMissingFalse]);
    }

    #[test]
    fn test_condition_missing_true() {
        let graph = condition_graph()
            .add_node("a", "action:create_task")
            .add_branch("c", "a", Branch::False)
            .build();

        let result = run(&graph);
        assert_eq!(codes(&result.warnings), vec![DiagnosticCode::ConditionMissingTrue]);
    }

    #[test]
    fn test_condition_complete() {
        let graph = condition_graph()
            .add_node("yes", "action:create_task")
            .add_node("no", "action:create_task")
            .add_branch("c", "yes", Branch::True)
            .add_branch("c", "no", Branch::False)
            .build();

        let result = run(&graph);
        assert!(result.is_valid);
        assert!(result.warnings.is_empty(), "{:?}", result.warnings);
    }

    #[test]
    fn test_condition_duplicate_and_untagged_branches() {
        let graph = condition_graph()
            .add_node("a", "action:create_task")
            .add_node("b", "action:create_task")
            .add_node("d", "action:create_task")
            .add_node("e", "action:create_task")
            .add_branch("c", "a", Branch::True)
            .add_branch("c", "b", Branch::True)
            .add_branch("c", "d", Branch::False)
            .add_edge_with_id("plain", "c", "e")
            .build();

        let result = run(&graph);
        assert!(result.is_valid);
        assert_eq!(
            codes(&result.warnings),
            vec![
                DiagnosticCode::ConditionDuplicateBranch,
                DiagnosticCode::ConditionUntaggedBranch
            ]
        );
        assert_eq!(result.warnings[1].edge_id.as_deref(), Some("plain"));
    }

    #[test]
    fn test_validation_is_deterministic() {
        let graph = WorkflowBuilder::new()
            .add_node("a", "action:send_email")
            .add_node("b", "logic:condition")
            .add_node("c", "mystery")
            .add_edge("a", "b")
            .add_edge("b", "a")
            .add_edge("b", "ghost")
            .build();

        let first = run(&graph);
        let second = run(&graph);
        assert_eq!(first, second);
        assert_eq!(
            serde_json::to_string(&first).unwrap(),
            serde_json::to_string(&second).unwrap()
        );
    }

    #[test]
    fn test_collects_multiple_errors() {
        let graph = WorkflowBuilder::new()
            .add_node("a", "unknown-type-1")
            .add_node("b", "unknown-type-2")
            .add_edge("a", "b")
            .add_edge("b", "a")
            .build();

        let result = run(&graph);
        assert_eq!(
            codes(&result.errors),
            vec![
                DiagnosticCode::NoTrigger,
                DiagnosticCode::UnknownNodeType,
                DiagnosticCode::UnknownNodeType,
                DiagnosticCode::CircularDependency
            ]
        );
    }

    #[test]
    fn test_result_helpers_and_serialization() {
        let graph = WorkflowBuilder::new()
            .add_node("t", "trigger:manual")
            .add_node("e", "action:send_email")
            .build();

        let result = run(&graph);
        assert!(result.has_errors_for("e"));
        assert!(!result.has_errors_for("t"));
        assert_eq!(result.for_node("e").count(), 4);

        let value = serde_json::to_value(&result).unwrap();
        assert_eq!(value["isValid"], false);
        assert_eq!(value["errors"][0]["code"], "UNCONFIGURED_NODE");
        assert_eq!(value["errors"][0]["severity"], "error");
        assert_eq!(value["errors"][0]["nodeId"], "e");
        assert!(value["errors"][0].get("edgeId").is_none());
    }
}
