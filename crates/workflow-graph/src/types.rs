//! Core types for workflow graphs
//!
//! These types define the structure of a workflow being edited: nodes,
//! edges, node categories and the persisted snapshot shape.

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use crate::error::Result;

/// Unique identifier for a node
pub type NodeId = String;

/// Unique identifier for an edge
pub type EdgeId = String;

/// Configuration values of a node, keyed by field name
pub type NodeConfig = serde_json::Map<String, serde_json::Value>;

/// Category of a node
///
/// The category decides the structural rules a node is checked against
/// (triggers need no input, conditions need both branches, ...).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum NodeCategory {
    /// Entry points that start a workflow (form submitted, schedule, ...)
    Trigger,
    /// CRM side effects (send email, create task, update lead, ...)
    Action,
    /// Control flow (conditions, delays)
    Logic,
    /// AI steps (generate text, classify, ...)
    Ai,
    /// Outbound or inbound HTTP hooks
    Webhook,
}

impl NodeCategory {
    /// Every category, in display order
    pub const ALL: [NodeCategory; 5] = [
        NodeCategory::Trigger,
        NodeCategory::Action,
        NodeCategory::Logic,
        NodeCategory::Ai,
        NodeCategory::Webhook,
    ];

    /// The tag used in the `category:subtype` form
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Trigger => "trigger",
            Self::Action => "action",
            Self::Logic => "logic",
            Self::Ai => "ai",
            Self::Webhook => "webhook",
        }
    }
}

impl fmt::Display for NodeCategory {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for NodeCategory {
    type Err = ();

    fn from_str(s: &str) -> std::result::Result<Self, Self::Err> {
        match s {
            "trigger" => Ok(Self::Trigger),
            "action" => Ok(Self::Action),
            "logic" => Ok(Self::Logic),
            "ai" => Ok(Self::Ai),
            "webhook" => Ok(Self::Webhook),
            _ => Err(()),
        }
    }
}

/// The type of a node, decided once when the node is created or loaded
///
/// Serialized as the `category:subtype` string (e.g. `"logic:condition"`).
/// Strings that do not name a known category are kept verbatim as
/// [`NodeType::Uncategorized`] so a persisted graph always loads; validation
/// reports them as unknown node types.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(from = "String", into = "String")]
pub enum NodeType {
    Categorized {
        category: NodeCategory,
        subtype: String,
    },
    Uncategorized(String),
}

impl NodeType {
    /// Subtype of the logic node that branches into `true`/`false`
    pub const CONDITION: &'static str = "condition";

    /// Create a categorized node type
    pub fn new(category: NodeCategory, subtype: impl Into<String>) -> Self {
        Self::Categorized {
            category,
            subtype: subtype.into(),
        }
    }

    /// Parse a `category:subtype` identifier. Never fails.
    pub fn parse(raw: &str) -> Self {
        if let Some((category, subtype)) = raw.split_once(':') {
            if !subtype.is_empty() {
                if let Ok(category) = category.parse::<NodeCategory>() {
                    return Self::new(category, subtype);
                }
            }
        }
        Self::Uncategorized(raw.to_string())
    }

    pub fn category(&self) -> Option<NodeCategory> {
        match self {
            Self::Categorized { category, .. } => Some(*category),
            Self::Uncategorized(_) => None,
        }
    }

    pub fn subtype(&self) -> Option<&str> {
        match self {
            Self::Categorized { subtype, .. } => Some(subtype),
            Self::Uncategorized(_) => None,
        }
    }

    /// Check if this is a trigger node type
    pub fn is_trigger(&self) -> bool {
        self.category() == Some(NodeCategory::Trigger)
    }

    /// Check if this is the `logic:condition` node type
    pub fn is_condition(&self) -> bool {
        matches!(
            self,
            Self::Categorized { category: NodeCategory::Logic, subtype } if subtype == Self::CONDITION
        )
    }
}

impl fmt::Display for NodeType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Categorized { category, subtype } => write!(f, "{}:{}", category, subtype),
            Self::Uncategorized(raw) => f.write_str(raw),
        }
    }
}

impl From<&str> for NodeType {
    fn from(raw: &str) -> Self {
        Self::parse(raw)
    }
}

impl From<String> for NodeType {
    fn from(raw: String) -> Self {
        Self::parse(&raw)
    }
}

impl From<NodeType> for String {
    fn from(node_type: NodeType) -> Self {
        node_type.to_string()
    }
}

/// Canvas position of a node. Opaque to the core.
#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize, Deserialize)]
pub struct Position {
    pub x: f64,
    pub y: f64,
}

impl Position {
    pub fn new(x: f64, y: f64) -> Self {
        Self { x, y }
    }
}

/// Which continuation of a condition node an edge represents
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Branch {
    True,
    False,
}

impl Branch {
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::True => "true",
            Self::False => "false",
        }
    }
}

/// A node instance in a workflow
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Node {
    /// Unique identifier for this node instance
    pub id: NodeId,
    /// Node type (references a NodeDefinition)
    #[serde(rename = "type")]
    pub node_type: NodeType,
    /// Position on the canvas
    #[serde(default)]
    pub position: Position,
    /// Configuration values entered by the user
    #[serde(default)]
    pub config: NodeConfig,
    /// Whether the user has completed the configuration dialog
    #[serde(default)]
    pub is_configured: bool,
    /// Error marker set by the host after validation
    #[serde(default)]
    pub has_errors: bool,
}

impl Node {
    /// Create an unconfigured node at the origin
    pub fn new(id: impl Into<NodeId>, node_type: impl Into<NodeType>) -> Self {
        Self {
            id: id.into(),
            node_type: node_type.into(),
            position: Position::default(),
            config: NodeConfig::new(),
            is_configured: false,
            has_errors: false,
        }
    }

    /// Create a node with a generated id (`{subtype}-{uuid}`)
    pub fn generated(node_type: impl Into<NodeType>) -> Self {
        let node_type = node_type.into();
        let prefix = node_type.subtype().unwrap_or("node").to_string();
        let id = format!("{}-{}", prefix, uuid::Uuid::new_v4());
        Self::new(id, node_type)
    }

    pub fn with_position(mut self, x: f64, y: f64) -> Self {
        self.position = Position::new(x, y);
        self
    }

    /// Set a single configuration value
    pub fn with_value(mut self, field: impl Into<String>, value: serde_json::Value) -> Self {
        self.config.insert(field.into(), value);
        self
    }

    /// Mark the node as configured
    pub fn configured(mut self) -> Self {
        self.is_configured = true;
        self
    }

    /// Check whether a configuration field holds a usable value
    ///
    /// Missing keys, `null` and blank strings all count as "not set".
    pub fn has_value(&self, field: &str) -> bool {
        match self.config.get(field) {
            None | Some(serde_json::Value::Null) => false,
            Some(serde_json::Value::String(s)) => !s.trim().is_empty(),
            Some(_) => true,
        }
    }
}

/// A directed connection between two nodes
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Edge {
    /// Unique identifier for this edge
    pub id: EdgeId,
    /// Source node ID
    pub source: NodeId,
    /// Target node ID
    pub target: NodeId,
    /// Branch tag, only meaningful when the source is a condition node
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub branch: Option<Branch>,
}

impl Edge {
    pub fn new(id: impl Into<EdgeId>, source: impl Into<NodeId>, target: impl Into<NodeId>) -> Self {
        Self {
            id: id.into(),
            source: source.into(),
            target: target.into(),
            branch: None,
        }
    }

    /// Create an edge with a generated id
    pub fn between(source: impl Into<NodeId>, target: impl Into<NodeId>) -> Self {
        Self::new(format!("edge-{}", uuid::Uuid::new_v4()), source, target)
    }

    pub fn with_branch(mut self, branch: Branch) -> Self {
        self.branch = Some(branch);
        self
    }
}

/// The persisted shape of a workflow
///
/// `viewport` belongs to the canvas and is carried through untouched.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct WorkflowSnapshot {
    #[serde(default)]
    pub nodes: Vec<Node>,
    #[serde(default)]
    pub edges: Vec<Edge>,
    #[serde(default)]
    pub viewport: serde_json::Value,
}

impl WorkflowSnapshot {
    pub fn new(nodes: Vec<Node>, edges: Vec<Edge>) -> Self {
        Self {
            nodes,
            edges,
            viewport: serde_json::Value::Null,
        }
    }

    /// Decode a snapshot from its JSON form
    pub fn from_json(json: &str) -> Result<Self> {
        Ok(serde_json::from_str(json)?)
    }

    /// Encode the snapshot as JSON
    pub fn to_json(&self) -> Result<String> {
        Ok(serde_json::to_string(self)?)
    }

    /// Find a node by ID
    pub fn find_node(&self, id: &str) -> Option<&Node> {
        self.nodes.iter().find(|n| n.id == id)
    }
}
