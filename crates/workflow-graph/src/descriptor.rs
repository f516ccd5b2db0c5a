//! Node definitions and their configuration fields
//!
//! A `NodeDefinition` is the catalog entry for one node type: what the
//! palette shows and which configuration fields the validator checks.
//!
//! Built-in definitions are registered at link time through `inventory`:
//!
//! ```ignore
//! fn send_email() -> NodeDefinition {
//!     NodeDefinition::new(NodeCategory::Action, "send_email", "Send Email")
//!         .with_field(ConfigField::required("to", "Recipient"))
//! }
//!
//! inventory::submit!(workflow_graph::DescriptorFn(send_email));
//! ```

use serde::{Deserialize, Serialize};

use crate::types::{NodeCategory, NodeType};

/// Node types that can describe themselves
///
/// Implemented by the unit structs of a node catalog so their definition
/// can be submitted with `inventory::submit!(DescriptorFn(T::definition))`.
pub trait NodeDescriptor {
    fn definition() -> NodeDefinition;
}

/// Function pointer producing a built-in definition.
///
/// Collected by [`NodeRegistry::with_builtins`](crate::registry::NodeRegistry::with_builtins).
pub struct DescriptorFn(pub fn() -> NodeDefinition);

inventory::collect!(DescriptorFn);

/// A configuration field declared by a node type
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ConfigField {
    /// Key in the node's config map
    pub name: String,
    /// Human-readable label
    pub label: String,
    /// Whether a value must be present before the workflow can be submitted
    pub required: bool,
}

impl ConfigField {
    pub fn new(name: impl Into<String>, label: impl Into<String>, required: bool) -> Self {
        Self {
            name: name.into(),
            label: label.into(),
            required,
        }
    }

    /// Create a required field
    pub fn required(name: impl Into<String>, label: impl Into<String>) -> Self {
        Self::new(name, label, true)
    }

    /// Create an optional field
    pub fn optional(name: impl Into<String>, label: impl Into<String>) -> Self {
        Self::new(name, label, false)
    }
}

/// Catalog entry for a node type
///
/// `category` always matches the category part of `node_type`; decoding a
/// definition where they disagree fails.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", try_from = "RawNodeDefinition")]
pub struct NodeDefinition {
    /// Type identifier (`category:subtype`)
    #[serde(rename = "type")]
    pub node_type: NodeType,
    /// Human-readable label
    pub label: String,
    /// Category for grouping in the palette
    pub category: NodeCategory,
    /// Description of what the node does
    #[serde(default)]
    pub description: String,
    /// Configuration fields shown in the node's settings panel
    #[serde(default)]
    pub config_fields: Vec<ConfigField>,
}

/// Wire form of [`NodeDefinition`] before the category check
#[derive(Deserialize)]
#[serde(rename_all = "camelCase")]
struct RawNodeDefinition {
    #[serde(rename = "type")]
    node_type: NodeType,
    label: String,
    category: NodeCategory,
    #[serde(default)]
    description: String,
    #[serde(default)]
    config_fields: Vec<ConfigField>,
}

impl TryFrom<RawNodeDefinition> for NodeDefinition {
    type Error = String;

    fn try_from(raw: RawNodeDefinition) -> Result<Self, Self::Error> {
        if raw.node_type.category() != Some(raw.category) {
            return Err(format!(
                "node type '{}' does not belong to category '{}'",
                raw.node_type, raw.category
            ));
        }
        Ok(Self {
            node_type: raw.node_type,
            label: raw.label,
            category: raw.category,
            description: raw.description,
            config_fields: raw.config_fields,
        })
    }
}

impl NodeDefinition {
    pub fn new(category: NodeCategory, subtype: impl Into<String>, label: impl Into<String>) -> Self {
        Self {
            node_type: NodeType::new(category, subtype),
            label: label.into(),
            category,
            description: String::new(),
            config_fields: Vec::new(),
        }
    }

    pub fn with_description(mut self, description: impl Into<String>) -> Self {
        self.description = description.into();
        self
    }

    pub fn with_field(mut self, field: ConfigField) -> Self {
        self.config_fields.push(field);
        self
    }

    /// Fields that must hold a value
    pub fn required_fields(&self) -> impl Iterator<Item = &ConfigField> {
        self.config_fields.iter().filter(|f| f.required)
    }

    /// Whether the node type needs a configuration step at all
    pub fn needs_configuration(&self) -> bool {
        !self.config_fields.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_config_field_constructors() {
        let field = ConfigField::required("to", "Recipient");
        assert_eq!(field.name, "to");
        assert_eq!(field.label, "Recipient");
        assert!(field.required);
        assert!(!ConfigField::optional("cc", "CC").required);
    }

    #[test]
    fn test_definition_builder() {
        let def = NodeDefinition::new(NodeCategory::Action, "send_email", "Send Email")
            .with_description("Sends an email to a lead")
            .with_field(ConfigField::required("to", "Recipient"))
            .with_field(ConfigField::optional("cc", "CC"));

        assert_eq!(def.node_type.to_string(), "action:send_email");
        assert_eq!(def.category, NodeCategory::Action);
        assert!(def.needs_configuration());
        assert_eq!(def.required_fields().count(), 1);
    }

    struct Wait;

    impl NodeDescriptor for Wait {
        fn definition() -> NodeDefinition {
            NodeDefinition::new(NodeCategory::Logic, "wait", "Wait")
                .with_field(ConfigField::required("duration", "Duration"))
        }
    }

    #[test]
    fn test_descriptor_fn_wraps_trait() {
        let descriptor = DescriptorFn(Wait::definition);
        let def = (descriptor.0)();
        assert_eq!(def.node_type, NodeType::new(NodeCategory::Logic, "wait"));
        assert!(def.needs_configuration());
    }

    #[test]
    fn test_definition_serialization() {
        let def = NodeDefinition::new(NodeCategory::Trigger, "manual", "Manual Trigger");
        let json = serde_json::to_string(&def).unwrap();
        assert!(json.contains("\"type\":\"trigger:manual\""));
        assert!(json.contains("configFields")); // camelCase
        assert!(!def.needs_configuration());

        let restored: NodeDefinition = serde_json::from_str(&json).unwrap();
        assert_eq!(restored, def);
    }

    #[test]
    fn test_category_must_match_type() {
        let mismatched = serde_json::json!({
            "type": "action:send_email",
            "label": "Send Email",
            "category": "logic"
        });
        let err = serde_json::from_value::<NodeDefinition>(mismatched).unwrap_err();
        assert!(err.to_string().contains("does not belong to category"));

        let uncategorized = serde_json::json!({
            "type": "mystery",
            "label": "Mystery",
            "category": "action"
        });
        assert!(serde_json::from_value::<NodeDefinition>(uncategorized).is_err());
    }
}
