//! Logic nodes

use workflow_graph::{ConfigField, NodeCategory, NodeDefinition, NodeDescriptor, NodeType};

/// Splits the flow into a `true` and a `false` branch
///
/// Outgoing edges must carry a branch tag; the validator warns when either
/// branch is missing.
pub struct Condition;

impl Condition {
    pub const FIELD_FIELD: &'static str = "field";
    pub const FIELD_OPERATOR: &'static str = "operator";
    pub const FIELD_VALUE: &'static str = "value";
}

impl NodeDescriptor for Condition {
    fn definition() -> NodeDefinition {
        NodeDefinition::new(NodeCategory::Logic, NodeType::CONDITION, "Condition")
            .with_description("Continues on the true or false branch")
            .with_field(ConfigField::required(Self::FIELD_FIELD, "Field"))
            .with_field(ConfigField::required(Self::FIELD_OPERATOR, "Operator"))
            .with_field(ConfigField::optional(Self::FIELD_VALUE, "Compare To"))
    }
}

inventory::submit!(workflow_graph::DescriptorFn(Condition::definition));

/// Waits before continuing
pub struct Delay;

impl Delay {
    pub const FIELD_DURATION: &'static str = "duration";
}

impl NodeDescriptor for Delay {
    fn definition() -> NodeDefinition {
        NodeDefinition::new(NodeCategory::Logic, "delay", "Delay")
            .with_description("Pauses the workflow for a fixed time")
            .with_field(ConfigField::required(Self::FIELD_DURATION, "Duration"))
    }
}

inventory::submit!(workflow_graph::DescriptorFn(Delay::definition));
