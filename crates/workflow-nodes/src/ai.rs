//! AI nodes
//!
//! Language-model steps. The editor only needs their configuration shape;
//! which model actually runs them is decided by the automation runtime.

use workflow_graph::{ConfigField, NodeCategory, NodeDefinition, NodeDescriptor};

/// Field shared by every AI node for an optional model override
pub const FIELD_MODEL: &str = "model";

pub struct GenerateText;

impl GenerateText {
    pub const FIELD_PROMPT: &'static str = "prompt";
}

impl NodeDescriptor for GenerateText {
    fn definition() -> NodeDefinition {
        NodeDefinition::new(NodeCategory::Ai, "generate_text", "Generate Text")
            .with_description("Writes text from a prompt, e.g. a follow-up email draft")
            .with_field(ConfigField::required(Self::FIELD_PROMPT, "Prompt"))
            .with_field(ConfigField::optional(FIELD_MODEL, "Model"))
    }
}

inventory::submit!(workflow_graph::DescriptorFn(GenerateText::definition));

pub struct Classify;

impl Classify {
    pub const FIELD_INPUT: &'static str = "input";
    pub const FIELD_CATEGORIES: &'static str = "categories";
}

impl NodeDescriptor for Classify {
    fn definition() -> NodeDefinition {
        NodeDefinition::new(NodeCategory::Ai, "classify", "Classify")
            .with_description("Sorts input into one of the given categories")
            .with_field(ConfigField::required(Self::FIELD_INPUT, "Input"))
            .with_field(ConfigField::required(Self::FIELD_CATEGORIES, "Categories"))
            .with_field(ConfigField::optional(FIELD_MODEL, "Model"))
    }
}

inventory::submit!(workflow_graph::DescriptorFn(Classify::definition));

pub struct Summarize;

impl Summarize {
    pub const FIELD_INPUT: &'static str = "input";
}

impl NodeDescriptor for Summarize {
    fn definition() -> NodeDefinition {
        NodeDefinition::new(NodeCategory::Ai, "summarize", "Summarize")
            .with_description("Condenses notes, emails or transcripts")
            .with_field(ConfigField::required(Self::FIELD_INPUT, "Input"))
            .with_field(ConfigField::optional(FIELD_MODEL, "Model"))
    }
}

inventory::submit!(workflow_graph::DescriptorFn(Summarize::definition));

pub struct ExtractData;

impl ExtractData {
    pub const FIELD_INPUT: &'static str = "input";
    pub const FIELD_SCHEMA: &'static str = "schema";
}

impl NodeDescriptor for ExtractData {
    fn definition() -> NodeDefinition {
        NodeDefinition::new(NodeCategory::Ai, "extract_data", "Extract Data")
            .with_description("Pulls structured fields out of free text")
            .with_field(ConfigField::required(Self::FIELD_INPUT, "Input"))
            .with_field(ConfigField::required(Self::FIELD_SCHEMA, "Fields to Extract"))
            .with_field(ConfigField::optional(FIELD_MODEL, "Model"))
    }
}

inventory::submit!(workflow_graph::DescriptorFn(ExtractData::definition));
