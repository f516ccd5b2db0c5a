//! Trigger nodes
//!
//! Entry points of a workflow. Triggers never have incoming edges.

use workflow_graph::{ConfigField, NodeCategory, NodeDefinition, NodeDescriptor};

/// Started by hand from the workflow list
pub struct ManualTrigger;

impl NodeDescriptor for ManualTrigger {
    fn definition() -> NodeDefinition {
        NodeDefinition::new(NodeCategory::Trigger, "manual", "Manual Trigger")
            .with_description("Runs when started from the dashboard")
    }
}

inventory::submit!(workflow_graph::DescriptorFn(ManualTrigger::definition));

/// Fires when a lead submits a web form
pub struct FormSubmitted;

impl FormSubmitted {
    pub const FIELD_FORM_ID: &'static str = "formId";
}

impl NodeDescriptor for FormSubmitted {
    fn definition() -> NodeDefinition {
        NodeDefinition::new(NodeCategory::Trigger, "form_submitted", "Form Submitted")
            .with_description("Runs when a web form is submitted")
            .with_field(ConfigField::required(Self::FIELD_FORM_ID, "Form"))
    }
}

inventory::submit!(workflow_graph::DescriptorFn(FormSubmitted::definition));

/// Fires when a lead is created
pub struct LeadCreated;

impl LeadCreated {
    pub const FIELD_SOURCE: &'static str = "source";
}

impl NodeDescriptor for LeadCreated {
    fn definition() -> NodeDefinition {
        NodeDefinition::new(NodeCategory::Trigger, "lead_created", "Lead Created")
            .with_description("Runs when a new lead is added, optionally filtered by source")
            .with_field(ConfigField::optional(Self::FIELD_SOURCE, "Lead Source"))
    }
}

inventory::submit!(workflow_graph::DescriptorFn(LeadCreated::definition));

/// Fires on a cron schedule
pub struct Schedule;

impl Schedule {
    pub const FIELD_CRON: &'static str = "cron";
    pub const FIELD_TIMEZONE: &'static str = "timezone";
}

impl NodeDescriptor for Schedule {
    fn definition() -> NodeDefinition {
        NodeDefinition::new(NodeCategory::Trigger, "schedule", "Schedule")
            .with_description("Runs on a recurring schedule")
            .with_field(ConfigField::required(Self::FIELD_CRON, "Cron Expression"))
            .with_field(ConfigField::optional(Self::FIELD_TIMEZONE, "Timezone"))
    }
}

inventory::submit!(workflow_graph::DescriptorFn(Schedule::definition));

/// Fires when a proposal moves to a given status
pub struct ProposalStatusChanged;

impl ProposalStatusChanged {
    pub const FIELD_STATUS: &'static str = "status";
}

impl NodeDescriptor for ProposalStatusChanged {
    fn definition() -> NodeDefinition {
        NodeDefinition::new(
            NodeCategory::Trigger,
            "proposal_status_changed",
            "Proposal Status Changed",
        )
        .with_description("Runs when a proposal is sent, accepted or declined")
        .with_field(ConfigField::required(Self::FIELD_STATUS, "Status"))
    }
}

inventory::submit!(workflow_graph::DescriptorFn(ProposalStatusChanged::definition));
