//! Action nodes
//!
//! Side effects on the CRM: emails, tasks, lead updates, notifications.

use workflow_graph::{ConfigField, NodeCategory, NodeDefinition, NodeDescriptor};

/// Sends an email
pub struct SendEmail;

impl SendEmail {
    pub const FIELD_TO: &'static str = "to";
    pub const FIELD_SUBJECT: &'static str = "subject";
    pub const FIELD_BODY: &'static str = "body";
}

impl NodeDescriptor for SendEmail {
    fn definition() -> NodeDefinition {
        NodeDefinition::new(NodeCategory::Action, "send_email", "Send Email")
            .with_description("Sends an email to a lead or team member")
            .with_field(ConfigField::required(Self::FIELD_TO, "Recipient"))
            .with_field(ConfigField::required(Self::FIELD_SUBJECT, "Subject"))
            .with_field(ConfigField::optional(Self::FIELD_BODY, "Body"))
    }
}

inventory::submit!(workflow_graph::DescriptorFn(SendEmail::definition));

/// Creates a task on the task board
pub struct CreateTask;

impl CreateTask {
    pub const FIELD_TITLE: &'static str = "title";
    pub const FIELD_ASSIGNEE: &'static str = "assignee";
    pub const FIELD_DUE_IN_DAYS: &'static str = "dueInDays";
}

impl NodeDescriptor for CreateTask {
    fn definition() -> NodeDefinition {
        NodeDefinition::new(NodeCategory::Action, "create_task", "Create Task")
            .with_description("Adds a task to the task board")
            .with_field(ConfigField::required(Self::FIELD_TITLE, "Title"))
            .with_field(ConfigField::optional(Self::FIELD_ASSIGNEE, "Assignee"))
            .with_field(ConfigField::optional(Self::FIELD_DUE_IN_DAYS, "Due In (days)"))
    }
}

inventory::submit!(workflow_graph::DescriptorFn(CreateTask::definition));

/// Sets a field on the lead that triggered the workflow
pub struct UpdateLead;

impl UpdateLead {
    pub const FIELD_FIELD: &'static str = "field";
    pub const FIELD_VALUE: &'static str = "value";
}

impl NodeDescriptor for UpdateLead {
    fn definition() -> NodeDefinition {
        NodeDefinition::new(NodeCategory::Action, "update_lead", "Update Lead")
            .with_description("Changes a field on the current lead")
            .with_field(ConfigField::required(Self::FIELD_FIELD, "Field"))
            .with_field(ConfigField::required(Self::FIELD_VALUE, "New Value"))
    }
}

inventory::submit!(workflow_graph::DescriptorFn(UpdateLead::definition));

/// Posts an in-app notification
pub struct SendNotification;

impl SendNotification {
    pub const FIELD_MESSAGE: &'static str = "message";
    pub const FIELD_CHANNEL: &'static str = "channel";
}

impl NodeDescriptor for SendNotification {
    fn definition() -> NodeDefinition {
        NodeDefinition::new(NodeCategory::Action, "send_notification", "Send Notification")
            .with_description("Notifies workspace members in the dashboard")
            .with_field(ConfigField::required(Self::FIELD_MESSAGE, "Message"))
            .with_field(ConfigField::optional(Self::FIELD_CHANNEL, "Channel"))
    }
}

inventory::submit!(workflow_graph::DescriptorFn(SendNotification::definition));

/// Opens a project, usually after a proposal is accepted
pub struct CreateProject;

impl CreateProject {
    pub const FIELD_NAME: &'static str = "name";
}

impl NodeDescriptor for CreateProject {
    fn definition() -> NodeDefinition {
        NodeDefinition::new(NodeCategory::Action, "create_project", "Create Project")
            .with_description("Creates a project for the current company")
            .with_field(ConfigField::required(Self::FIELD_NAME, "Project Name"))
    }
}

inventory::submit!(workflow_graph::DescriptorFn(CreateProject::definition));
