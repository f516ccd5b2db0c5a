//! Webhook nodes

use workflow_graph::{ConfigField, NodeCategory, NodeDefinition, NodeDescriptor};

/// Calls an external HTTP endpoint
pub struct HttpRequest;

impl HttpRequest {
    pub const FIELD_URL: &'static str = "url";
    pub const FIELD_METHOD: &'static str = "method";
    pub const FIELD_HEADERS: &'static str = "headers";
    pub const FIELD_PAYLOAD: &'static str = "payload";
}

impl NodeDescriptor for HttpRequest {
    fn definition() -> NodeDefinition {
        NodeDefinition::new(NodeCategory::Webhook, "http_request", "HTTP Request")
            .with_description("Sends workflow data to an external URL")
            .with_field(ConfigField::required(Self::FIELD_URL, "URL"))
            .with_field(ConfigField::optional(Self::FIELD_METHOD, "Method"))
            .with_field(ConfigField::optional(Self::FIELD_HEADERS, "Headers"))
            .with_field(ConfigField::optional(Self::FIELD_PAYLOAD, "Payload"))
    }
}

inventory::submit!(workflow_graph::DescriptorFn(HttpRequest::definition));
