use serde::{Deserialize, Serialize};
use std::collections::HashMap;

/// A unit of work relayed to the MCP service.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct McpTask {
    #[serde(rename = "taskId")]
    pub task_id: String,
    #[serde(rename = "type")]
    pub task_type: String,
    pub parameters: HashMap<String, String>,
    #[serde(
        rename = "callbackUrl",
        default,
        skip_serializing_if = "Option::is_none"
    )]
    pub callback_url: Option<String>,
}

/// One record of an SQS batch as handed to the relay.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct RawMessage {
    pub message_id: Option<String>,
    pub body: Option<String>,
}

impl RawMessage {
    #[must_use]
    pub fn new(body: impl Into<String>) -> Self {
        Self {
            message_id: None,
            body: Some(body.into()),
        }
    }

    #[must_use]
    pub fn with_message_id(mut self, message_id: impl Into<String>) -> Self {
        self.message_id = Some(message_id.into());
        self
    }
}
