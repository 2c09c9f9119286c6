//! API request and response types
//!
//! Shared by the relay handlers and the widget's HTTP client.

use crate::directive::PageDirective;
use crate::llm::LlmMessage;
use serde::{Deserialize, Serialize};
use serde_json::Value;

/// Request to relay a chat message
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct ChatRequest {
    pub message: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub name: Option<String>,
    /// Prior turns as `{role, content}` objects. Anything other than an
    /// array counts as no history; malformed entries are skipped.
    #[serde(default, skip_serializing_if = "Value::is_null")]
    pub history: Value,
    #[serde(
        default,
        rename = "pageContent",
        skip_serializing_if = "Option::is_none"
    )]
    pub page_content: Option<String>,
}

impl ChatRequest {
    pub fn new(message: impl Into<String>, name: impl Into<String>) -> Self {
        Self {
            message: message.into(),
            name: Some(name.into()),
            ..Self::default()
        }
    }

    /// History entries that parse as chat messages
    pub fn history_messages(&self) -> Vec<LlmMessage> {
        let Some(entries) = self.history.as_array() else {
            return Vec::new();
        };
        entries
            .iter()
            .filter_map(|entry| serde_json::from_value(entry.clone()).ok())
            .collect()
    }
}

/// Relay reply
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ChatResponse {
    pub reply: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub details: Option<String>,
    /// Page action the model asked for, when its reply was a directive
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub directive: Option<PageDirective>,
}

impl ChatResponse {
    pub fn reply(reply: impl Into<String>) -> Self {
        Self {
            reply: reply.into(),
            details: None,
            directive: None,
        }
    }
}

/// Onboarding contact details
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct SaveUserRequest {
    #[serde(default)]
    pub name: String,
    #[serde(default)]
    pub email: String,
    #[serde(default)]
    pub phone: String,
}

/// Response for acknowledgement-only actions
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SuccessResponse {
    pub success: bool,
}
