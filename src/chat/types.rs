//! Wire types for the chat API.

use serde::{Deserialize, Serialize};

/// Session id used when a request doesn't carry one.
pub const DEFAULT_SESSION_ID: &str = "default";

/// Body of `POST /api/chat`.
///
/// Every field is optional on the wire so that missing fields can be reported
/// as validation errors rather than deserialization failures.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ChatRequest {
    #[serde(default)]
    pub model: Option<String>,
    #[serde(default)]
    pub message: Option<String>,
    #[serde(default)]
    pub session_id: Option<String>,
    #[serde(default)]
    pub is_initial: Option<bool>,
}

impl ChatRequest {
    pub fn new(model: impl Into<String>, message: impl Into<String>) -> Self {
        Self {
            model: Some(model.into()),
            message: Some(message.into()),
            ..Default::default()
        }
    }

    pub fn session(mut self, session_id: impl Into<String>) -> Self {
        self.session_id = Some(session_id.into());
        self
    }

    pub fn initial(mut self, is_initial: bool) -> Self {
        self.is_initial = Some(is_initial);
        self
    }

    pub fn session_id(&self) -> &str {
        self.session_id.as_deref().unwrap_or(DEFAULT_SESSION_ID)
    }

    pub fn is_initial(&self) -> bool {
        self.is_initial.unwrap_or(false)
    }
}

/// Successful reply from `POST /api/chat`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ChatResponse {
    pub response: String,
}

/// Reply from `GET /api/models`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ModelsResponse {
    pub models: Vec<String>,
}
