//! Request-level error taxonomy and its HTTP mapping.

use axum::{
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use thiserror::Error;

use crate::llms::ProviderError;

/// Generic message returned when a chat request fails upstream or internally.
pub const CHAT_FAILURE_MESSAGE: &str = "AI error";

/// Generic message returned when the model list can't be fetched.
pub const MODELS_FAILURE_MESSAGE: &str = "Error fetching models";

/// Errors surfaced by the chat endpoints.
#[derive(Debug, Error)]
pub enum ChatError {
    /// A required request field is missing or empty.
    #[error("Missing required field: {0}")]
    MissingField(&'static str),

    /// The request body is not valid JSON for this endpoint.
    #[error("Invalid request body: {0}")]
    InvalidBody(String),

    /// The generation provider failed while answering a chat message.
    #[error("generation failed: {0}")]
    Upstream(#[from] ProviderError),

    /// The generation provider failed while listing models.
    #[error("model listing failed: {0}")]
    ModelsUnavailable(#[source] ProviderError),

    /// Anything else that went wrong while serving the request.
    #[error("internal error: {0}")]
    Internal(String),
}

impl ChatError {
    pub fn status(&self) -> StatusCode {
        match self {
            Self::MissingField(_) | Self::InvalidBody(_) => StatusCode::BAD_REQUEST,
            Self::Upstream(_) | Self::ModelsUnavailable(_) | Self::Internal(_) => {
                StatusCode::INTERNAL_SERVER_ERROR
            }
        }
    }

    /// Message safe to show the caller. Upstream details stay in the logs.
    pub fn public_message(&self) -> String {
        match self {
            Self::MissingField(_) | Self::InvalidBody(_) => self.to_string(),
            Self::Upstream(_) | Self::Internal(_) => CHAT_FAILURE_MESSAGE.to_string(),
            Self::ModelsUnavailable(_) => MODELS_FAILURE_MESSAGE.to_string(),
        }
    }
}

impl IntoResponse for ChatError {
    fn into_response(self) -> Response {
        let status = self.status();
        if status.is_server_error() {
            tracing::error!(error = %self, "request failed");
        } else {
            tracing::debug!(error = %self, "request rejected");
        }
        (
            status,
            Json(serde_json::json!({ "error": self.public_message() })),
        )
            .into_response()
    }
}
