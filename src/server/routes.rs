//! Axum route handlers for the arecibo HTTP server.
//!
//! # Routes
//!
//! - `GET  /health`     — Returns `{"status": "ok", "version": "...", "service": "arecibo"}`
//! - `GET  /api/models` — Scripted model first, then the provider's models
//! - `POST /api/chat`   — `{model, message, sessionId, isInitial}` → `{response}`
//! - anything else      — static files from the configured directory, if any

use std::any::Any;
use std::path::PathBuf;
use std::sync::Arc;

use axum::{
    extract::{rejection::JsonRejection, State},
    response::{IntoResponse, Response},
    routing::{get, post},
    Json, Router,
};
use tower_http::catch_panic::CatchPanicLayer;
use tower_http::cors::CorsLayer;
use tower_http::services::ServeDir;
use tower_http::trace::TraceLayer;

use crate::chat::{ChatRequest, ChatResponse, ChatService, ModelsResponse};
use crate::config::ServerConfig;
use crate::dialogue::{PromptSource, SeededSource, ThreadRngSource};
use crate::error::ChatError;
use crate::llms::{OllamaClient, ProviderError};
use crate::session::InMemorySessionStore;

/// Shared application state for the HTTP server.
#[derive(Debug, Clone)]
pub struct AppState {
    /// Chat orchestration (sessions, dialogue engine, provider).
    pub chat: ChatService,
    /// Directory served for unmatched paths.
    pub static_dir: Option<PathBuf>,
}

impl AppState {
    pub fn new(chat: ChatService) -> Self {
        Self {
            chat,
            static_dir: None,
        }
    }

    /// Build the production state: in-memory sessions and an Ollama client.
    pub fn from_config(config: &ServerConfig) -> Result<Self, ProviderError> {
        let provider = match config.ollama_timeout {
            Some(timeout) => OllamaClient::with_timeout(&config.ollama_url, timeout)?,
            None => OllamaClient::new(&config.ollama_url),
        };
        let prompts: Arc<dyn PromptSource> = match config.prompt_seed {
            Some(seed) => Arc::new(SeededSource::new(seed)),
            None => Arc::new(ThreadRngSource),
        };
        let chat = ChatService::new(
            config.scripted_model.clone(),
            Arc::new(InMemorySessionStore::new()),
            Arc::new(provider),
            prompts,
        );
        Ok(Self {
            chat,
            static_dir: config.static_dir.clone(),
        })
    }

    pub fn with_static_dir(mut self, dir: impl Into<PathBuf>) -> Self {
        self.static_dir = Some(dir.into());
        self
    }
}

/// Build the axum router with all routes.
pub fn app_router(state: AppState) -> Router {
    let mut router = Router::new()
        .route("/health", get(health_handler))
        .route("/api/models", get(models_handler))
        .route("/api/chat", post(chat_handler));

    match &state.static_dir {
        Some(dir) if dir.is_dir() => {
            tracing::info!(dir = %dir.display(), "serving static files");
            router = router.fallback_service(ServeDir::new(dir));
        }
        Some(dir) => {
            tracing::warn!(dir = %dir.display(), "static directory not found; static files disabled");
        }
        None => {}
    }

    router
        .layer(CatchPanicLayer::custom(handle_panic))
        .layer(TraceLayer::new_for_http())
        .layer(CorsLayer::permissive())
        .with_state(state)
}

fn handle_panic(_err: Box<dyn Any + Send + 'static>) -> Response {
    ChatError::Internal("handler panicked".into()).into_response()
}

/// GET /health — liveness probe.
async fn health_handler() -> impl IntoResponse {
    Json(serde_json::json!({
        "status": "ok",
        "version": crate::VERSION,
        "service": "arecibo",
    }))
}

/// GET /api/models — model names for the chat widget's dropdown.
async fn models_handler(State(state): State<AppState>) -> Result<Json<ModelsResponse>, ChatError> {
    let models = state.chat.list_models().await?;
    Ok(Json(ModelsResponse { models }))
}

/// POST /api/chat — answer one message.
async fn chat_handler(
    State(state): State<AppState>,
    payload: Result<Json<ChatRequest>, JsonRejection>,
) -> Result<Json<ChatResponse>, ChatError> {
    let Json(request) = payload.map_err(|e| ChatError::InvalidBody(e.body_text()))?;
    let response = state.chat.respond(&request).await?;
    Ok(Json(ChatResponse { response }))
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------
