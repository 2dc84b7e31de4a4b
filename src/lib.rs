//! # Arecibo
//!
//! Server side of a small reminiscence chat widget. Each message is answered
//! either by the scripted-dialogue responder ("AreciboAI"), a rule-based
//! companion that keeps per-session history, or by a model hosted on a local
//! Ollama runtime.

pub mod chat;
pub mod config;
pub mod dialogue;
pub mod error;
pub mod llms;
pub mod server;
pub mod session;

pub use chat::{ChatRequest, ChatResponse, ChatService};
pub use config::ServerConfig;
pub use error::ChatError;
pub use llms::{GenerationProvider, OllamaClient, ProviderError};
pub use session::{InMemorySessionStore, Session, SessionStore, Turn};

/// Crate version reported by the health endpoint.
pub const VERSION: &str = env!("CARGO_PKG_VERSION");
