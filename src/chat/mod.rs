//! Chat endpoint logic.
//!
//! ```text
//! ChatRequest
//!   ├─ model == scripted model
//!   │    ├─ isInitial → random opening prompt → session (lastPrompt + AI turn)
//!   │    └─ otherwise → signals → rule table → session (User + AI turns)
//!   └─ any other model → generation provider (verbatim message, verbatim reply)
//! ```

pub mod service;
pub mod types;

pub use service::ChatService;
pub use types::{ChatRequest, ChatResponse, ModelsResponse, DEFAULT_SESSION_ID};
