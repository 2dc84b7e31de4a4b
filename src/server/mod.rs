//! HTTP server for the chat widget.
//!
//! # Endpoints
//!
//! - `GET  /health`     — Liveness probe
//! - `GET  /api/models` — Models offered in the widget's dropdown
//! - `POST /api/chat`   — Scripted dialogue or provider-backed chat

pub mod routes;

pub use routes::{app_router, AppState};
