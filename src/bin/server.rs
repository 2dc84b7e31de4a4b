//! arecibo HTTP server binary.
//!
//! Serves the chat API (and, if present, the widget's static files) and
//! forwards non-scripted models to a local Ollama runtime.
//!
//! # Environment Variables
//!
//! - `PORT` / `HOST` — listen address (default: `0.0.0.0:3000`)
//! - `OLLAMA_URL` — Ollama base URL (default: `http://localhost:11434`)
//! - `OLLAMA_TIMEOUT_SECS` — optional request timeout for Ollama calls
//! - `ARECIBO_MODEL` — scripted-dialogue model name (default: `AreciboAI`)
//! - `STATIC_DIR` — static file directory (default: `public`, empty disables)
//! - `ARECIBO_PROMPT_SEED` — seed for reproducible opening prompts
//! - `RUST_LOG` — Tracing filter (default: "info,arecibo=debug")
//!
//! # Usage
//!
//! ```bash
//! cargo run --bin server
//! ```

use anyhow::Context;
use arecibo::server::{app_router, AppState};
use arecibo::ServerConfig;

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    // Initialize tracing
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "info,arecibo=debug".into()),
        )
        .init();

    let config = ServerConfig::from_env().context("invalid configuration")?;
    let bind_addr = config.bind_addr();

    let state = AppState::from_config(&config).context("failed to build Ollama client")?;
    let app = app_router(state);

    tracing::info!("arecibo server starting on {}", bind_addr);
    tracing::info!("Endpoints:");
    tracing::info!("  GET  /health     — liveness probe");
    tracing::info!("  GET  /api/models — scripted model + Ollama models");
    tracing::info!("  POST /api/chat   — chat with {} or an Ollama model", config.scripted_model);
    tracing::info!("Ensure Ollama is running at {}", config.ollama_url);

    let listener = tokio::net::TcpListener::bind(&bind_addr)
        .await
        .with_context(|| format!("failed to bind {bind_addr}"))?;

    axum::serve(listener, app).await.context("server failed")?;
    Ok(())
}
