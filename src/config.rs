//! Server configuration loaded from environment variables.
//!
//! | Variable              | Default                  |
//! |-----------------------|--------------------------|
//! | `HOST`                | `0.0.0.0`                |
//! | `PORT`                | `3000`                   |
//! | `OLLAMA_URL`          | `http://localhost:11434` |
//! | `OLLAMA_TIMEOUT_SECS` | unset (transport default)|
//! | `ARECIBO_MODEL`       | `AreciboAI`              |
//! | `STATIC_DIR`          | `public` (empty disables)|
//! | `ARECIBO_PROMPT_SEED` | unset (thread RNG)       |

use std::path::PathBuf;
use std::str::FromStr;
use std::time::Duration;

use thiserror::Error;

use crate::llms::ollama::DEFAULT_OLLAMA_URL;

/// Default identifier of the scripted-dialogue model.
pub const DEFAULT_SCRIPTED_MODEL: &str = "AreciboAI";

#[derive(Debug, Error, PartialEq, Eq)]
pub enum ConfigError {
    #[error("invalid value for {var}: {value:?}")]
    Invalid { var: &'static str, value: String },
}

/// Runtime configuration for the HTTP server.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ServerConfig {
    pub host: String,
    pub port: u16,
    pub ollama_url: String,
    pub ollama_timeout: Option<Duration>,
    pub scripted_model: String,
    pub static_dir: Option<PathBuf>,
    pub prompt_seed: Option<u64>,
}

impl Default for ServerConfig {
    fn default() -> Self {
        Self {
            host: "0.0.0.0".into(),
            port: 3000,
            ollama_url: DEFAULT_OLLAMA_URL.into(),
            ollama_timeout: None,
            scripted_model: DEFAULT_SCRIPTED_MODEL.into(),
            static_dir: Some(PathBuf::from("public")),
            prompt_seed: None,
        }
    }
}

impl ServerConfig {
    /// Load from the process environment.
    pub fn from_env() -> Result<Self, ConfigError> {
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    /// Load using `lookup` to resolve variable names.
    pub fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> Result<Self, ConfigError> {
        let defaults = Self::default();

        let static_dir = match lookup("STATIC_DIR") {
            Some(dir) if dir.trim().is_empty() => None,
            Some(dir) => Some(PathBuf::from(dir)),
            None => defaults.static_dir,
        };

        Ok(Self {
            host: lookup("HOST").unwrap_or(defaults.host),
            port: parse_var(&lookup, "PORT")?.unwrap_or(defaults.port),
            ollama_url: lookup("OLLAMA_URL").unwrap_or(defaults.ollama_url),
            ollama_timeout: parse_var::<u64>(&lookup, "OLLAMA_TIMEOUT_SECS")?
                .map(Duration::from_secs),
            scripted_model: lookup("ARECIBO_MODEL")
                .filter(|m| !m.trim().is_empty())
                .unwrap_or(defaults.scripted_model),
            static_dir,
            prompt_seed: parse_var(&lookup, "ARECIBO_PROMPT_SEED")?,
        })
    }

    pub fn bind_addr(&self) -> String {
        format!("{}:{}", self.host, self.port)
    }
}

fn parse_var<T: FromStr>(
    lookup: &impl Fn(&str) -> Option<String>,
    var: &'static str,
) -> Result<Option<T>, ConfigError> {
    match lookup(var) {
        None => Ok(None),
        Some(value) => value
            .trim()
            .parse()
            .map(Some)
            .map_err(|_| ConfigError::Invalid { var, value }),
    }
}
