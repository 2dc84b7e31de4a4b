//! Scripted-dialogue responder ("AreciboAI").
//!
//! A rule-based reminiscence companion that never calls a generation
//! provider:
//!
//! ```text
//! utterance
//!   → extract_signals   (keyword families → SignalSet)
//!   → select_response   (ordered rule table → one canned reply)
//! ```
//!
//! Conversations are opened with a prompt drawn from [`prompts::OPENING_PROMPTS`].

pub mod prompts;
pub mod selector;
pub mod signals;

pub use prompts::{opening_prompt, PromptSource, SeededSource, ThreadRngSource, OPENING_PROMPTS};
pub use selector::{select_response, Rule, FALLBACK_RESPONSE, RULES};
pub use signals::{extract_signals, SignalSet};

/// Run the full decision matrix on one utterance.
pub fn respond_to(text: &str) -> &'static str {
    let signals = extract_signals(text);
    let reply = select_response(&signals);
    tracing::debug!(
        rule = selector::matching_rule(&signals).map(|r| r.name).unwrap_or("fallback"),
        "scripted reply selected"
    );
    reply
}
