//! Signal extraction for the scripted-dialogue responder.
//!
//! Classifies one utterance into a fixed set of boolean emotional and
//! cognitive signals. Matching is case-insensitive substring matching over
//! keyword families, so "missed" triggers `negative` just like "miss".

use once_cell::sync::Lazy;
use regex::Regex;
use serde::{Deserialize, Serialize};

/// Utterances shorter than this (in characters) are `short`.
pub const SHORT_MAX_CHARS: usize = 20;

/// Utterances longer than this (in characters) may be `structured`.
pub const STRUCTURED_MIN_CHARS: usize = 40;

static POSITIVE: Lazy<Regex> = Lazy::new(|| {
    Regex::new(r"love|happy|joy|warm|special|wonderful|favou?rite|laugh|smile").unwrap()
});
static NEGATIVE: Lazy<Regex> = Lazy::new(|| {
    Regex::new(r"sad|miss|lonely|tough|hard|regret|upset|angry|difficult").unwrap()
});
static HESITANT: Lazy<Regex> = Lazy::new(|| {
    Regex::new(r"don['’]?t know|not sure|can['’]?t remember|maybe|i guess").unwrap()
});
static CONFUSED: Lazy<Regex> = Lazy::new(|| {
    Regex::new(r"confused|dementia|forget|can['’]?t think|foggy|unclear").unwrap()
});
static TERMINAL_PUNCTUATION: Lazy<Regex> = Lazy::new(|| Regex::new(r"[.?!]").unwrap());

/// Emotional tone of an utterance. Flags are not mutually exclusive.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct EmotionalSignals {
    pub positive: bool,
    pub negative: bool,
    pub hesitant: bool,
}

/// Cognitive shape of an utterance.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct CognitiveSignals {
    pub confused: bool,
    /// Fewer than [`SHORT_MAX_CHARS`] characters.
    pub short: bool,
    /// More than [`STRUCTURED_MIN_CHARS`] characters and at least one of `.?!`.
    pub structured: bool,
}

/// Per-utterance feature vector used to pick a scripted reply.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct SignalSet {
    pub emotional: EmotionalSignals,
    pub cognitive: CognitiveSignals,
}

/// Classify `text` into a [`SignalSet`].
///
/// Pure: depends only on `text`, never on conversation history. The empty
/// string yields all-false except `cognitive.short`.
pub fn extract_signals(text: &str) -> SignalSet {
    let lower = text.to_lowercase();
    let chars = text.chars().count();

    SignalSet {
        emotional: EmotionalSignals {
            positive: POSITIVE.is_match(&lower),
            negative: NEGATIVE.is_match(&lower),
            hesitant: HESITANT.is_match(&lower),
        },
        cognitive: CognitiveSignals {
            confused: CONFUSED.is_match(&lower),
            short: chars < SHORT_MAX_CHARS,
            structured: chars > STRUCTURED_MIN_CHARS && TERMINAL_PUNCTUATION.is_match(text),
        },
    }
}
