//! Opening prompts and the randomness used to pick them.

use parking_lot::Mutex;
use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};

/// Catalog of conversation openers.
pub const OPENING_PROMPTS: [&str; 5] = [
    "Can you tell me a story from one of your favorite holidays?",
    "What’s one song that brings back special memories?",
    "Did you have a favorite winter activity as a child?",
    "What family tradition do you remember the most?",
    "Can you describe a meal that always made you feel happy?",
];

/// Source of uniformly distributed catalog indices.
///
/// Injected into the chat service so tests can substitute a deterministic
/// source.
pub trait PromptSource: Send + Sync {
    /// Return an index in `0..len`. `len` is never zero.
    fn next_index(&self, len: usize) -> usize;
}

/// Picks indices from the thread-local RNG.
#[derive(Debug, Clone, Copy, Default)]
pub struct ThreadRngSource;

impl PromptSource for ThreadRngSource {
    fn next_index(&self, len: usize) -> usize {
        rand::thread_rng().gen_range(0..len)
    }
}

/// Picks indices from a seeded RNG, reproducible across runs.
#[derive(Debug)]
pub struct SeededSource {
    rng: Mutex<StdRng>,
}

impl SeededSource {
    pub fn new(seed: u64) -> Self {
        Self {
            rng: Mutex::new(StdRng::seed_from_u64(seed)),
        }
    }
}

impl PromptSource for SeededSource {
    fn next_index(&self, len: usize) -> usize {
        self.rng.lock().gen_range(0..len)
    }
}

/// Pick one opening prompt from [`OPENING_PROMPTS`].
pub fn opening_prompt(source: &dyn PromptSource) -> &'static str {
    let index = source.next_index(OPENING_PROMPTS.len());
    // Out-of-range indices from a broken source map to the last prompt.
    OPENING_PROMPTS[index.min(OPENING_PROMPTS.len() - 1)]
}
