//! Response selection for the scripted-dialogue responder.
//!
//! The decision matrix is an ordered table of [`Rule`]s. The first rule whose
//! predicate holds wins; if none holds, [`FALLBACK_RESPONSE`] is used.

use super::signals::SignalSet;

/// Empathetic redirect used for negative emotion.
pub const NEGATIVE_REDIRECT: &str = "I understand that might be hard to talk about. Can I ask—how did you celebrate the holidays as a child?";

/// Follow-up used for positive emotion.
pub const POSITIVE_FOLLOW_UP: &str =
    "That sounds lovely. What made that moment stand out for you?";

/// Reassurance used for hesitation or confusion.
pub const GENTLE_REASSURANCE: &str = "That’s okay—sometimes memories take a moment. What kinds of sounds or smells do you associate with that time?";

/// Request for elaboration on short answers.
pub const ELABORATION_REQUEST: &str =
    "Could you describe a little more about how that made you feel?";

/// Reflection prompt for long, well-formed answers.
pub const REFLECTION_PROMPT: &str =
    "That was such a clear memory—what do you think you learned from that experience?";

/// Reply when no rule matches.
pub const FALLBACK_RESPONSE: &str =
    "That's interesting. What else do you remember from that time?";

/// One row of the decision matrix.
#[derive(Debug, Clone, Copy)]
pub struct Rule {
    /// Short identifier, used in logs.
    pub name: &'static str,
    pub applies: fn(&SignalSet) -> bool,
    pub response: &'static str,
}

/// The decision matrix, highest priority first.
pub static RULES: [Rule; 5] = [
    Rule {
        name: "negative",
        applies: is_negative,
        response: NEGATIVE_REDIRECT,
    },
    Rule {
        name: "positive",
        applies: is_positive,
        response: POSITIVE_FOLLOW_UP,
    },
    Rule {
        name: "hesitant_or_confused",
        applies: is_hesitant_or_confused,
        response: GENTLE_REASSURANCE,
    },
    Rule {
        name: "short",
        applies: is_short,
        response: ELABORATION_REQUEST,
    },
    Rule {
        name: "structured",
        applies: is_structured,
        response: REFLECTION_PROMPT,
    },
];

fn is_negative(s: &SignalSet) -> bool {
    s.emotional.negative
}

fn is_positive(s: &SignalSet) -> bool {
    s.emotional.positive
}

fn is_hesitant_or_confused(s: &SignalSet) -> bool {
    s.emotional.hesitant || s.cognitive.confused
}

fn is_short(s: &SignalSet) -> bool {
    s.cognitive.short
}

fn is_structured(s: &SignalSet) -> bool {
    s.cognitive.structured
}

/// Return the first matching rule, or `None` when the fallback applies.
pub fn matching_rule(signals: &SignalSet) -> Option<&'static Rule> {
    RULES.iter().find(|rule| (rule.applies)(signals))
}

/// Map a signal set to exactly one scripted reply.
pub fn select_response(signals: &SignalSet) -> &'static str {
    matching_rule(signals)
        .map(|rule| rule.response)
        .unwrap_or(FALLBACK_RESPONSE)
}
