//! Trigger matchers - pure evaluation of message content against trigger payloads
//!
//! Each matcher is a pure function of `(content, payload)`: no hidden state,
//! no I/O. Faults are ordinary values (`MatcherFault`), never panics, so the
//! evaluator can capture them per rule and keep going.

mod keyword;
mod mention_spam;
pub mod preset;

pub use keyword::match_keywords;
pub use mention_spam::{count_mentions, match_mention_spam};
pub use preset::match_presets;

use crate::entities::Trigger;

/// Result of running one matcher over one message
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum MatchOutcome {
    /// The trigger fired; `fragment` is the matched keyword/preset word,
    /// absent for mention-spam triggers
    Matched { fragment: Option<String> },
    NotMatched,
}

impl MatchOutcome {
    /// Whether the trigger fired
    #[inline]
    pub fn is_match(&self) -> bool {
        matches!(self, Self::Matched { .. })
    }
}

/// Internal fault while running a matcher
///
/// Recovered per rule by the evaluator (fail-open); never surfaced to the
/// message author.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum MatcherFault {
    #[error("unknown keyword preset: {0}")]
    UnknownPreset(String),

    #[error("stored trigger payload could not be decoded: {0}")]
    CorruptPayload(String),
}

/// Dispatch a trigger payload to its matcher
pub fn evaluate_trigger(trigger: &Trigger, content: &str) -> Result<MatchOutcome, MatcherFault> {
    match trigger {
        Trigger::Keyword { keywords } => Ok(match_keywords(content, keywords)),
        Trigger::KeywordPreset { presets } => match_presets(content, presets),
        Trigger::MentionSpam { mention_limit } => Ok(match_mention_spam(content, *mention_limit)),
    }
}
