use super::prompts::{SONG_KEYWORDS, VOICE_TRIGGERS};
use serde::Serialize;

/// What kind of reply a message is asking for.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum IntentDecision {
    Song,
    Voice,
    Plain,
}

/// Classify a message by keyword substrings. Song keywords take precedence over voice triggers.
pub fn classify_intent(message: &str) -> IntentDecision {
    let lower = message.to_lowercase();

    if SONG_KEYWORDS.iter().any(|kw| lower.contains(kw)) {
        IntentDecision::Song
    } else if VOICE_TRIGGERS.iter().any(|trigger| lower.contains(trigger)) {
        IntentDecision::Voice
    } else {
        IntentDecision::Plain
    }
}
