//! Persona catalog: persona key -> full system prompt.

use super::prompts::{BASE_PROMPT, DEFAULT_PERSONA, PERSONA_ELABORATIONS};
use std::collections::HashMap;
use std::sync::LazyLock;

static PERSONA_PROMPTS: LazyLock<HashMap<&'static str, String>> = LazyLock::new(|| {
    PERSONA_ELABORATIONS
        .iter()
        .map(|(key, elaboration)| (*key, format!("{} {}", BASE_PROMPT, elaboration)))
        .collect()
});

/// Resolve a persona key (case-insensitive) to its system prompt.
/// Unknown keys resolve to the default persona.
pub fn resolve_persona(mode: &str) -> &'static str {
    let key = mode.to_lowercase();
    PERSONA_PROMPTS
        .get(key.as_str())
        .or_else(|| PERSONA_PROMPTS.get(DEFAULT_PERSONA))
        .map(String::as_str)
        .unwrap_or(BASE_PROMPT)
}

/// Whether `mode` names a known persona (case-insensitive).
pub fn is_known_persona(mode: &str) -> bool {
    PERSONA_PROMPTS.contains_key(mode.to_lowercase().as_str())
}

pub fn persona_keys() -> impl Iterator<Item = &'static str> {
    PERSONA_ELABORATIONS.iter().map(|(key, _)| *key)
}
