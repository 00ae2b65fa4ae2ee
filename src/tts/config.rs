use crate::config;
use serde::{Deserialize, Serialize};

/// The `tts` section of the relay config.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct TtsConfig {
    /// "google_translate" | "openai"
    #[serde(default = "default_provider_type")]
    pub provider_type: String,

    // Common fields (optional, provider-specific)
    pub api_key: Option<String>,
    pub api_key_env: Option<String>,
    pub base_url: Option<String>,
    pub model: Option<String>,
    pub default_voice: Option<String>,

    /// Language used for song replies.
    #[serde(default = "default_language")]
    pub song_language: String,
    /// Language used for spoken (voice) replies.
    #[serde(default = "default_language")]
    pub talk_language: String,

    pub timeout_secs: Option<u64>,
}

impl TtsConfig {
    pub fn resolve_api_key(&self) -> Option<String> {
        config::resolve_api_key(&self.api_key, &self.api_key_env)
    }
}

fn default_provider_type() -> String {
    "google_translate".to_string()
}

fn default_language() -> String {
    "ta".to_string()
}

impl Default for TtsConfig {
    fn default() -> Self {
        Self {
            provider_type: default_provider_type(),
            api_key: None,
            api_key_env: None,
            base_url: None,
            model: None,
            default_voice: None,
            song_language: default_language(),
            talk_language: default_language(),
            timeout_secs: None,
        }
    }
}
