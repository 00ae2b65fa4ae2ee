//! LLM configuration: the `llm` section of the relay config.

use crate::config;
use crate::error::RelayError;
use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct LlmConfig {
    /// "gemini" | "openai"
    #[serde(default = "default_provider_type")]
    pub provider_type: String,

    pub api_key: Option<String>,
    #[serde(default = "default_api_key_env")]
    pub api_key_env: Option<String>,
    pub base_url: Option<String>,
    pub model: Option<String>,
    pub temperature: Option<f32>,
    /// Overall request timeout. Unset or 0 keeps the client default.
    pub timeout_secs: Option<u64>,
}

impl LlmConfig {
    pub fn resolve_api_key(&self) -> Option<String> {
        config::resolve_api_key(&self.api_key, &self.api_key_env)
    }

    /// The key is mandatory: the relay refuses to start without it.
    pub fn require_api_key(&self) -> Result<String, RelayError> {
        config::require_api_key(&self.api_key, &self.api_key_env, "LLM")
    }
}

fn default_provider_type() -> String {
    "gemini".to_string()
}

fn default_api_key_env() -> Option<String> {
    Some("GEMINI_API_KEY".to_string())
}

impl Default for LlmConfig {
    fn default() -> Self {
        Self {
            provider_type: default_provider_type(),
            api_key: None,
            api_key_env: default_api_key_env(),
            base_url: None,
            model: None,
            temperature: None,
            timeout_secs: None,
        }
    }
}
