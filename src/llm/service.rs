//! Provider factory: builds the configured chat backend.

use crate::error::RelayError;
use crate::llm::gemini::GeminiClient;
use crate::llm::llm_config::LlmConfig;
use crate::llm::openai::OpenAIClient;
use crate::llm::provider::LlmProvider;
use crate::utils::http::timeout_from_secs;
use std::sync::Arc;

/// Build the LLM provider described by `config`. Fails when the credential is missing.
pub fn build_provider(config: &LlmConfig) -> Result<Arc<dyn LlmProvider>, RelayError> {
    let api_key = config.require_api_key()?;
    let timeout = timeout_from_secs(config.timeout_secs);

    match config.provider_type.as_str() {
        "gemini" => {
            let client = GeminiClient::new(
                api_key,
                config.base_url.clone(),
                config.model.clone(),
                timeout,
            )
            .with_temperature(config.temperature);
            tracing::info!(
                "[LLM] Initializing Gemini provider: model={}",
                config.model.as_deref().unwrap_or(crate::llm::gemini::DEFAULT_MODEL)
            );
            Ok(Arc::new(client))
        }
        "openai" => {
            let client = OpenAIClient::new(
                api_key,
                config.base_url.clone(),
                config.model.clone(),
                timeout,
            )
            .with_temperature(config.temperature);
            tracing::info!(
                "[LLM] Initializing OpenAI-compatible provider: base_url={}, model={}",
                config
                    .base_url
                    .as_deref()
                    .unwrap_or(crate::llm::openai::DEFAULT_BASE_URL),
                config.model.as_deref().unwrap_or(crate::llm::openai::DEFAULT_MODEL)
            );
            Ok(Arc::new(client))
        }
        other => Err(RelayError::Config(format!(
            "Unknown LLM provider type: {}",
            other
        ))),
    }
}
