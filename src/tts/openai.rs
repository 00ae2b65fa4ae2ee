use super::config::TtsConfig;
use super::interface::{TtsError, TtsParams, TtsProvider};
use crate::utils::http::{build_client, ensure_success, timeout_from_secs};
use async_trait::async_trait;
use reqwest::Client;
use serde::Serialize;
use std::time::Duration;

#[derive(Serialize)]
struct SpeechRequest<'a> {
    model: &'a str,
    input: &'a str,
    voice: &'a str,
    response_format: &'static str,
    #[serde(skip_serializing_if = "Option::is_none")]
    speed: Option<f32>,
}

/// OpenAI-compatible `/audio/speech`. The language is inferred by the model
/// from the text itself, so `TtsParams::language` is not sent.
pub struct OpenAITtsProvider {
    client: Client,
    api_key: String,
    base_url: String,
    model: String,
    default_voice: String,
}

impl OpenAITtsProvider {
    pub fn new(
        api_key: String,
        base_url: Option<String>,
        model: Option<String>,
        voice: Option<String>,
        timeout: Option<Duration>,
    ) -> Self {
        Self {
            client: build_client(timeout),
            api_key,
            base_url: base_url
                .unwrap_or_else(|| "https://api.openai.com/v1".to_string())
                .trim_end_matches('/')
                .to_string(),
            model: model.unwrap_or_else(|| "tts-1".to_string()),
            default_voice: voice.unwrap_or_else(|| "nova".to_string()),
        }
    }

    /// Construct from the `tts` config section. `None` if no API key resolves.
    pub fn from_config(config: &TtsConfig) -> Option<Self> {
        let api_key = config.resolve_api_key()?;
        Some(Self::new(
            api_key,
            config.base_url.clone(),
            config.model.clone(),
            config.default_voice.clone(),
            timeout_from_secs(config.timeout_secs),
        ))
    }
}

#[async_trait]
impl TtsProvider for OpenAITtsProvider {
    fn id(&self) -> &str {
        "openai"
    }

    async fn synthesize(&self, text: &str, params: &TtsParams) -> Result<Vec<u8>, TtsError> {
        if text.trim().is_empty() {
            return Err(TtsError::EmptyText);
        }

        let url = format!("{}/audio/speech", self.base_url);
        let body = SpeechRequest {
            model: &self.model,
            input: text,
            voice: params.voice.as_deref().unwrap_or(&self.default_voice),
            response_format: "mp3",
            speed: params.speed,
        };

        let response = self
            .client
            .post(&url)
            .bearer_auth(&self.api_key)
            .json(&body)
            .send()
            .await
            .map_err(|e| TtsError::SynthesisFailed(format!("Request failed: {}", e)))?;

        let response = ensure_success(response, "OpenAI TTS")
            .await
            .map_err(TtsError::SynthesisFailed)?;

        let bytes = response
            .bytes()
            .await
            .map_err(|e| TtsError::SynthesisFailed(format!("Bytes error: {}", e)))?;
        Ok(bytes.to_vec())
    }
}
