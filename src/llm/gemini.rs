//! Gemini provider: non-streaming `models/{model}:generateContent`.
//!
//! Conversation turns map onto Gemini `contents`:
//! ```json
//! {"contents":[{"role":"user","parts":[{"text":"..."}]},{"role":"model","parts":[...]}]}
//! ```
//! System messages are lifted into `systemInstruction`.

use async_trait::async_trait;
use reqwest::Client;
use serde::{Deserialize, Serialize};
use std::time::Duration;

use crate::llm::provider::{LlmError, LlmParams, LlmProvider, Message, Role};
use crate::utils::http::{build_client, ensure_success};

pub const DEFAULT_BASE_URL: &str = "https://generativelanguage.googleapis.com/v1beta";
pub const DEFAULT_MODEL: &str = "gemini-1.5-pro";

// ── Request types ──────────────────────────────────────

#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
struct GenerateContentRequest {
    contents: Vec<GeminiContent>,
    #[serde(skip_serializing_if = "Option::is_none")]
    system_instruction: Option<GeminiSystemInstruction>,
    #[serde(skip_serializing_if = "Option::is_none")]
    generation_config: Option<GenerationConfig>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
struct GeminiContent {
    #[serde(default)]
    role: Option<String>,
    #[serde(default)]
    parts: Vec<GeminiPart>,
}

#[derive(Debug, Clone, Serialize)]
struct GeminiSystemInstruction {
    parts: Vec<GeminiPart>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
struct GeminiPart {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    text: Option<String>,
}

#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
struct GenerationConfig {
    #[serde(skip_serializing_if = "Option::is_none")]
    temperature: Option<f32>,
    #[serde(skip_serializing_if = "Option::is_none")]
    max_output_tokens: Option<u32>,
    #[serde(skip_serializing_if = "Option::is_none")]
    top_p: Option<f32>,
}

// ── Response types ─────────────────────────────────────

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
struct GenerateContentResponse {
    #[serde(default)]
    candidates: Vec<GeminiCandidate>,
    #[serde(default)]
    prompt_feedback: Option<PromptFeedback>,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
struct GeminiCandidate {
    #[serde(default)]
    content: Option<GeminiContent>,
    #[serde(default)]
    finish_reason: Option<String>,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
struct PromptFeedback {
    #[serde(default)]
    block_reason: Option<String>,
}

pub struct GeminiClient {
    client: Client,
    api_key: String,
    base_url: String,
    model: String,
    default_temperature: Option<f32>,
}

impl GeminiClient {
    pub fn new(
        api_key: String,
        base_url: Option<String>,
        model: Option<String>,
        timeout: Option<Duration>,
    ) -> Self {
        Self {
            client: build_client(timeout),
            api_key,
            base_url: base_url
                .unwrap_or_else(|| DEFAULT_BASE_URL.to_string())
                .trim_end_matches('/')
                .to_string(),
            model: model.unwrap_or_else(|| DEFAULT_MODEL.to_string()),
            default_temperature: None,
        }
    }

    pub fn with_temperature(mut self, temperature: Option<f32>) -> Self {
        self.default_temperature = temperature;
        self
    }

    fn build_request(&self, messages: Vec<Message>, opts: LlmParams) -> GenerateContentRequest {
        let mut contents = Vec::new();
        let mut system_parts = Vec::new();

        for msg in messages {
            let part = GeminiPart {
                text: Some(msg.content),
            };
            match msg.role {
                Role::System => system_parts.push(part),
                Role::User => contents.push(GeminiContent {
                    role: Some("user".to_string()),
                    parts: vec![part],
                }),
                Role::Assistant => contents.push(GeminiContent {
                    role: Some("model".to_string()),
                    parts: vec![part],
                }),
            }
        }

        let temperature = opts.temperature.or(self.default_temperature);
        let generation_config =
            if temperature.is_none() && opts.max_tokens.is_none() && opts.top_p.is_none() {
                None
            } else {
                Some(GenerationConfig {
                    temperature,
                    max_output_tokens: opts.max_tokens,
                    top_p: opts.top_p,
                })
            };

        GenerateContentRequest {
            contents,
            system_instruction: if system_parts.is_empty() {
                None
            } else {
                Some(GeminiSystemInstruction {
                    parts: system_parts,
                })
            },
            generation_config,
        }
    }
}

/// Join the text parts of the first candidate, the way the SDK's `response.text` does.
fn extract_text(body: GenerateContentResponse) -> Result<String, LlmError> {
    let Some(candidate) = body.candidates.into_iter().next() else {
        let reason = body
            .prompt_feedback
            .and_then(|f| f.block_reason)
            .unwrap_or_else(|| "no candidates returned".to_string());
        return Err(LlmError::Blocked(reason));
    };

    let parts = candidate
        .content
        .map(|c| c.parts)
        .filter(|parts| !parts.is_empty());

    match parts {
        Some(parts) => Ok(parts.into_iter().filter_map(|p| p.text).collect::<String>()),
        None => Err(LlmError::Blocked(
            candidate
                .finish_reason
                .unwrap_or_else(|| "candidate has no content".to_string()),
        )),
    }
}

#[async_trait]
impl LlmProvider for GeminiClient {
    async fn chat(
        &self,
        messages: Vec<Message>,
        options: Option<LlmParams>,
    ) -> Result<String, LlmError> {
        let url = format!("{}/models/{}:generateContent", self.base_url, self.model);
        let request_body = self.build_request(messages, options.unwrap_or_default());

        tracing::debug!(
            "[LLM] Gemini generateContent: model={}, turns={}",
            self.model,
            request_body.contents.len()
        );

        let response = self
            .client
            .post(&url)
            .query(&[("key", self.api_key.as_str())])
            .json(&request_body)
            .send()
            .await
            .map_err(|e| LlmError::RequestFailed(e.without_url().to_string()))?;

        let response = ensure_success(response, "Gemini")
            .await
            .map_err(LlmError::Api)?;

        let body: GenerateContentResponse = response
            .json()
            .await
            .map_err(|e| LlmError::InvalidResponse(e.without_url().to_string()))?;

        extract_text(body)
    }

    fn id(&self) -> &str {
        "gemini"
    }
}
