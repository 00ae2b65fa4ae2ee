//! LLM Provider trait: common interface for all chat backends.

use async_trait::async_trait;
use serde::{Deserialize, Serialize};
use thiserror::Error;

// ── Messages ───────────────────────────────────────────

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Role {
    System,
    User,
    Assistant,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Message {
    pub role: Role,
    pub content: String,
}

impl Message {
    pub fn user(content: impl Into<String>) -> Self {
        Self {
            role: Role::User,
            content: content.into(),
        }
    }

    #[cfg(test)]
    pub fn assistant(content: impl Into<String>) -> Self {
        Self {
            role: Role::Assistant,
            content: content.into(),
        }
    }
}

// ── Common Parameters ──────────────────────────────────

#[derive(Debug, Clone, Default)]
pub struct LlmParams {
    pub temperature: Option<f32>,
    pub max_tokens: Option<u32>,
    pub top_p: Option<f32>,
}

// ── Error Types ────────────────────────────────────────

#[derive(Debug, Error)]
pub enum LlmError {
    #[error("Request failed: {0}")]
    RequestFailed(String),
    #[error("{0}")]
    Api(String),
    #[error("Failed to parse response: {0}")]
    InvalidResponse(String),
    #[error("Response was blocked: {0}")]
    Blocked(String),
}

/// Common interface for chat providers (Gemini, OpenAI-compatible).
#[async_trait]
pub trait LlmProvider: Send + Sync {
    /// Non-streaming chat completion. Returns the raw (untrimmed) reply text.
    async fn chat(
        &self,
        messages: Vec<Message>,
        options: Option<LlmParams>,
    ) -> Result<String, LlmError>;

    /// Provider identifier (e.g. "gemini", "openai").
    fn id(&self) -> &str;
}
