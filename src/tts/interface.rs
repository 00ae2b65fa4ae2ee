use async_trait::async_trait;
use serde::{Deserialize, Serialize};
use thiserror::Error;

// ── Error Types ────────────────────────────────────────

#[derive(Debug, Error)]
pub enum TtsError {
    #[error("Synthesis failed: {0}")]
    SynthesisFailed(String),
    #[error("Nothing to synthesize")]
    EmptyText,
    #[error("Failed to write audio to {path}: {source}")]
    Io {
        path: String,
        #[source]
        source: std::io::Error,
    },
}

// ── Synthesis Parameters ───────────────────────────────

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct TtsParams {
    /// BCP-47-ish language code, e.g. "ta" or "en".
    pub language: String,
    pub voice: Option<String>,
    pub speed: Option<f32>,
}

impl TtsParams {
    pub fn for_language(language: impl Into<String>) -> Self {
        Self {
            language: language.into(),
            voice: None,
            speed: None,
        }
    }
}

// ── Provider Trait ──────────────────────────────────────

#[async_trait]
pub trait TtsProvider: Send + Sync {
    /// Unique identifier for this provider (e.g., "google_translate", "openai")
    fn id(&self) -> &str;

    /// Synthesize text to MP3 bytes.
    async fn synthesize(&self, text: &str, params: &TtsParams) -> Result<Vec<u8>, TtsError>;
}
