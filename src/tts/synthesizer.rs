use super::config::TtsConfig;
use super::google_translate::GoogleTranslateTts;
use super::interface::{TtsError, TtsParams, TtsProvider};
use super::openai::OpenAITtsProvider;
use crate::error::RelayError;
use std::path::{Path, PathBuf};
use std::sync::Arc;
use uuid::Uuid;

/// Turns reply text into an audio file on disk.
#[derive(Clone)]
pub struct SpeechSynthesizer {
    provider: Arc<dyn TtsProvider>,
}

impl SpeechSynthesizer {
    pub fn new(provider: Arc<dyn TtsProvider>) -> Self {
        Self { provider }
    }

    pub fn from_config(config: &TtsConfig) -> Result<Self, RelayError> {
        Ok(Self::new(build_provider(config)?))
    }

    pub fn provider_id(&self) -> &str {
        self.provider.id()
    }

    /// Synthesize `text` in `language` and write it to `output_path`, replacing any existing file.
    ///
    /// The audio is written to a temporary sibling and renamed into place, so a
    /// concurrent reader sees either the old file or the new one. Concurrent
    /// writers to the same path still race; the last rename wins.
    pub async fn synthesize_speech(
        &self,
        text: &str,
        output_path: &Path,
        language: &str,
    ) -> Result<PathBuf, TtsError> {
        let params = TtsParams::for_language(language);
        let audio = self.provider.synthesize(text, &params).await?;

        let tmp_path = temp_sibling(output_path);
        if let Err(source) = tokio::fs::write(&tmp_path, &audio).await {
            return Err(TtsError::Io {
                path: tmp_path.display().to_string(),
                source,
            });
        }
        if let Err(source) = tokio::fs::rename(&tmp_path, output_path).await {
            let _ = tokio::fs::remove_file(&tmp_path).await;
            return Err(TtsError::Io {
                path: output_path.display().to_string(),
                source,
            });
        }

        tracing::info!(
            "[TTS] Saved {} bytes to {} (provider={}, lang={})",
            audio.len(),
            output_path.display(),
            self.provider.id(),
            language
        );
        Ok(output_path.to_path_buf())
    }
}

fn temp_sibling(path: &Path) -> PathBuf {
    let name = path
        .file_name()
        .and_then(|n| n.to_str())
        .unwrap_or("audio");
    path.with_file_name(format!(".{}.{}.tmp", name, Uuid::new_v4().simple()))
}

/// Build the TTS provider described by `config`.
pub fn build_provider(config: &TtsConfig) -> Result<Arc<dyn TtsProvider>, RelayError> {
    match config.provider_type.as_str() {
        "google_translate" => {
            tracing::info!("[TTS] Registering provider: google_translate");
            Ok(Arc::new(GoogleTranslateTts::from_config(config)))
        }
        "openai" => {
            let provider = OpenAITtsProvider::from_config(config).ok_or_else(|| {
                RelayError::Config(
                    "OpenAI TTS provider needs api_key or api_key_env in the tts config"
                        .to_string(),
                )
            })?;
            tracing::info!("[TTS] Registering provider: openai");
            Ok(Arc::new(provider))
        }
        other => Err(RelayError::Config(format!(
            "Unknown TTS provider type: {}",
            other
        ))),
    }
}
