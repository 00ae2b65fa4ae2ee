use super::reply::request_reply;
use super::{ChatRequest, ChatResponse};
use crate::ai::persona::is_known_persona;
use crate::ai::prompts::DEFAULT_PERSONA;
use crate::ai::{classify_intent, resolve_persona, IntentDecision};
use crate::error::RelayError;
use crate::llm::LlmProvider;
use crate::tts::SpeechSynthesizer;
use std::path::{Path, PathBuf};
use std::sync::Arc;
use tracing::Instrument;
use uuid::Uuid;

/// URL prefix under which the audio directory is served.
pub const AUDIO_ROUTE: &str = "audio";
pub const SONG_AUDIO_FILE: &str = "song.mp3";
pub const TALK_AUDIO_FILE: &str = "talk.mp3";

/// Runs one `/chat` request from persona lookup to optional speech.
pub struct ChatOrchestrator {
    llm: Arc<dyn LlmProvider>,
    synthesizer: SpeechSynthesizer,
    audio_dir: PathBuf,
    song_language: String,
    talk_language: String,
}

impl ChatOrchestrator {
    pub fn new(
        llm: Arc<dyn LlmProvider>,
        synthesizer: SpeechSynthesizer,
        audio_dir: PathBuf,
    ) -> Self {
        Self {
            llm,
            synthesizer,
            audio_dir,
            song_language: "ta".to_string(),
            talk_language: "ta".to_string(),
        }
    }

    pub fn with_languages(
        mut self,
        song_language: impl Into<String>,
        talk_language: impl Into<String>,
    ) -> Self {
        self.song_language = song_language.into();
        self.talk_language = talk_language.into();
        self
    }

    pub fn audio_dir(&self) -> &Path {
        &self.audio_dir
    }

    /// Handle a request. Every failure becomes a `{ "error": ... }` body.
    pub async fn handle(&self, req: &ChatRequest) -> ChatResponse {
        let span = tracing::info_span!("chat", request_id = %Uuid::new_v4().simple());
        async {
            match self.process(req).await {
                Ok(response) => response,
                Err(e) => {
                    tracing::error!("[Chat] Request failed: {}", e);
                    ChatResponse::error(e.user_message())
                }
            }
        }
        .instrument(span)
        .await
    }

    async fn process(&self, req: &ChatRequest) -> Result<ChatResponse, RelayError> {
        if !is_known_persona(&req.mode) {
            tracing::debug!("[Chat] Unknown mode {:?}, using {}", req.mode, DEFAULT_PERSONA);
        }
        let prompt = resolve_persona(&req.mode);
        let decision = classify_intent(&req.message);
        tracing::info!("[Chat] mode={} intent={:?}", req.mode, decision);

        let text = request_reply(self.llm.as_ref(), prompt, decision, &req.message).await?;
        tracing::debug!("[Chat] reply has {} chars", text.chars().count());

        let (file_name, language) = match decision {
            IntentDecision::Song => (SONG_AUDIO_FILE, self.song_language.as_str()),
            IntentDecision::Voice => (TALK_AUDIO_FILE, self.talk_language.as_str()),
            IntentDecision::Plain => return Ok(ChatResponse::text(text)),
        };

        let output_path = self.audio_dir.join(file_name);
        self.synthesizer
            .synthesize_speech(&text, &output_path, language)
            .await?;

        Ok(ChatResponse::with_audio(text, audio_url(file_name)))
    }
}

pub fn audio_url(file_name: &str) -> String {
    format!("/{}/{}", AUDIO_ROUTE, file_name)
}
