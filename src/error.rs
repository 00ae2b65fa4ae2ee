use crate::llm::provider::LlmError;
use crate::tts::interface::TtsError;
use thiserror::Error;

/// Message returned to the caller when the model replies with nothing.
pub const EMPTY_REPLY_MESSAGE: &str = "The AI response was empty. Please try again.";

#[derive(Debug, Error)]
pub enum RelayError {
    #[error("{}", EMPTY_REPLY_MESSAGE)]
    EmptyReply,
    #[error("{0}")]
    Upstream(String),
    #[error("{0}")]
    Synthesis(String),
    #[error("Configuration error: {0}")]
    Config(String),
}

impl RelayError {
    /// Text placed in the `error` field of a `/chat` response.
    pub fn user_message(&self) -> String {
        match self {
            RelayError::EmptyReply => EMPTY_REPLY_MESSAGE.to_string(),
            other => format!("Something went wrong: {}", other),
        }
    }
}

impl From<LlmError> for RelayError {
    fn from(e: LlmError) -> Self {
        RelayError::Upstream(e.to_string())
    }
}

impl From<TtsError> for RelayError {
    fn from(e: TtsError) -> Self {
        RelayError::Synthesis(e.to_string())
    }
}
