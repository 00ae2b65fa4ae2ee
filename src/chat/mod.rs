//! Per-request chat flow: persona + intent -> reply -> optional speech.

pub mod orchestrator;
pub mod reply;

use crate::ai::prompts::DEFAULT_PERSONA;
use serde::{Deserialize, Serialize};

pub use orchestrator::ChatOrchestrator;
pub use reply::request_reply;

/// Body of `POST /chat`.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ChatRequest {
    pub message: String,
    #[serde(default = "default_mode")]
    pub mode: String,
}

fn default_mode() -> String {
    DEFAULT_PERSONA.to_string()
}

/// Body returned by `POST /chat`. Always sent with status 200.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum ChatResponse {
    Reply {
        response: String,
        #[serde(default, skip_serializing_if = "Option::is_none")]
        audio_url: Option<String>,
    },
    Error {
        error: String,
    },
}

impl ChatResponse {
    pub fn text(response: String) -> Self {
        ChatResponse::Reply {
            response,
            audio_url: None,
        }
    }

    pub fn with_audio(response: String, audio_url: String) -> Self {
        ChatResponse::Reply {
            response,
            audio_url: Some(audio_url),
        }
    }

    pub fn error(message: impl Into<String>) -> Self {
        ChatResponse::Error {
            error: message.into(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn mode_defaults_to_sweet() {
        let req: ChatRequest = serde_json::from_value(json!({ "message": "hi" })).unwrap();
        assert_eq!(req.mode, "sweet");
    }

    #[test]
    fn response_shapes() {
        assert_eq!(
            serde_json::to_value(ChatResponse::text("hi".into())).unwrap(),
            json!({ "response": "hi" })
        );
        assert_eq!(
            serde_json::to_value(ChatResponse::with_audio("hi".into(), "/audio/talk.mp3".into()))
                .unwrap(),
            json!({ "response": "hi", "audio_url": "/audio/talk.mp3" })
        );
        assert_eq!(
            serde_json::to_value(ChatResponse::error("nope")).unwrap(),
            json!({ "error": "nope" })
        );
    }

    #[test]
    fn error_body_parses_back_as_error() {
        let parsed: ChatResponse = serde_json::from_value(json!({ "error": "x" })).unwrap();
        assert_eq!(parsed, ChatResponse::error("x"));
    }
}
