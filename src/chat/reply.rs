use crate::ai::prompts::SONG_REQUEST_PROMPT;
use crate::ai::IntentDecision;
use crate::error::RelayError;
use crate::llm::{LlmProvider, Message};

/// The text actually sent to the model for this intent.
pub fn outgoing_message(decision: IntentDecision, original_message: &str) -> &str {
    match decision {
        IntentDecision::Song => SONG_REQUEST_PROMPT,
        IntentDecision::Voice | IntentDecision::Plain => original_message,
    }
}

/// Ask the model for a reply in a fresh session seeded with the persona prompt.
///
/// Returns the trimmed reply; a blank reply is [`RelayError::EmptyReply`].
pub async fn request_reply(
    provider: &dyn LlmProvider,
    prompt_text: &str,
    decision: IntentDecision,
    original_message: &str,
) -> Result<String, RelayError> {
    let messages = vec![
        Message::user(prompt_text),
        Message::user(outgoing_message(decision, original_message)),
    ];

    let reply = provider.chat(messages, None).await?;
    let reply = reply.trim();
    if reply.is_empty() {
        return Err(RelayError::EmptyReply);
    }
    Ok(reply.to_string())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::llm::{LlmError, LlmParams};
    use async_trait::async_trait;
    use std::sync::Mutex;

    /// Records the messages it receives and replies with a canned string.
    struct ScriptedLlm {
        reply: Result<&'static str, &'static str>,
        seen: Mutex<Vec<Vec<Message>>>,
    }

    impl ScriptedLlm {
        fn replying(reply: &'static str) -> Self {
            Self {
                reply: Ok(reply),
                seen: Mutex::new(Vec::new()),
            }
        }

        fn failing(err: &'static str) -> Self {
            Self {
                reply: Err(err),
                seen: Mutex::new(Vec::new()),
            }
        }
    }

    #[async_trait]
    impl LlmProvider for ScriptedLlm {
        async fn chat(
            &self,
            messages: Vec<Message>,
            _options: Option<LlmParams>,
        ) -> Result<String, LlmError> {
            self.seen.lock().unwrap().push(messages);
            self.reply
                .map(str::to_string)
                .map_err(|e| LlmError::RequestFailed(e.to_string()))
        }

        fn id(&self) -> &str {
            "scripted"
        }
    }

    #[tokio::test]
    async fn song_intent_replaces_the_message() {
        let llm = ScriptedLlm::replying("la la la");
        let text = request_reply(&llm, "PROMPT", IntentDecision::Song, "Can you sing for me?")
            .await
            .unwrap();
        assert_eq!(text, "la la la");

        let seen = llm.seen.lock().unwrap();
        assert_eq!(
            seen[0],
            vec![Message::user("PROMPT"), Message::user(SONG_REQUEST_PROMPT)]
        );
    }

    #[tokio::test]
    async fn other_intents_send_the_message_verbatim() {
        let llm = ScriptedLlm::replying("hey");
        request_reply(&llm, "PROMPT", IntentDecision::Voice, "I miss your voice")
            .await
            .unwrap();
        request_reply(&llm, "PROMPT", IntentDecision::Plain, "How was your day?")
            .await
            .unwrap();

        let seen = llm.seen.lock().unwrap();
        assert_eq!(seen[0][1], Message::user("I miss your voice"));
        assert_eq!(seen[1][1], Message::user("How was your day?"));
        // each call is its own two-turn session
        assert!(seen.iter().all(|turns| turns.len() == 2));
    }

    #[tokio::test]
    async fn reply_is_trimmed() {
        let llm = ScriptedLlm::replying("  \n hello \t");
        let text = request_reply(&llm, "P", IntentDecision::Plain, "hi").await.unwrap();
        assert_eq!(text, "hello");
    }

    #[tokio::test]
    async fn blank_reply_is_empty_reply_error() {
        let llm = ScriptedLlm::replying(" \n ");
        let err = request_reply(&llm, "P", IntentDecision::Plain, "hi")
            .await
            .unwrap_err();
        assert!(matches!(err, RelayError::EmptyReply));
    }

    #[tokio::test]
    async fn provider_failure_is_upstream_error() {
        let llm = ScriptedLlm::failing("connection refused");
        let err = request_reply(&llm, "P", IntentDecision::Plain, "hi")
            .await
            .unwrap_err();
        assert!(matches!(err, RelayError::Upstream(ref m) if m.contains("connection refused")));
    }
}
