//! Google Translate speech endpoint (the one gTTS talks to).
//!
//! The endpoint only accepts short inputs, so text is split into chunks of at
//! most [`MAX_CHUNK_CHARS`] characters. Each chunk comes back as a standalone
//! MP3 stream; MP3 frames concatenate cleanly, so the chunks are joined in order.

use async_trait::async_trait;
use futures::stream::{self, StreamExt, TryStreamExt};
use reqwest::Client;
use std::future::Future;
use std::time::Duration;

use super::config::TtsConfig;
use super::interface::{TtsError, TtsParams, TtsProvider};
use crate::utils::http::{build_client, ensure_success, timeout_from_secs};

pub const DEFAULT_BASE_URL: &str = "https://translate.google.com";
pub const MAX_CHUNK_CHARS: usize = 100;
/// Chunk requests in flight at once. The endpoint rate-limits bursts.
pub const MAX_CONCURRENT_CHUNKS: usize = 2;

const USER_AGENT: &str = "Mozilla/5.0 (X11; Linux x86_64) AppleWebKit/537.36 (KHTML, like Gecko)";

/// Sentence-ending and clause punctuation; chunks prefer to break after these.
const BREAK_CHARS: &[char] = &['.', '?', '!', ';', ':', ',', '…', '।', '。', '、', '！', '？'];

pub struct GoogleTranslateTts {
    client: Client,
    base_url: String,
}

impl GoogleTranslateTts {
    pub fn new(base_url: Option<String>, timeout: Option<Duration>) -> Self {
        Self {
            client: build_client(timeout),
            base_url: base_url
                .unwrap_or_else(|| DEFAULT_BASE_URL.to_string())
                .trim_end_matches('/')
                .to_string(),
        }
    }

    pub fn from_config(config: &TtsConfig) -> Self {
        Self::new(config.base_url.clone(), timeout_from_secs(config.timeout_secs))
    }

    async fn fetch_chunk(
        &self,
        chunk: &str,
        language: &str,
        idx: usize,
        total: usize,
    ) -> Result<Vec<u8>, TtsError> {
        let url = format!("{}/translate_tts", self.base_url);
        let total = total.to_string();
        let idx = idx.to_string();
        let textlen = chunk.chars().count().to_string();

        let response = self
            .client
            .get(&url)
            .header(reqwest::header::USER_AGENT, USER_AGENT)
            .query(&[
                ("ie", "UTF-8"),
                ("q", chunk),
                ("tl", language),
                ("client", "tw-ob"),
                ("total", total.as_str()),
                ("idx", idx.as_str()),
                ("textlen", textlen.as_str()),
            ])
            .send()
            .await
            .map_err(|e| TtsError::SynthesisFailed(format!("Google TTS request failed: {}", e)))?;

        let response = ensure_success(response, "Google TTS")
            .await
            .map_err(TtsError::SynthesisFailed)?;

        let bytes = response
            .bytes()
            .await
            .map_err(|e| TtsError::SynthesisFailed(format!("Google TTS bytes error: {}", e)))?;
        Ok(bytes.to_vec())
    }
}

#[async_trait]
impl TtsProvider for GoogleTranslateTts {
    fn id(&self) -> &str {
        "google_translate"
    }

    async fn synthesize(&self, text: &str, params: &TtsParams) -> Result<Vec<u8>, TtsError> {
        let chunks = split_text(text, MAX_CHUNK_CHARS);
        if chunks.is_empty() {
            return Err(TtsError::EmptyText);
        }

        tracing::debug!(
            "[TTS] Google TTS: lang={}, chunks={}",
            params.language,
            chunks.len()
        );

        let total = chunks.len();
        let chunks = &chunks;
        let language = params.language.as_str();
        let parts = fetch_in_order(total, MAX_CONCURRENT_CHUNKS, move |idx| {
            self.fetch_chunk(&chunks[idx], language, idx, total)
        })
        .await?;

        Ok(parts.concat())
    }
}

/// Run `fetch(0..count)` with at most `limit` in flight, keeping results in index order.
async fn fetch_in_order<T, F, Fut>(count: usize, limit: usize, fetch: F) -> Result<Vec<T>, TtsError>
where
    F: FnMut(usize) -> Fut,
    Fut: Future<Output = Result<T, TtsError>>,
{
    stream::iter((0..count).map(fetch))
        .buffered(limit.max(1))
        .try_collect()
        .await
}

/// Split text into chunks of at most `max_chars` characters.
///
/// Breaks after punctuation first, then between words; a single word longer
/// than the limit is cut hard. Whitespace is normalized to single spaces and
/// empty chunks are never produced.
pub fn split_text(text: &str, max_chars: usize) -> Vec<String> {
    let max_chars = max_chars.max(1);
    let mut chunks = Vec::new();

    for segment in text.split_inclusive(BREAK_CHARS) {
        let mut current = String::new();
        let mut current_len = 0;

        for word in segment.split_whitespace() {
            let word_len = word.chars().count();

            if word_len > max_chars {
                if current_len > 0 {
                    chunks.push(std::mem::take(&mut current));
                    current_len = 0;
                }
                let chars: Vec<char> = word.chars().collect();
                for piece in chars.chunks(max_chars) {
                    chunks.push(piece.iter().collect());
                }
            } else if current_len == 0 {
                current.push_str(word);
                current_len = word_len;
            } else if current_len + 1 + word_len <= max_chars {
                current.push(' ');
                current.push_str(word);
                current_len += 1 + word_len;
            } else {
                chunks.push(std::mem::replace(&mut current, word.to_string()));
                current_len = word_len;
            }
        }

        if current_len > 0 {
            chunks.push(current);
        }
    }

    chunks
}

#[cfg(test)]
mod tests {
    use super::*;
    use proptest::prelude::*;
    use wiremock::matchers::{method, path, query_param};
    use wiremock::{Mock, MockServer, ResponseTemplate};

    #[test]
    fn short_text_is_one_chunk() {
        assert_eq!(split_text("Hello there", 100), vec!["Hello there"]);
    }

    #[test]
    fn breaks_after_punctuation() {
        assert_eq!(
            split_text("Hi. How are you? Fine", 100),
            vec!["Hi.", "How are you?", "Fine"]
        );
    }

    #[test]
    fn packs_words_up_to_the_limit() {
        let chunks = split_text("aaa bbb ccc ddd", 7);
        assert_eq!(chunks, vec!["aaa bbb", "ccc ddd"]);
    }

    #[test]
    fn long_word_is_cut_hard() {
        let chunks = split_text("abcdefghij", 4);
        assert_eq!(chunks, vec!["abcd", "efgh", "ij"]);
    }

    #[test]
    fn counts_chars_not_bytes() {
        // Tamil script is three bytes per char in UTF-8
        let text = "வணக்கம் ".repeat(20);
        for chunk in split_text(&text, 30) {
            assert!(chunk.chars().count() <= 30, "chunk too long: {}", chunk);
        }
    }

    #[test]
    fn whitespace_only_yields_nothing() {
        assert!(split_text("  \n\t ", 100).is_empty());
        assert!(split_text("", 100).is_empty());
    }

    proptest! {
        #[test]
        fn chunks_respect_limit_and_keep_content(text in "\\PC{0,400}", max in 1usize..120) {
            let chunks = split_text(&text, max);
            for chunk in &chunks {
                prop_assert!(!chunk.is_empty());
                prop_assert!(chunk.chars().count() <= max);
            }
            let joined: String = chunks.concat().chars().filter(|c| !c.is_whitespace()).collect();
            let original: String = text.chars().filter(|c| !c.is_whitespace()).collect();
            prop_assert_eq!(joined, original);
        }
    }

    #[tokio::test]
    async fn chunks_are_fetched_and_joined_in_order() {
        let server = MockServer::start().await;
        Mock::given(method("GET"))
            .and(path("/translate_tts"))
            .and(query_param("tl", "ta"))
            .and(query_param("client", "tw-ob"))
            .and(query_param("idx", "0"))
            .and(query_param("total", "2"))
            .respond_with(ResponseTemplate::new(200).set_body_bytes(b"AAA".to_vec()))
            .mount(&server)
            .await;
        Mock::given(method("GET"))
            .and(path("/translate_tts"))
            .and(query_param("idx", "1"))
            .respond_with(ResponseTemplate::new(200).set_body_bytes(b"BBB".to_vec()))
            .mount(&server)
            .await;

        let tts = GoogleTranslateTts::new(Some(server.uri()), None);
        let text = format!("{}. {}", "a".repeat(60), "b".repeat(60));
        let audio = tts
            .synthesize(&text, &TtsParams::for_language("ta"))
            .await
            .unwrap();
        assert_eq!(audio, b"AAABBB");
    }

    #[tokio::test]
    async fn chunk_fetches_are_bounded_and_ordered() {
        use std::sync::atomic::{AtomicUsize, Ordering};

        let in_flight = AtomicUsize::new(0);
        let peak = AtomicUsize::new(0);
        let results = fetch_in_order(8, MAX_CONCURRENT_CHUNKS, |idx| {
            let in_flight = &in_flight;
            let peak = &peak;
            async move {
                let now = in_flight.fetch_add(1, Ordering::SeqCst) + 1;
                peak.fetch_max(now, Ordering::SeqCst);
                // later chunks finish first
                tokio::time::sleep(Duration::from_millis(40 - 5 * idx as u64)).await;
                in_flight.fetch_sub(1, Ordering::SeqCst);
                Ok::<_, TtsError>(idx)
            }
        })
        .await
        .unwrap();

        assert_eq!(results, (0..8).collect::<Vec<_>>());
        assert!(peak.load(Ordering::SeqCst) <= MAX_CONCURRENT_CHUNKS);
        assert!(peak.load(Ordering::SeqCst) > 1);
    }

    #[tokio::test]
    async fn long_reply_never_bursts_the_endpoint() {
        let server = MockServer::start().await;
        Mock::given(method("GET"))
            .and(path("/translate_tts"))
            .respond_with(
                ResponseTemplate::new(200)
                    .set_body_bytes(b"x".to_vec())
                    .set_delay(Duration::from_millis(50)),
            )
            .expect(6)
            .mount(&server)
            .await;

        let tts = GoogleTranslateTts::new(Some(server.uri()), None);
        let text = vec!["a".repeat(90); 6].join(". ");
        let started = std::time::Instant::now();
        let audio = tts
            .synthesize(&text, &TtsParams::for_language("ta"))
            .await
            .unwrap();

        assert_eq!(audio, b"xxxxxx");
        // 6 chunks, 2 at a time, 50ms each
        assert!(started.elapsed() >= Duration::from_millis(150));
    }

    #[tokio::test]
    async fn failed_chunk_fails_the_whole_synthesis() {
        let server = MockServer::start().await;
        Mock::given(method("GET"))
            .respond_with(ResponseTemplate::new(429).set_body_string("Too Many Requests"))
            .mount(&server)
            .await;

        let tts = GoogleTranslateTts::new(Some(server.uri()), None);
        let err = tts
            .synthesize("hello", &TtsParams::for_language("en"))
            .await
            .unwrap_err();
        assert!(err.to_string().contains("429"), "{}", err);
    }

    #[tokio::test]
    async fn empty_text_is_rejected_without_a_request() {
        let server = MockServer::start().await;
        Mock::given(method("GET"))
            .respond_with(ResponseTemplate::new(200))
            .expect(0)
            .mount(&server)
            .await;

        let tts = GoogleTranslateTts::new(Some(server.uri()), None);
        let err = tts
            .synthesize("   ", &TtsParams::for_language("en"))
            .await
            .unwrap_err();
        assert!(matches!(err, TtsError::EmptyText));
    }
}
