use crate::chat::ChatOrchestrator;
use crate::llm::gemini::GeminiClient;
use crate::tts::google_translate::GoogleTranslateTts;
use crate::tts::SpeechSynthesizer;
use serde_json::{json, Value};
use std::net::SocketAddr;
use std::path::PathBuf;
use std::sync::Arc;
use tempfile::TempDir;
use tokio::sync::oneshot;
use wiremock::matchers::{method, path};
use wiremock::{Mock, MockServer, Request, ResponseTemplate};

pub const GEMINI_PATH: &str = "/v1beta/models/gemini-1.5-pro:generateContent";

// ── Server setup helpers ────────────────────────────────────

/// A relay bound to an ephemeral port with its own audio directory.
/// Shuts down when dropped.
pub struct TestRelay {
    pub addr: SocketAddr,
    pub audio_dir: PathBuf,
    _tmp: TempDir,
    shutdown: Option<oneshot::Sender<()>>,
}

impl TestRelay {
    pub fn url(&self, path: &str) -> String {
        format!("http://{}{}", self.addr, path)
    }
}

impl Drop for TestRelay {
    fn drop(&mut self) {
        if let Some(tx) = self.shutdown.take() {
            let _ = tx.send(());
        }
    }
}

/// Start a relay whose Gemini and Google TTS clients point at the given mock servers.
pub async fn start_relay(llm: &MockServer, tts: &MockServer) -> TestRelay {
    start_relay_with_urls(&format!("{}/v1beta", llm.uri()), &tts.uri()).await
}

pub async fn start_relay_with_urls(llm_base: &str, tts_base: &str) -> TestRelay {
    let tmp = TempDir::new().expect("failed to create temp dir");
    let audio_dir = tmp.path().join("audio");
    std::fs::create_dir_all(&audio_dir).unwrap();

    let llm = GeminiClient::new("test-key".to_string(), Some(llm_base.to_string()), None, None);
    let tts = GoogleTranslateTts::new(Some(tts_base.to_string()), None);
    let orchestrator = ChatOrchestrator::new(
        Arc::new(llm),
        SpeechSynthesizer::new(Arc::new(tts)),
        audio_dir.clone(),
    )
    .with_languages("ta", "ta");

    let (tx, rx) = oneshot::channel::<()>();
    let (addr, server) = crate::server::bind(
        Arc::new(orchestrator),
        SocketAddr::from(([127, 0, 0, 1], 0)),
        async {
            let _ = rx.await;
        },
    )
    .expect("failed to bind test relay");
    tokio::spawn(server);

    TestRelay {
        addr,
        audio_dir,
        _tmp: tmp,
        shutdown: Some(tx),
    }
}

/// Client that bypasses any system proxy so localhost mocks are reachable.
pub fn client() -> reqwest::Client {
    reqwest::Client::builder().no_proxy().build().unwrap()
}

pub async fn post_chat(relay: &TestRelay, body: Value) -> (u16, Value) {
    let resp = client()
        .post(relay.url("/chat"))
        .json(&body)
        .send()
        .await
        .unwrap();
    let status = resp.status().as_u16();
    let json = resp.json::<Value>().await.unwrap();
    (status, json)
}

// ── Upstream mocks ──────────────────────────────────────────

/// A Gemini `generateContent` body with a single text candidate.
pub fn gemini_reply(text: &str) -> Value {
    json!({
        "candidates": [{
            "content": { "role": "model", "parts": [{ "text": text }] },
            "finishReason": "STOP"
        }]
    })
}

/// Text of turn `idx` in a recorded Gemini request.
pub fn turn_text(req: &Request, idx: usize) -> Option<String> {
    let body: Value = serde_json::from_slice(&req.body).ok()?;
    body["contents"][idx]["parts"][0]["text"]
        .as_str()
        .map(str::to_string)
}

pub async fn mount_gemini_reply(server: &MockServer, text: &str) {
    Mock::given(method("POST"))
        .and(path(GEMINI_PATH))
        .respond_with(ResponseTemplate::new(200).set_body_json(gemini_reply(text)))
        .mount(server)
        .await;
}

pub async fn mount_tts_audio(server: &MockServer, audio: &[u8]) {
    Mock::given(method("GET"))
        .and(path("/translate_tts"))
        .respond_with(ResponseTemplate::new(200).set_body_bytes(audio.to_vec()))
        .mount(server)
        .await;
}
