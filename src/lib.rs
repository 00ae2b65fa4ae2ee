pub mod ai;
pub mod chat;
pub mod config;
pub mod error;
pub mod llm;
pub mod server;
pub mod tts;
pub mod utils;

use crate::chat::ChatOrchestrator;
use crate::config::AppConfig;
use crate::tts::SpeechSynthesizer;
use anyhow::Context;
use std::sync::Arc;
use tracing_subscriber::EnvFilter;

/// Load config, build providers, and serve until Ctrl-C.
pub async fn run() -> anyhow::Result<()> {
    dotenv::dotenv().ok();

    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")))
        .init();

    let config = AppConfig::load();

    // Missing credentials fail here, not on the first request
    let llm = llm::build_provider(&config.llm)?;
    let synthesizer = SpeechSynthesizer::from_config(&config.tts)?;
    tracing::info!(
        "[Relay] LLM provider: {}, TTS provider: {}",
        llm.id(),
        synthesizer.provider_id()
    );
    tracing::debug!(
        "[Relay] Personas: {}",
        ai::persona::persona_keys().collect::<Vec<_>>().join(", ")
    );

    tokio::fs::create_dir_all(&config.audio.dir)
        .await
        .with_context(|| format!("creating audio dir {}", config.audio.dir.display()))?;

    let orchestrator = ChatOrchestrator::new(llm, synthesizer, config.audio.dir.clone())
        .with_languages(config.tts.song_language.clone(), config.tts.talk_language.clone());

    let addr = config.server.socket_addr()?;
    let (bound, server) = server::bind(Arc::new(orchestrator), addr, shutdown_signal())?;
    tracing::info!("[Relay] Listening on http://{}", bound);

    server.await;
    tracing::info!("[Relay] Shut down");
    Ok(())
}

async fn shutdown_signal() {
    if let Err(e) = tokio::signal::ctrl_c().await {
        tracing::warn!("[Relay] Failed to listen for Ctrl-C: {}", e);
        std::future::pending::<()>().await;
    }
}
