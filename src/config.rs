//! Shared config utilities for loading JSON config files
//! and resolving API keys from fields or environment variables.

use crate::error::RelayError;
use crate::llm::llm_config::LlmConfig;
use crate::tts::config::TtsConfig;
use serde::de::DeserializeOwned;
use serde::{Deserialize, Serialize};
use std::net::SocketAddr;
use std::path::{Path, PathBuf};

/// Environment variable naming the JSON config file.
pub const CONFIG_PATH_ENV: &str = "RELAY_CONFIG";
pub const DEFAULT_CONFIG_PATH: &str = "relay_config.json";

// ── Server / Audio ─────────────────────────────────────

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ServerConfig {
    #[serde(default = "default_host")]
    pub host: String,
    #[serde(default = "default_port")]
    pub port: u16,
}

impl Default for ServerConfig {
    fn default() -> Self {
        Self {
            host: default_host(),
            port: default_port(),
        }
    }
}

impl ServerConfig {
    pub fn socket_addr(&self) -> Result<SocketAddr, RelayError> {
        format!("{}:{}", self.host, self.port)
            .parse()
            .map_err(|e| RelayError::Config(format!("Invalid bind address: {}", e)))
    }
}

fn default_host() -> String {
    "0.0.0.0".to_string()
}

fn default_port() -> u16 {
    8000
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AudioConfig {
    #[serde(default = "default_audio_dir")]
    pub dir: PathBuf,
}

impl Default for AudioConfig {
    fn default() -> Self {
        Self {
            dir: default_audio_dir(),
        }
    }
}

fn default_audio_dir() -> PathBuf {
    PathBuf::from("audio")
}

// ── Top-Level Config ───────────────────────────────────

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct AppConfig {
    #[serde(default)]
    pub server: ServerConfig,
    #[serde(default)]
    pub audio: AudioConfig,
    #[serde(default)]
    pub llm: LlmConfig,
    #[serde(default)]
    pub tts: TtsConfig,
}

impl AppConfig {
    /// Load from the path in `RELAY_CONFIG`, or `relay_config.json` in the working directory.
    pub fn load() -> Self {
        let path = std::env::var(CONFIG_PATH_ENV)
            .map(PathBuf::from)
            .unwrap_or_else(|_| PathBuf::from(DEFAULT_CONFIG_PATH));
        load_json_config(&path, "Config")
    }
}

/// Generic load for any Serde config type with a `Default` implementation.
/// Falls back to `T::default()` if the file is missing or unparsable.
pub fn load_json_config<T: DeserializeOwned + Default>(path: &Path, label: &str) -> T {
    match std::fs::read_to_string(path) {
        Ok(content) => match serde_json::from_str::<T>(&content) {
            Ok(config) => {
                tracing::info!("[{}] Loaded config from {}", label, path.display());
                config
            }
            Err(e) => {
                tracing::warn!(
                    "[{}] Failed to parse config {}: {}, using defaults",
                    label,
                    path.display(),
                    e
                );
                T::default()
            }
        },
        Err(_) => {
            tracing::info!(
                "[{}] No config file at {}, using defaults",
                label,
                path.display()
            );
            T::default()
        }
    }
}

/// Resolve an API key: check the direct `api_key` field first,
/// then fall back to reading the environment variable named in `api_key_env`.
pub fn resolve_api_key(api_key: &Option<String>, api_key_env: &Option<String>) -> Option<String> {
    if let Some(ref key) = api_key {
        if !key.is_empty() {
            return Some(key.clone());
        }
    }
    if let Some(ref env_var) = api_key_env {
        if let Ok(key) = std::env::var(env_var) {
            if !key.is_empty() {
                return Some(key);
            }
        }
    }
    None
}

/// Like [`resolve_api_key`] but a missing key is a fatal startup error.
pub fn require_api_key(
    api_key: &Option<String>,
    api_key_env: &Option<String>,
    label: &str,
) -> Result<String, RelayError> {
    resolve_api_key(api_key, api_key_env).ok_or_else(|| {
        let source = api_key_env.as_deref().unwrap_or("api_key");
        RelayError::Config(format!(
            "{} API key not found. Make sure {} is set in your environment or .env file.",
            label, source
        ))
    })
}
