pub mod gemini;
pub mod llm_config;
pub mod openai;
pub mod provider;
pub mod service;

pub use llm_config::LlmConfig;
pub use provider::{LlmError, LlmParams, LlmProvider, Message, Role};
pub use service::build_provider;
