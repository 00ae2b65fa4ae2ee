pub mod config;
pub mod google_translate;
pub mod interface;
pub mod openai;
pub mod synthesizer;

pub use config::TtsConfig;
pub use interface::{TtsError, TtsParams, TtsProvider};
pub use synthesizer::SpeechSynthesizer;
