pub mod intent;
pub mod persona;
pub mod prompts;


pub use intent::{classify_intent, IntentDecision};
pub use persona::resolve_persona;
