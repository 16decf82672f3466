// src/relay/mod.rs
// =============================================================================
// The chat relay: takes a user's question, wraps it together with the
// crawled corpus into a prompt, and forwards it to the Gemini completion API.
//
// Submodules:
// - prompt: builds the prompt text
// - gemini: HTTP client for generateContent
// - chat: ChatRelay, which ties the two to a corpus
// =============================================================================

mod chat;
mod gemini;
mod prompt;

pub use chat::ChatRelay;
pub use gemini::{GeminiClient, DEFAULT_MODEL};
pub use prompt::build_prompt;
