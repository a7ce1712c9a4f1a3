//! OpenAI Chat Completions backend (`/chat/completions`, `/models`).
//!
//! Works against any OpenAI-compatible server reachable through a custom base URL.

mod error;
mod provider;
mod request;
mod stream;
mod types;

pub use provider::OpenAiChatBackend;
