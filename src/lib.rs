//! Streaming chat client over Google Gemini and OpenAI Chat Completions.
//!
//! A [`ChatClient`] composes system prompts and tool descriptions into one
//! instruction block, maps caller history into the backend's wire format and
//! streams the reply back fragment by fragment.

pub mod aggregator;
pub mod client;
pub mod config;
pub mod error;
pub mod http;
pub mod prompt;
pub mod provider;
pub mod stream;
pub mod types;

pub use aggregator::{OnChunk, drain_stream};
pub use client::ChatClient;
pub use config::{ClientConfig, Credential, ProviderKind, build_client};
pub use error::LLMError;
pub use provider::{ChatBackend, DynBackend, TextStream};
pub use tokio_util::sync::CancellationToken;
pub use types::*;
