//! Google Gemini GenerateContent adapter.
//!
//! Requests go to `streamGenerateContent?alt=sse`; the composed instructions ride
//! as a leading user turn and assistant history is sent under the `model` role.

mod error;
mod provider;
mod request;
mod settings;
mod stream;
mod types;

pub use provider::GoogleGeminiBackend;
pub use settings::{
    DYNAMIC_THINKING_BUDGET, GeminiSettings, HarmBlockThreshold, HarmCategory, SafetySetting,
};
