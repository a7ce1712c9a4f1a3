use std::pin::Pin;
use std::sync::Arc;

use async_trait::async_trait;
use futures_core::Stream;
use serde_json::Value;

use crate::error::LLMError;
use crate::types::{MediaPayload, ModelDescriptor, Role, StreamChunk};

pub mod google_gemini;
pub mod openai_chat;
pub(crate) mod retry;

/// Ordered text fragments decoded from one streaming response.
pub type TextStream = Pin<Box<dyn Stream<Item = Result<StreamChunk, LLMError>> + Send>>;

/// One remote chat API.
///
/// A backend only shapes provider-native JSON turns and decodes its own stream;
/// prompt composition, history filtering and aggregation live in
/// [`crate::client::ChatClient`] and are shared by every backend.
#[async_trait]
pub trait ChatBackend: Send + Sync {
    /// Stable backend identifier, e.g. `openai_chat`.
    fn name(&self) -> &'static str;

    /// Model used when a call does not name one.
    fn default_model(&self) -> &str;

    /// Backend role name for a caller role. Unrecognized roles map to the user role.
    fn map_role(&self, role: &Role) -> &'static str;

    /// Leading turn carrying the composed system prompt.
    fn instruction_turn(&self, instruction: &str) -> Value;

    /// A plain text turn for an already trimmed history entry.
    fn text_turn(&self, role: &Role, text: &str) -> Value;

    /// A single user turn holding an optional text prompt followed by one media part.
    fn media_turn(&self, media: &MediaPayload, mime_type: &str, prompt: Option<&str>) -> Value;

    /// Opens a streaming completion for the given turns.
    async fn open_stream(&self, model: &str, turns: Vec<Value>) -> Result<TextStream, LLMError>;

    /// Fetches the first page of the backend's model listing.
    async fn list_models(&self) -> Result<Vec<ModelDescriptor>, LLMError>;
}

/// Thread-safe backend handle.
pub type DynBackend = Arc<dyn ChatBackend>;
