use serde_json::Value;
use tokio_util::sync::CancellationToken;
use tracing::debug;

use crate::aggregator::{OnChunk, drain_stream};
use crate::error::LLMError;
use crate::prompt::PromptComposer;
use crate::provider::{DynBackend, TextStream};
use crate::types::{ChatMessage, MediaPayload, ModelDescriptor};

/// Streaming chat client bound to one backend.
///
/// The client owns the system prompts and tool descriptions; history is owned
/// by the caller and passed to each call. Cloning is cheap and shares the
/// backend, so a clone can carry its own cancellation token.
#[derive(Clone)]
pub struct ChatClient {
    backend: DynBackend,
    prompts: PromptComposer,
    cancel: Option<CancellationToken>,
}

impl ChatClient {
    pub fn new(backend: DynBackend) -> Self {
        Self {
            backend,
            prompts: PromptComposer::default(),
            cancel: None,
        }
    }

    /// Every later call returns [`LLMError::Aborted`] once `token` is cancelled.
    pub fn with_cancellation_token(mut self, token: CancellationToken) -> Self {
        self.cancel = Some(token);
        self
    }

    pub fn backend_name(&self) -> &'static str {
        self.backend.name()
    }

    /// Appends a system prompt. Empty strings are kept and still take a separator.
    pub fn add_system_prompt(&mut self, prompt: impl Into<String>) {
        self.prompts.add_system_prompt(prompt);
    }

    /// Replaces the tool descriptions appended under the tools heading.
    pub fn set_available_tools(&mut self, tools: Vec<String>) {
        self.prompts.set_tools(tools);
    }

    /// The instruction text the next call will send.
    pub fn system_prompt(&self) -> String {
        self.prompts.compose()
    }

    /// Streams a reply to `history` and returns it trimmed.
    ///
    /// Blank history entries are skipped; the rest are sent trimmed, in order,
    /// after the instruction turn. `on_chunk` sees every fragment as it arrives.
    pub async fn send_chat(
        &self,
        history: &[ChatMessage],
        model: Option<&str>,
        on_chunk: Option<&mut OnChunk<'_>>,
    ) -> Result<String, LLMError> {
        let mut turns = self.leading_turns();
        turns.extend(history.iter().filter_map(|message| {
            message
                .trimmed_content()
                .map(|content| self.backend.text_turn(&message.role, content))
        }));

        self.run(turns, model, on_chunk).await
    }

    /// Streams a reply to a single user turn holding an optional prompt and one
    /// media attachment.
    ///
    /// Strings starting with `http://` or `https://` are sent by reference;
    /// anything else is taken to be base64 data of type `mime_type`.
    pub async fn send_media(
        &self,
        media: impl Into<MediaPayload>,
        mime_type: &str,
        prompt: Option<&str>,
        model: Option<&str>,
        on_chunk: Option<&mut OnChunk<'_>>,
    ) -> Result<String, LLMError> {
        let media = media.into();
        let mut turns = self.leading_turns();
        turns.push(self.backend.media_turn(&media, mime_type, prompt));

        self.run(turns, model, on_chunk).await
    }

    /// Lists the models the backend exposes. Not cached.
    pub async fn get_available_models(&self) -> Result<Vec<ModelDescriptor>, LLMError> {
        debug!(backend = self.backend.name(), "listing models");
        self.backend.list_models().await
    }

    fn leading_turns(&self) -> Vec<Value> {
        self.prompts
            .instruction()
            .map(|instruction| self.backend.instruction_turn(&instruction))
            .into_iter()
            .collect()
    }

    async fn run(
        &self,
        turns: Vec<Value>,
        model: Option<&str>,
        on_chunk: Option<&mut OnChunk<'_>>,
    ) -> Result<String, LLMError> {
        let model = model.unwrap_or_else(|| self.backend.default_model());
        debug!(
            backend = self.backend.name(),
            model,
            instruction_len = self.prompts.compose().len(),
            turns = turns.len(),
            "sending chat request"
        );

        let stream = self.open(model, turns).await?;
        let text = drain_stream(stream, on_chunk, self.cancel.as_ref()).await?;
        Ok(text.trim().to_string())
    }

    async fn open(&self, model: &str, turns: Vec<Value>) -> Result<TextStream, LLMError> {
        let Some(token) = &self.cancel else {
            return self.backend.open_stream(model, turns).await;
        };
        tokio::select! {
            biased;
            _ = token.cancelled() => Err(LLMError::Aborted {
                message: "request cancelled before the stream opened".to_string(),
            }),
            result = self.backend.open_stream(model, turns) => result,
        }
    }
}
