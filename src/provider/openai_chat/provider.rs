use std::collections::HashMap;

use async_trait::async_trait;
use serde_json::Value;
use tracing::{debug, warn};

use crate::error::LLMError;
use crate::http::{
    DynHttpTransport, HttpResponse, HttpStreamResponse, get_with_headers,
    post_json_stream_with_headers,
};
use crate::provider::retry::retry_after_from_headers;
use crate::provider::{ChatBackend, TextStream};
use crate::stream::{collect_stream_text, text_stream};
use crate::types::{MediaPayload, ModelDescriptor, Role};

use super::error::parse_openai_error;
use super::request::{build_openai_body, map_role, media_message, system_message, text_message};
use super::stream::parse_openai_chunk;
use super::types::OpenAiModelList;

const DEFAULT_BASE_URL: &str = "https://api.openai.com/v1";
const DEFAULT_MODEL: &str = "gpt-4o-mini";

/// OpenAI Chat Completions backend.
///
/// Instructions travel as a leading `system` message and media as an `image_url`
/// content part.
pub struct OpenAiChatBackend {
    pub(crate) transport: DynHttpTransport,
    pub(crate) base_url: String,
    pub(crate) api_key: String,
    pub(crate) organization: Option<String>,
    pub(crate) project: Option<String>,
    pub(crate) default_model: String,
}

impl OpenAiChatBackend {
    /// Creates a backend targeting `https://api.openai.com/v1`.
    pub fn new(transport: DynHttpTransport, api_key: impl Into<String>) -> Self {
        Self {
            transport,
            base_url: DEFAULT_BASE_URL.to_string(),
            api_key: api_key.into(),
            organization: None,
            project: None,
            default_model: DEFAULT_MODEL.to_string(),
        }
    }

    /// Points at a compatible server. The URL should include the API version
    /// segment (e.g. `http://localhost:11434/v1`); one trailing slash is dropped.
    pub fn with_base_url(mut self, base_url: impl Into<String>) -> Self {
        self.base_url = normalize_base_url(base_url.into());
        self
    }

    pub fn with_organization(mut self, organization: impl Into<String>) -> Self {
        self.organization = Some(organization.into());
        self
    }

    pub fn with_project(mut self, project: impl Into<String>) -> Self {
        self.project = Some(project.into());
        self
    }

    /// Overrides the model used when a call does not name one (`gpt-4o-mini`).
    pub fn with_default_model(mut self, model: impl Into<String>) -> Self {
        self.default_model = model.into();
        self
    }

    pub(crate) fn endpoint(&self) -> String {
        format!("{}/chat/completions", self.base_url)
    }

    pub(crate) fn models_endpoint(&self) -> String {
        format!("{}/models", self.base_url)
    }

    fn build_headers(&self) -> HashMap<String, String> {
        let mut headers = HashMap::new();
        headers.insert(
            "Authorization".to_string(),
            format!("Bearer {}", self.api_key),
        );
        headers.insert("Content-Type".to_string(), "application/json".to_string());
        if let Some(org) = &self.organization {
            headers.insert("OpenAI-Organization".to_string(), org.clone());
        }
        if let Some(project) = &self.project {
            headers.insert("OpenAI-Project".to_string(), project.clone());
        }
        headers
    }

    fn ensure_success(&self, response: HttpResponse) -> Result<String, LLMError> {
        let retry_after = retry_after_from_headers(&response.headers);
        let status = response.status;
        let text = response.into_string()?;
        if (200..300).contains(&status) {
            Ok(text)
        } else {
            warn!(backend = self.name(), status, "request failed");
            Err(parse_openai_error(status, &text, retry_after))
        }
    }
}

fn normalize_base_url(base_url: String) -> String {
    match base_url.strip_suffix('/') {
        Some(stripped) => stripped.to_string(),
        None => base_url,
    }
}

#[async_trait]
impl ChatBackend for OpenAiChatBackend {
    fn name(&self) -> &'static str {
        "openai_chat"
    }

    fn default_model(&self) -> &str {
        &self.default_model
    }

    fn map_role(&self, role: &Role) -> &'static str {
        map_role(role)
    }

    fn instruction_turn(&self, instruction: &str) -> Value {
        system_message(instruction)
    }

    fn text_turn(&self, role: &Role, text: &str) -> Value {
        text_message(role, text)
    }

    fn media_turn(&self, media: &MediaPayload, mime_type: &str, prompt: Option<&str>) -> Value {
        media_message(media, mime_type, prompt)
    }

    async fn open_stream(&self, model: &str, turns: Vec<Value>) -> Result<TextStream, LLMError> {
        let body = build_openai_body(model, turns);
        let HttpStreamResponse {
            status,
            headers,
            body,
        } = post_json_stream_with_headers(
            self.transport.as_ref(),
            self.endpoint(),
            self.build_headers(),
            &body,
        )
        .await?;

        if !(200..300).contains(&status) {
            warn!(backend = self.name(), status, model, "stream request failed");
            let text = collect_stream_text(body, self.name()).await?;
            return Err(parse_openai_error(
                status,
                &text,
                retry_after_from_headers(&headers),
            ));
        }
        Ok(text_stream(body, self.name(), parse_openai_chunk))
    }

    async fn list_models(&self) -> Result<Vec<ModelDescriptor>, LLMError> {
        let response = get_with_headers(
            self.transport.as_ref(),
            self.models_endpoint(),
            self.build_headers(),
        )
        .await?;
        let text = self.ensure_success(response)?;
        let listing: OpenAiModelList = serde_json::from_str(&text).map_err(|err| {
            LLMError::provider(self.name(), format!("failed to parse model list: {err}"))
        })?;
        debug!(backend = self.name(), count = listing.data.len(), "listed models");

        Ok(listing
            .data
            .into_iter()
            .map(|model| ModelDescriptor::new(model.id, None))
            .collect())
    }
}
