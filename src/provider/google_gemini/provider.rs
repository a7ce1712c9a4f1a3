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

use super::error::parse_gemini_error;
use super::request::{
    build_gemini_body, instruction_content, map_role, media_content, text_content,
};
use super::settings::GeminiSettings;
use super::stream::parse_gemini_chunk;
use super::types::GeminiModelList;

const DEFAULT_BASE_URL: &str = "https://generativelanguage.googleapis.com";
const DEFAULT_MODEL: &str = "gemini-2.5-pro";

/// Google Gemini `streamGenerateContent` backend.
pub struct GoogleGeminiBackend {
    pub(crate) transport: DynHttpTransport,
    pub(crate) base_url: String,
    pub(crate) api_key: String,
    pub(crate) default_model: String,
    pub(crate) settings: GeminiSettings,
}

impl GoogleGeminiBackend {
    /// Creates a backend that targets the default Google Generative Language endpoint.
    pub fn new(transport: DynHttpTransport, api_key: impl Into<String>) -> Self {
        Self {
            transport,
            base_url: DEFAULT_BASE_URL.to_string(),
            api_key: api_key.into(),
            default_model: DEFAULT_MODEL.to_string(),
            settings: GeminiSettings::default(),
        }
    }

    /// Overrides the base URL, making it easier to point at proxies or compatibility layers.
    pub fn with_base_url(mut self, base_url: impl Into<String>) -> Self {
        self.base_url = base_url.into();
        self
    }

    /// Overrides the model used when a call does not name one (`gemini-2.5-pro`).
    pub fn with_default_model(mut self, model: impl Into<String>) -> Self {
        self.default_model = model.into();
        self
    }

    /// Replaces the thinking budget and safety settings sent with every request.
    pub fn with_settings(mut self, settings: GeminiSettings) -> Self {
        self.settings = settings;
        self
    }

    pub fn settings(&self) -> &GeminiSettings {
        &self.settings
    }

    fn versioned_base(&self) -> String {
        let base = self.base_url.trim_end_matches('/');
        if base.ends_with("/v1beta") {
            base.to_string()
        } else {
            format!("{base}/v1beta")
        }
    }

    /// Builds the streaming endpoint URL (SSE) for GenerateContent.
    pub(crate) fn stream_endpoint(&self, model: &str) -> String {
        format!(
            "{}/{}:streamGenerateContent?alt=sse",
            self.versioned_base(),
            normalize_model(model)
        )
    }

    pub(crate) fn models_endpoint(&self) -> String {
        format!("{}/models", self.versioned_base())
    }

    fn build_headers(&self) -> HashMap<String, String> {
        let mut headers = HashMap::new();
        headers.insert("x-goog-api-key".to_string(), self.api_key.clone());
        headers.insert("Content-Type".to_string(), "application/json".to_string());
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
            Err(parse_gemini_error(status, &text, retry_after))
        }
    }
}

fn normalize_model(model: &str) -> String {
    if model.starts_with("models/") {
        model.to_string()
    } else {
        format!("models/{model}")
    }
}

#[async_trait]
impl ChatBackend for GoogleGeminiBackend {
    fn name(&self) -> &'static str {
        "google_gemini"
    }

    fn default_model(&self) -> &str {
        &self.default_model
    }

    fn map_role(&self, role: &Role) -> &'static str {
        map_role(role)
    }

    fn instruction_turn(&self, instruction: &str) -> Value {
        instruction_content(instruction)
    }

    fn text_turn(&self, role: &Role, text: &str) -> Value {
        text_content(role, text)
    }

    fn media_turn(&self, media: &MediaPayload, mime_type: &str, prompt: Option<&str>) -> Value {
        media_content(media, mime_type, prompt)
    }

    async fn open_stream(&self, model: &str, turns: Vec<Value>) -> Result<TextStream, LLMError> {
        let body = build_gemini_body(turns, &self.settings);
        let HttpStreamResponse {
            status,
            headers,
            body,
        } = post_json_stream_with_headers(
            self.transport.as_ref(),
            self.stream_endpoint(model),
            self.build_headers(),
            &body,
        )
        .await?;

        if !(200..300).contains(&status) {
            warn!(backend = self.name(), status, model, "stream request failed");
            let text = collect_stream_text(body, self.name()).await?;
            return Err(parse_gemini_error(
                status,
                &text,
                retry_after_from_headers(&headers),
            ));
        }
        Ok(text_stream(body, self.name(), parse_gemini_chunk))
    }

    async fn list_models(&self) -> Result<Vec<ModelDescriptor>, LLMError> {
        let response = get_with_headers(
            self.transport.as_ref(),
            self.models_endpoint(),
            self.build_headers(),
        )
        .await?;
        let text = self.ensure_success(response)?;
        let listing: GeminiModelList = serde_json::from_str(&text).map_err(|err| {
            LLMError::provider(self.name(), format!("failed to parse model list: {err}"))
        })?;
        debug!(backend = self.name(), count = listing.models.len(), "listed models");

        let mut models = Vec::with_capacity(listing.models.len());
        for model in listing.models {
            match model.name {
                Some(name) => models.push(ModelDescriptor::new(name, model.display_name)),
                None => debug!(backend = self.name(), "skipping model entry without a name"),
            }
        }
        Ok(models)
    }
}
