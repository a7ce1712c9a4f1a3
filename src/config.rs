use std::collections::HashMap;
use std::sync::Arc;

use serde::{Deserialize, Serialize};
use serde_json::Value;

use crate::client::ChatClient;
use crate::error::LLMError;
use crate::http::DynHttpTransport;
use crate::provider::DynBackend;
use crate::provider::google_gemini::{GeminiSettings, GoogleGeminiBackend};
use crate::provider::openai_chat::OpenAiChatBackend;

/// Declarative description of one chat client.
///
/// # Examples
///
/// ```
/// use tandem_llm::config::{ClientConfig, ProviderKind};
///
/// let config: ClientConfig = serde_json::from_str(r#"{
///     "provider": "google_gemini",
///     "credential": { "type": "api_key", "key": "AIza..." },
///     "gemini": { "thinking_budget": 2048 }
/// }"#).unwrap();
/// assert!(matches!(config.provider, ProviderKind::GoogleGemini));
/// assert_eq!(config.gemini.unwrap().safety_settings.len(), 4);
/// ```
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ClientConfig {
    pub provider: ProviderKind,
    pub credential: Credential,
    #[serde(default)]
    pub base_url: Option<String>,
    #[serde(default)]
    pub default_model: Option<String>,
    /// Gemini-only generation settings; defaults apply when absent.
    #[serde(default)]
    pub gemini: Option<GeminiSettings>,
    /// Backend extras, e.g. `organization` and `project` for OpenAI.
    #[serde(default)]
    pub extra: HashMap<String, Value>,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ProviderKind {
    OpenAiChat,
    GoogleGemini,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum Credential {
    ApiKey { key: String },
    Bearer { token: String },
    /// Only useful for configs that are filled in later; rejected by [`build_client`].
    None,
}

/// Builds a [`ChatClient`] for `config` on top of `transport`.
///
/// # Errors
///
/// [`LLMError::Auth`] when the credential is missing and
/// [`LLMError::InvalidConfig`] when Gemini settings are paired with another backend.
pub fn build_client(
    config: &ClientConfig,
    transport: DynHttpTransport,
) -> Result<ChatClient, LLMError> {
    Ok(ChatClient::new(build_backend(config, transport)?))
}

fn build_backend(config: &ClientConfig, transport: DynHttpTransport) -> Result<DynBackend, LLMError> {
    let backend: DynBackend = match config.provider {
        ProviderKind::OpenAiChat => {
            if config.gemini.is_some() {
                return Err(LLMError::InvalidConfig {
                    field: "gemini".to_string(),
                    reason: "Gemini settings cannot be used with openai_chat".to_string(),
                });
            }
            let api_key = extract_api_key(&config.credential, "openai_chat")?;
            let mut backend = OpenAiChatBackend::new(transport, api_key);

            if let Some(base_url) = &config.base_url {
                backend = backend.with_base_url(base_url.clone());
            }
            if let Some(model) = &config.default_model {
                backend = backend.with_default_model(model.clone());
            }
            if let Some(Value::String(org)) = config.extra.get("organization") {
                backend = backend.with_organization(org.clone());
            }
            if let Some(Value::String(project)) = config.extra.get("project") {
                backend = backend.with_project(project.clone());
            }

            Arc::new(backend)
        }
        ProviderKind::GoogleGemini => {
            let api_key = extract_api_key(&config.credential, "google_gemini")?;
            let mut backend = GoogleGeminiBackend::new(transport, api_key);

            if let Some(base_url) = &config.base_url {
                backend = backend.with_base_url(base_url.clone());
            }
            if let Some(model) = &config.default_model {
                backend = backend.with_default_model(model.clone());
            }
            if let Some(settings) = &config.gemini {
                backend = backend.with_settings(settings.clone());
            }

            Arc::new(backend)
        }
    };

    Ok(backend)
}

fn extract_api_key(credential: &Credential, provider: &'static str) -> Result<String, LLMError> {
    match credential {
        Credential::ApiKey { key } => Ok(key.clone()),
        Credential::Bearer { token } => Ok(token.clone()),
        Credential::None => Err(LLMError::Auth {
            message: format!("provider {provider} requires credential"),
        }),
    }
}
