//! Caller-facing data structures shared by every backend.
//!
//! Backends translate these into their own wire vocabulary; nothing here knows
//! about a particular remote API.

use base64::{Engine as _, engine::general_purpose};
use serde::{Deserialize, Serialize};

/// Chat role string.
///
/// The three well-known roles have constructors. Any other value is accepted and
/// treated as the backend's default (user) role when a request is built.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Role(pub String);

impl Role {
    pub fn system() -> Self {
        Self("system".to_string())
    }

    pub fn user() -> Self {
        Self("user".to_string())
    }

    pub fn assistant() -> Self {
        Self("assistant".to_string())
    }

    pub fn is_assistant(&self) -> bool {
        self.0 == "assistant"
    }

    pub fn is_system(&self) -> bool {
        self.0 == "system"
    }
}

/// One turn of caller-owned conversation history.
///
/// # Examples
///
/// ```
/// use tandem_llm::types::{ChatMessage, Role};
///
/// let msg = ChatMessage::user("  hello  ");
/// assert_eq!(msg.role, Role::user());
/// assert_eq!(msg.trimmed_content(), Some("hello"));
/// assert_eq!(ChatMessage::assistant(" \n").trimmed_content(), None);
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ChatMessage {
    pub role: Role,
    pub content: String,
}

impl ChatMessage {
    pub fn new(role: Role, content: impl Into<String>) -> Self {
        Self {
            role,
            content: content.into(),
        }
    }

    pub fn user(content: impl Into<String>) -> Self {
        Self::new(Role::user(), content)
    }

    pub fn assistant(content: impl Into<String>) -> Self {
        Self::new(Role::assistant(), content)
    }

    pub fn system(content: impl Into<String>) -> Self {
        Self::new(Role::system(), content)
    }

    /// Content without surrounding whitespace, or `None` when nothing is left.
    pub fn trimmed_content(&self) -> Option<&str> {
        let trimmed = self.content.trim();
        if trimmed.is_empty() {
            None
        } else {
            Some(trimmed)
        }
    }
}

/// Media attached to a single-turn prompt.
///
/// Remote references are passed to the backend by URI; inline payloads are
/// embedded in the request body as base64.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum MediaPayload {
    /// `http://` or `https://` reference the backend fetches itself.
    Uri { uri: String },
    /// Base64-encoded bytes.
    Inline { data: String },
}

impl MediaPayload {
    /// Classifies a caller string: an HTTP(S) URL becomes [`MediaPayload::Uri`],
    /// anything else is taken to be base64 data.
    ///
    /// # Examples
    ///
    /// ```
    /// use tandem_llm::types::MediaPayload;
    ///
    /// assert!(matches!(MediaPayload::parse("https://example.com/cat.png"), MediaPayload::Uri { .. }));
    /// assert!(matches!(MediaPayload::parse("iVBORw0KGgo="), MediaPayload::Inline { .. }));
    /// ```
    pub fn parse(value: impl Into<String>) -> Self {
        let value = value.into();
        if has_http_scheme(&value) {
            Self::Uri { uri: value }
        } else {
            Self::Inline { data: value }
        }
    }

    /// Base64-encodes raw bytes into an inline payload.
    pub fn from_bytes(bytes: impl AsRef<[u8]>) -> Self {
        Self::Inline {
            data: general_purpose::STANDARD.encode(bytes),
        }
    }

    pub fn is_uri(&self) -> bool {
        matches!(self, Self::Uri { .. })
    }
}

impl From<&str> for MediaPayload {
    fn from(value: &str) -> Self {
        Self::parse(value)
    }
}

impl From<String> for MediaPayload {
    fn from(value: String) -> Self {
        Self::parse(value)
    }
}

fn has_http_scheme(value: &str) -> bool {
    ["http://", "https://"].iter().any(|scheme| {
        value
            .get(..scheme.len())
            .is_some_and(|prefix| prefix.eq_ignore_ascii_case(scheme))
    })
}

/// A model the backend reports as available.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ModelDescriptor {
    /// Backend model identifier, e.g. `models/gemini-2.5-pro` or `gpt-4o-mini`.
    pub name: String,
    /// Human label; equals `name` when the backend provides none.
    pub display_name: String,
}

impl ModelDescriptor {
    pub fn new(name: impl Into<String>, display_name: Option<String>) -> Self {
        let name = name.into();
        let display_name = display_name.unwrap_or_else(|| name.clone());
        Self { name, display_name }
    }
}

/// Incremental unit decoded from a backend stream.
///
/// A chunk without text is ordinary (role headers, usage reports, finish markers)
/// and does not end the stream.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct StreamChunk {
    pub text: Option<String>,
}

impl StreamChunk {
    pub fn text(text: impl Into<String>) -> Self {
        Self {
            text: Some(text.into()),
        }
    }

    pub fn empty() -> Self {
        Self::default()
    }

    /// The fragment to forward, skipping absent and empty text.
    pub fn fragment(&self) -> Option<&str> {
        self.text.as_deref().filter(|text| !text.is_empty())
    }
}
