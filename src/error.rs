use std::time::Duration;

use thiserror::Error;

/// Every failure a chat client call can surface.
///
/// Backend messages are carried verbatim so callers can classify them further;
/// the variant only records which broad class the HTTP status or payload fell into.
#[derive(Debug, Error)]
pub enum LLMError {
    /// Network failures or an unreadable response body.
    #[error("transport error: {message}")]
    Transport { message: String },
    /// Missing, invalid, or unauthorized credentials.
    #[error("auth failure: {message}")]
    Auth { message: String },
    /// The backend throttled the request.
    #[error("rate limited: {message}")]
    RateLimit {
        /// Raw message returned by the backend.
        message: String,
        /// Wait duration suggested through `Retry-After`, if any.
        retry_after: Option<Duration>,
    },
    /// The prompt or expected completion exceeds the model's token budget.
    #[error("token limit exceeded: {message}")]
    TokenLimitExceeded { message: String },
    /// The backend rejected the request payload, or the payload could not be built.
    #[error("invalid request: {message}")]
    Validation { message: String },
    /// The requested model does not exist on the backend.
    #[error("model not found: {message}")]
    ModelNotFound {
        /// Model identifier extracted from the error payload when available.
        model: Option<String>,
        /// Full error message returned by the backend.
        message: String,
    },
    /// Raised when building a client from configuration fails.
    #[error("invalid configuration for {field}: {reason}")]
    InvalidConfig {
        /// Name of the configuration field that failed validation.
        field: String,
        /// Why the field is invalid.
        reason: String,
    },
    /// The call was cancelled through its cancellation token.
    #[error("request aborted: {message}")]
    Aborted { message: String },
    /// Backend failures that do not fit another variant, including malformed streams.
    #[error("provider {provider} error: {message}")]
    Provider {
        /// Backend name, such as `openai_chat`.
        provider: &'static str,
        /// Human-readable error message.
        message: String,
    },
}

impl LLMError {
    /// Creates an [`LLMError::Transport`] from a textual description.
    ///
    /// # Examples
    ///
    /// ```
    /// use tandem_llm::error::LLMError;
    ///
    /// let err = LLMError::transport("dns lookup failed");
    /// assert!(matches!(err, LLMError::Transport { .. }));
    /// ```
    pub fn transport<T: Into<String>>(message: T) -> Self {
        Self::Transport {
            message: message.into(),
        }
    }

    /// Creates an [`LLMError::Provider`] with the given backend name and message.
    ///
    /// # Examples
    ///
    /// ```
    /// use tandem_llm::error::LLMError;
    ///
    /// let err = LLMError::provider("google_gemini", "bad JSON payload");
    /// assert!(matches!(err, LLMError::Provider { provider: "google_gemini", .. }));
    /// ```
    pub fn provider<T: Into<String>>(provider: &'static str, message: T) -> Self {
        Self::Provider {
            provider,
            message: message.into(),
        }
    }
}

/// Returns `true` when an error code or message suggests a context window overflow.
pub(crate) fn looks_like_token_limit_error(code_hint: Option<&str>, message: &str) -> bool {
    if let Some(code) = code_hint {
        let lower = code.to_ascii_lowercase();
        if matches!(
            lower.as_str(),
            "context_length_exceeded"
                | "max_context_length_exceeded"
                | "prompt_tokens_exceeded"
                | "context_window_exceeded"
        ) || lower.contains("token")
        {
            return true;
        }
    }

    let lower_message = message.to_ascii_lowercase();
    const HINTS: [&str; 6] = [
        "context length",
        "context window",
        "token limit",
        "maximum output tokens",
        "max output tokens",
        "prompt is too long",
    ];
    HINTS.iter().any(|needle| lower_message.contains(needle))
}

/// Attempts to extract a quoted model identifier from an error message.
pub(crate) fn extract_model_identifier(message: &str) -> Option<String> {
    for delimiter in ['`', '"', '\''] {
        if let Some(value) = between_delimiters(message, delimiter) {
            if !value.trim().is_empty() {
                return Some(value.trim().to_string());
            }
        }
    }
    None
}

fn between_delimiters(message: &str, delimiter: char) -> Option<&str> {
    let start = message.find(delimiter)? + delimiter.len_utf8();
    let end = message[start..].find(delimiter)? + start;
    Some(&message[start..end])
}
