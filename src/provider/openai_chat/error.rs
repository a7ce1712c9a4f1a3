use std::time::Duration;

use serde::Deserialize;
use serde_json::Value;

use crate::error::{LLMError, extract_model_identifier, looks_like_token_limit_error};

use super::types::OpenAiErrorBody;

const PROVIDER: &str = "openai_chat";

/// Classifies a non-success OpenAI response.
pub(crate) fn parse_openai_error(
    status: u16,
    body: &str,
    retry_after: Option<Duration>,
) -> LLMError {
    #[derive(Deserialize)]
    struct ErrorEnvelope {
        error: Option<OpenAiErrorBody>,
    }

    let Some(error) = serde_json::from_str::<ErrorEnvelope>(body)
        .ok()
        .and_then(|envelope| envelope.error)
    else {
        return LLMError::provider(PROVIDER, format!("status {status}: {body}"));
    };

    let code = code_hint(error.code.as_ref());
    let message = describe(&error);

    if looks_like_token_limit_error(code.as_deref(), &message) {
        return LLMError::TokenLimitExceeded { message };
    }
    if status == 404 || code.as_deref() == Some("model_not_found") {
        return LLMError::ModelNotFound {
            model: extract_model_identifier(&message),
            message,
        };
    }

    match status {
        401 | 403 => LLMError::Auth { message },
        429 => LLMError::RateLimit {
            message,
            retry_after,
        },
        400 | 422 => LLMError::Validation { message },
        _ => LLMError::provider(PROVIDER, message),
    }
}

/// Maps an `error` object delivered inside an otherwise successful stream.
pub(crate) fn stream_error(error: &OpenAiErrorBody) -> LLMError {
    LLMError::provider(PROVIDER, describe(error))
}

fn describe(error: &OpenAiErrorBody) -> String {
    let message = error
        .message
        .clone()
        .unwrap_or_else(|| "unknown error".to_string());
    match code_hint(error.code.as_ref()).or_else(|| error.kind.clone()) {
        Some(code) => format!("{message} ({code})"),
        None => message,
    }
}

fn code_hint(code: Option<&Value>) -> Option<String> {
    match code? {
        Value::String(code) => Some(code.clone()),
        Value::Null => None,
        other => Some(other.to_string()),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn classifies_auth_rate_limit_and_validation() {
        let body = r#"{"error":{"message":"Incorrect API key provided","type":"invalid_request_error","code":"invalid_api_key"}}"#;
        match parse_openai_error(401, body, None) {
            LLMError::Auth { message } => {
                assert!(message.contains("Incorrect API key"));
                assert!(message.contains("invalid_api_key"));
            }
            other => panic!("expected Auth, got {other:?}"),
        }

        let body = r#"{"error":{"message":"Rate limit reached","type":"requests","code":null}}"#;
        match parse_openai_error(429, body, Some(Duration::from_secs(2))) {
            LLMError::RateLimit {
                message,
                retry_after,
            } => {
                assert_eq!(message, "Rate limit reached (requests)");
                assert_eq!(retry_after, Some(Duration::from_secs(2)));
            }
            other => panic!("expected RateLimit, got {other:?}"),
        }

        let body = r#"{"error":{"message":"messages must not be empty"}}"#;
        assert!(matches!(
            parse_openai_error(400, body, None),
            LLMError::Validation { .. }
        ));
    }

    #[test]
    fn classifies_model_and_token_errors() {
        let body = r#"{"error":{"message":"The model `gpt-5-nope` does not exist","code":"model_not_found"}}"#;
        match parse_openai_error(404, body, None) {
            LLMError::ModelNotFound { model, .. } => {
                assert_eq!(model.as_deref(), Some("gpt-5-nope"));
            }
            other => panic!("expected ModelNotFound, got {other:?}"),
        }

        let body = r#"{"error":{"message":"This model's maximum context length is 128000 tokens","code":"context_length_exceeded"}}"#;
        assert!(matches!(
            parse_openai_error(400, body, None),
            LLMError::TokenLimitExceeded { .. }
        ));
    }

    #[test]
    fn falls_back_to_raw_body() {
        match parse_openai_error(502, "Bad Gateway", None) {
            LLMError::Provider { provider, message } => {
                assert_eq!(provider, "openai_chat");
                assert_eq!(message, "status 502: Bad Gateway");
            }
            other => panic!("expected Provider, got {other:?}"),
        }
    }
}
