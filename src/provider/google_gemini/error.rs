use std::time::Duration;

use serde::Deserialize;

use crate::error::{LLMError, extract_model_identifier, looks_like_token_limit_error};

use super::types::GeminiErrorBody;

const PROVIDER: &str = "google_gemini";

/// Parses error responses returned by Google Gemini.
pub(crate) fn parse_gemini_error(
    status: u16,
    body: &str,
    retry_after: Option<Duration>,
) -> LLMError {
    #[derive(Deserialize)]
    struct ErrorEnvelope {
        error: Option<GeminiErrorBody>,
    }

    // Non-JSON payloads (proxies, HTML error pages) are returned raw.
    let Some(error) = serde_json::from_str::<ErrorEnvelope>(body)
        .ok()
        .and_then(|envelope| envelope.error)
    else {
        return LLMError::provider(PROVIDER, format!("status {status}: {body}"));
    };

    let status_hint = error.status.as_deref();
    let message = describe(&error);

    if looks_like_token_limit_error(status_hint, &message) {
        return LLMError::TokenLimitExceeded { message };
    }

    if status == 404 || status_hint == Some("NOT_FOUND") {
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
        400 => LLMError::Validation { message },
        _ => LLMError::provider(PROVIDER, message),
    }
}

/// Maps an `error` object that arrived as a stream event.
pub(crate) fn stream_error(error: &GeminiErrorBody) -> LLMError {
    let status = error
        .code
        .and_then(|code| u16::try_from(code).ok())
        .unwrap_or(500);
    match status {
        401 | 403 => LLMError::Auth {
            message: describe(error),
        },
        429 => LLMError::RateLimit {
            message: describe(error),
            retry_after: None,
        },
        _ => LLMError::provider(PROVIDER, describe(error)),
    }
}

fn describe(error: &GeminiErrorBody) -> String {
    let message = error
        .message
        .clone()
        .unwrap_or_else(|| "unknown error".to_string());
    match error.status.as_deref() {
        Some(status) if !status.is_empty() => format!("{message} ({status})"),
        _ => message,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parse_auth_and_rate_limit_errors() {
        let body = r#"{
  "error": {
    "code": 400,
    "message": "API key not valid. Please pass a valid API key.",
    "status": "INVALID_ARGUMENT"
  }
}"#;
        // Gemini reports bad keys as 400 INVALID_ARGUMENT.
        assert!(matches!(
            parse_gemini_error(400, body, None),
            LLMError::Validation { .. }
        ));

        let body = r#"{"error":{"code":403,"message":"Permission denied","status":"PERMISSION_DENIED"}}"#;
        match parse_gemini_error(403, body, None) {
            LLMError::Auth { message } => {
                assert_eq!(message, "Permission denied (PERMISSION_DENIED)");
            }
            other => panic!("expected Auth error, got {other:?}"),
        }

        let body = r#"{"error":{"code":429,"message":"quota exhausted","status":"RESOURCE_EXHAUSTED"}}"#;
        match parse_gemini_error(429, body, Some(Duration::from_secs(5))) {
            LLMError::RateLimit {
                message,
                retry_after,
            } => {
                assert!(message.contains("RESOURCE_EXHAUSTED"));
                assert_eq!(retry_after, Some(Duration::from_secs(5)));
            }
            other => panic!("expected RateLimit error, got {other:?}"),
        }
    }

    #[test]
    fn parse_model_token_and_fallback_errors() {
        let body = r#"{"error":{"code":404,"message":"Model `gemini-pro-oops` not found.","status":"NOT_FOUND"}}"#;
        match parse_gemini_error(404, body, None) {
            LLMError::ModelNotFound { model, .. } => {
                assert_eq!(model.as_deref(), Some("gemini-pro-oops"));
            }
            other => panic!("expected ModelNotFound, got {other:?}"),
        }

        let body = r#"{"error":{"code":400,"message":"The input token count exceeds the maximum number of tokens allowed; context window exceeded.","status":"INVALID_ARGUMENT"}}"#;
        assert!(matches!(
            parse_gemini_error(400, body, None),
            LLMError::TokenLimitExceeded { .. }
        ));

        match parse_gemini_error(500, "not a json", None) {
            LLMError::Provider { provider, message } => {
                assert_eq!(provider, "google_gemini");
                assert_eq!(message, "status 500: not a json");
            }
            other => panic!("expected Provider fallback error, got {other:?}"),
        }
    }

    #[test]
    fn stream_error_uses_embedded_code() {
        let error = GeminiErrorBody {
            code: Some(503),
            message: Some("The model is overloaded.".to_string()),
            status: Some("UNAVAILABLE".to_string()),
        };
        match stream_error(&error) {
            LLMError::Provider { message, .. } => {
                assert_eq!(message, "The model is overloaded. (UNAVAILABLE)");
            }
            other => panic!("unexpected error: {other:?}"),
        }
    }
}
