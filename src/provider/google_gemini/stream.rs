use crate::error::LLMError;
use crate::types::StreamChunk;

use super::error::stream_error;
use super::types::GeminiGenerateContentResponse;

const PROVIDER: &str = "google_gemini";

/// Decodes one SSE `data:` payload into the answer text of the first candidate.
///
/// Thought summaries are dropped; a candidate holding only thoughts, function
/// calls or a finish reason yields an empty chunk.
pub(crate) fn parse_gemini_chunk(data: &str) -> Result<StreamChunk, LLMError> {
    let response: GeminiGenerateContentResponse = serde_json::from_str(data).map_err(|err| {
        LLMError::provider(PROVIDER, format!("failed to parse stream chunk: {err}"))
    })?;

    if let Some(error) = &response.error {
        return Err(stream_error(error));
    }

    let text = response
        .candidates
        .first()
        .and_then(|candidate| candidate.content.as_ref())
        .map(|content| {
            content
                .parts
                .iter()
                .filter(|part| part.thought != Some(true))
                .filter_map(|part| part.text.as_deref())
                .collect::<String>()
        })
        .filter(|text| !text.is_empty());

    Ok(StreamChunk { text })
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn concatenates_text_parts_of_first_candidate() {
        let data = r#"{"candidates":[{"content":{"role":"model","parts":[{"text":"Hel"},{"text":"lo"}]},"index":0},{"content":{"parts":[{"text":"ignored"}]}}]}"#;
        assert_eq!(parse_gemini_chunk(data).unwrap(), StreamChunk::text("Hello"));
    }

    #[test]
    fn skips_thought_parts() {
        let data = r#"{"candidates":[{"content":{"parts":[{"text":"planning...","thought":true},{"text":"Answer"}]}}]}"#;
        assert_eq!(parse_gemini_chunk(data).unwrap(), StreamChunk::text("Answer"));

        let data = r#"{"candidates":[{"content":{"parts":[{"text":"only thinking","thought":true}]}}]}"#;
        assert_eq!(parse_gemini_chunk(data).unwrap(), StreamChunk::empty());
    }

    #[test]
    fn chunks_without_text_are_empty() {
        let data = r#"{"candidates":[{"finishReason":"STOP","index":0}],"usageMetadata":{"totalTokenCount":12}}"#;
        assert_eq!(parse_gemini_chunk(data).unwrap(), StreamChunk::empty());

        let data = r#"{"usageMetadata":{"promptTokenCount":4}}"#;
        assert_eq!(parse_gemini_chunk(data).unwrap(), StreamChunk::empty());

        let data = r#"{"candidates":[{"content":{"parts":[{"functionCall":{"name":"f","args":{}}}]}}]}"#;
        assert_eq!(parse_gemini_chunk(data).unwrap(), StreamChunk::empty());
    }

    #[test]
    fn error_event_and_bad_json_fail() {
        let data = r#"{"error":{"code":429,"message":"Resource has been exhausted","status":"RESOURCE_EXHAUSTED"}}"#;
        assert!(matches!(
            parse_gemini_chunk(data).unwrap_err(),
            LLMError::RateLimit { .. }
        ));

        match parse_gemini_chunk("data?").unwrap_err() {
            LLMError::Provider { provider, .. } => assert_eq!(provider, "google_gemini"),
            other => panic!("unexpected error: {other:?}"),
        }
    }
}
