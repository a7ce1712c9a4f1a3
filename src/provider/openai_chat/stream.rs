use crate::error::LLMError;
use crate::types::StreamChunk;

use super::error::stream_error;
use super::types::{OpenAiDeltaContent, OpenAiStreamChunk};

const PROVIDER: &str = "openai_chat";

/// Decodes one SSE `data:` payload into the text of the first choice's delta.
pub(crate) fn parse_openai_chunk(data: &str) -> Result<StreamChunk, LLMError> {
    let chunk: OpenAiStreamChunk = serde_json::from_str(data).map_err(|err| {
        LLMError::provider(PROVIDER, format!("failed to parse stream chunk: {err}"))
    })?;

    if let Some(error) = &chunk.error {
        return Err(stream_error(error));
    }

    let text = chunk
        .choices
        .first()
        .and_then(|choice| choice.delta.as_ref())
        .and_then(|delta| delta.content.as_ref())
        .and_then(|content| match content {
            OpenAiDeltaContent::Text(text) => Some(text.clone()),
            OpenAiDeltaContent::Parts(parts) => {
                let joined: String = parts
                    .iter()
                    .filter(|part| part.kind == "text")
                    .filter_map(|part| part.text.as_deref())
                    .collect();
                (!joined.is_empty()).then_some(joined)
            }
        });

    Ok(StreamChunk { text })
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn extracts_delta_content() {
        let data = r#"{"id":"c1","object":"chat.completion.chunk","choices":[{"index":0,"delta":{"content":"Hel"},"finish_reason":null}]}"#;
        assert_eq!(parse_openai_chunk(data).unwrap(), StreamChunk::text("Hel"));
    }

    #[test]
    fn role_only_and_finish_chunks_carry_no_text() {
        let data = r#"{"choices":[{"index":0,"delta":{"role":"assistant","content":null}}]}"#;
        assert_eq!(parse_openai_chunk(data).unwrap(), StreamChunk::empty());

        let data = r#"{"choices":[{"index":0,"delta":{},"finish_reason":"stop"}]}"#;
        assert_eq!(parse_openai_chunk(data).unwrap(), StreamChunk::empty());

        let data = r#"{"choices":[],"usage":{"prompt_tokens":3,"completion_tokens":2}}"#;
        assert_eq!(parse_openai_chunk(data).unwrap(), StreamChunk::empty());
    }

    #[test]
    fn joins_text_parts() {
        let data = r#"{"choices":[{"delta":{"content":[{"type":"text","text":"a"},{"type":"refusal"},{"type":"text","text":"b"}]}}]}"#;
        assert_eq!(parse_openai_chunk(data).unwrap(), StreamChunk::text("ab"));
    }

    #[test]
    fn in_stream_error_and_bad_json_fail() {
        let data = r#"{"error":{"message":"upstream overloaded","type":"server_error"}}"#;
        match parse_openai_chunk(data).unwrap_err() {
            LLMError::Provider { message, .. } => {
                assert_eq!(message, "upstream overloaded (server_error)")
            }
            other => panic!("unexpected error: {other:?}"),
        }

        assert!(matches!(
            parse_openai_chunk("{not json").unwrap_err(),
            LLMError::Provider { .. }
        ));
    }
}
