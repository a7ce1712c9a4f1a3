use futures_util::StreamExt;
use tokio_util::sync::CancellationToken;
use tracing::trace;

use crate::error::LLMError;
use crate::provider::TextStream;

/// Callback receiving each text fragment as it arrives.
pub type OnChunk<'a> = dyn FnMut(&str) + Send + 'a;

/// Drains a backend stream into one string.
///
/// Every non-empty fragment is forwarded to `on_chunk` untouched and appended in
/// arrival order. The first stream error aborts the drain and the partial text
/// is dropped. When `cancel` fires first, the stream is dropped (closing the
/// connection) and [`LLMError::Aborted`] is returned.
pub async fn drain_stream(
    mut stream: TextStream,
    mut on_chunk: Option<&mut OnChunk<'_>>,
    cancel: Option<&CancellationToken>,
) -> Result<String, LLMError> {
    let mut text = String::new();

    loop {
        let next = match cancel {
            Some(token) => tokio::select! {
                biased;
                _ = token.cancelled() => {
                    return Err(LLMError::Aborted {
                        message: "stream cancelled by caller".to_string(),
                    });
                }
                next = stream.next() => next,
            },
            None => stream.next().await,
        };

        let Some(chunk) = next else {
            break;
        };
        let chunk = chunk?;
        if let Some(fragment) = chunk.fragment() {
            trace!(len = fragment.len(), "stream fragment");
            if let Some(callback) = on_chunk.as_deref_mut() {
                callback(fragment);
            }
            text.push_str(fragment);
        }
    }

    Ok(text)
}
