use serde_json::{Value, json};

use crate::types::{MediaPayload, Role};

pub(crate) fn map_role(role: &Role) -> &'static str {
    if role.is_assistant() {
        "assistant"
    } else if role.is_system() {
        "system"
    } else {
        "user"
    }
}

pub(crate) fn system_message(instruction: &str) -> Value {
    json!({ "role": "system", "content": instruction })
}

pub(crate) fn text_message(role: &Role, text: &str) -> Value {
    json!({ "role": map_role(role), "content": text })
}

/// Vision message: optional text part, then one `image_url` part.
///
/// Remote media is referenced by URL; inline media travels as a `data:` URL.
pub(crate) fn media_message(media: &MediaPayload, mime_type: &str, prompt: Option<&str>) -> Value {
    let mut parts = Vec::with_capacity(2);
    if let Some(prompt) = prompt.filter(|prompt| !prompt.is_empty()) {
        parts.push(json!({ "type": "text", "text": prompt }));
    }

    let url = match media {
        MediaPayload::Uri { uri } => uri.clone(),
        MediaPayload::Inline { data } => format!("data:{mime_type};base64,{data}"),
    };
    parts.push(json!({
        "type": "image_url",
        "image_url": { "url": url, "detail": "auto" }
    }));

    json!({ "role": "user", "content": parts })
}

pub(crate) fn build_openai_body(model: &str, messages: Vec<Value>) -> Value {
    json!({
        "model": model,
        "messages": messages,
        "stream": true,
    })
}
