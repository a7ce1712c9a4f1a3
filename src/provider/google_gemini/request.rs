use serde_json::{Map, Value, json};

use crate::types::{MediaPayload, Role};

use super::settings::GeminiSettings;

/// Gemini only knows `user` and `model` inside `contents`.
pub(crate) fn map_role(role: &Role) -> &'static str {
    if role.is_assistant() { "model" } else { "user" }
}

/// The composed system prompt rides as a synthetic leading user turn.
pub(crate) fn instruction_content(instruction: &str) -> Value {
    json!({ "role": "user", "parts": [ { "text": instruction } ] })
}

pub(crate) fn text_content(role: &Role, text: &str) -> Value {
    json!({ "role": map_role(role), "parts": [ { "text": text } ] })
}

pub(crate) fn media_content(media: &MediaPayload, mime_type: &str, prompt: Option<&str>) -> Value {
    let mut parts = Vec::with_capacity(2);
    if let Some(prompt) = prompt.filter(|prompt| !prompt.is_empty()) {
        parts.push(json!({ "text": prompt }));
    }

    parts.push(match media {
        MediaPayload::Uri { uri } => json!({
            "fileData": { "mimeType": mime_type, "fileUri": uri }
        }),
        MediaPayload::Inline { data } => json!({
            "inlineData": { "mimeType": mime_type, "data": data }
        }),
    });

    json!({ "role": "user", "parts": parts })
}

/// Builds a `streamGenerateContent` body. The model travels in the URL path.
pub(crate) fn build_gemini_body(contents: Vec<Value>, settings: &GeminiSettings) -> Value {
    let mut body = Map::new();
    body.insert("contents".to_string(), Value::Array(contents));
    body.insert(
        "generationConfig".to_string(),
        json!({ "thinkingConfig": { "thinkingBudget": settings.thinking_budget } }),
    );
    if !settings.safety_settings.is_empty() {
        body.insert("safetySettings".to_string(), json!(settings.safety_settings));
    }
    Value::Object(body)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::provider::google_gemini::{HarmBlockThreshold, HarmCategory, SafetySetting};

    #[test]
    fn role_mapping_collapses_to_user_and_model() {
        assert_eq!(map_role(&Role::assistant()), "model");
        assert_eq!(map_role(&Role::user()), "user");
        assert_eq!(map_role(&Role::system()), "user");
        assert_eq!(map_role(&Role("narrator".to_string())), "user");
    }

    #[test]
    fn instruction_is_a_plain_user_turn() {
        assert_eq!(
            instruction_content("Be terse."),
            json!({ "role": "user", "parts": [ { "text": "Be terse." } ] })
        );
    }

    #[test]
    fn media_uses_file_data_or_inline_data() {
        let remote = media_content(
            &MediaPayload::parse("https://example.com/clip.mp4"),
            "video/mp4",
            Some("Describe"),
        );
        assert_eq!(
            remote,
            json!({
                "role": "user",
                "parts": [
                    { "text": "Describe" },
                    { "fileData": { "mimeType": "video/mp4", "fileUri": "https://example.com/clip.mp4" } }
                ]
            })
        );

        let inline = media_content(&MediaPayload::parse("QUJD"), "image/png", None);
        assert_eq!(
            inline["parts"],
            json!([ { "inlineData": { "mimeType": "image/png", "data": "QUJD" } } ])
        );
    }

    #[test]
    fn body_carries_thinking_budget_and_safety_settings() {
        let body = build_gemini_body(
            vec![text_content(&Role::user(), "hi")],
            &GeminiSettings::default(),
        );
        assert_eq!(
            body["generationConfig"],
            json!({ "thinkingConfig": { "thinkingBudget": -1 } })
        );
        assert_eq!(body["safetySettings"].as_array().map(Vec::len), Some(4));
        assert_eq!(body["contents"][0]["parts"][0]["text"], json!("hi"));

        let settings = GeminiSettings {
            thinking_budget: 512,
            safety_settings: vec![SafetySetting {
                category: HarmCategory::CivicIntegrity,
                threshold: HarmBlockThreshold::Off,
            }],
        };
        let body = build_gemini_body(Vec::new(), &settings);
        assert_eq!(
            body["safetySettings"],
            json!([ { "category": "HARM_CATEGORY_CIVIC_INTEGRITY", "threshold": "OFF" } ])
        );
    }

    #[test]
    fn empty_safety_settings_are_omitted() {
        let settings = GeminiSettings {
            thinking_budget: 0,
            safety_settings: Vec::new(),
        };
        let body = build_gemini_body(Vec::new(), &settings);
        assert!(body.get("safetySettings").is_none());
        assert_eq!(
            body["generationConfig"]["thinkingConfig"]["thinkingBudget"],
            json!(0)
        );
    }
}
