use serde::{Deserialize, Serialize};

/// `thinkingBudget` value that lets the model decide how much to think.
pub const DYNAMIC_THINKING_BUDGET: i32 = -1;

/// Generation settings attached to every Gemini request.
///
/// The default mirrors a permissive setup: dynamic thinking and `BLOCK_NONE` on the
/// four adjustable harm categories.
///
/// # Examples
///
/// ```
/// use tandem_llm::provider::google_gemini::{GeminiSettings, HarmBlockThreshold};
///
/// let settings = GeminiSettings::default();
/// assert_eq!(settings.thinking_budget, -1);
/// assert_eq!(settings.safety_settings.len(), 4);
/// assert!(settings
///     .safety_settings
///     .iter()
///     .all(|s| s.threshold == HarmBlockThreshold::BlockNone));
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct GeminiSettings {
    pub thinking_budget: i32,
    pub safety_settings: Vec<SafetySetting>,
}

impl Default for GeminiSettings {
    fn default() -> Self {
        Self {
            thinking_budget: DYNAMIC_THINKING_BUDGET,
            safety_settings: [
                HarmCategory::Harassment,
                HarmCategory::HateSpeech,
                HarmCategory::SexuallyExplicit,
                HarmCategory::DangerousContent,
            ]
            .into_iter()
            .map(|category| SafetySetting {
                category,
                threshold: HarmBlockThreshold::BlockNone,
            })
            .collect(),
        }
    }
}

/// One `safetySettings` entry.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SafetySetting {
    pub category: HarmCategory,
    pub threshold: HarmBlockThreshold,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum HarmCategory {
    #[serde(rename = "HARM_CATEGORY_HARASSMENT")]
    Harassment,
    #[serde(rename = "HARM_CATEGORY_HATE_SPEECH")]
    HateSpeech,
    #[serde(rename = "HARM_CATEGORY_SEXUALLY_EXPLICIT")]
    SexuallyExplicit,
    #[serde(rename = "HARM_CATEGORY_DANGEROUS_CONTENT")]
    DangerousContent,
    #[serde(rename = "HARM_CATEGORY_CIVIC_INTEGRITY")]
    CivicIntegrity,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum HarmBlockThreshold {
    BlockLowAndAbove,
    BlockMediumAndAbove,
    BlockOnlyHigh,
    BlockNone,
    Off,
}
