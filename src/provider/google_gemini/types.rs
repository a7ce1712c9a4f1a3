use serde::Deserialize;

/// GenerateContentResponse; each SSE event carries one of these.
#[derive(Debug, Clone, Deserialize)]
pub(crate) struct GeminiGenerateContentResponse {
    /// Only the first candidate is read.
    #[serde(default)]
    pub(crate) candidates: Vec<GeminiCandidate>,
    /// Error object some proxies emit mid-stream.
    #[serde(default)]
    pub(crate) error: Option<GeminiErrorBody>,
}

#[derive(Debug, Clone, Deserialize)]
pub(crate) struct GeminiCandidate {
    #[serde(default)]
    pub(crate) content: Option<GeminiContent>,
}

#[derive(Debug, Clone, Deserialize)]
pub(crate) struct GeminiContent {
    #[serde(default)]
    pub(crate) parts: Vec<GeminiPart>,
}

/// Only the fields needed to extract answer text; media and function parts are ignored.
#[derive(Debug, Clone, Deserialize)]
pub(crate) struct GeminiPart {
    #[serde(default)]
    pub(crate) text: Option<String>,
    /// Marks thought summaries, which are not part of the answer.
    #[serde(default)]
    pub(crate) thought: Option<bool>,
}

#[derive(Debug, Clone, Deserialize)]
pub(crate) struct GeminiErrorBody {
    #[serde(default)]
    pub(crate) code: Option<i32>,
    #[serde(default)]
    pub(crate) message: Option<String>,
    #[serde(default)]
    pub(crate) status: Option<String>,
}

/// `GET /v1beta/models` response. `nextPageToken` is ignored; only the first page is read.
#[derive(Debug, Clone, Deserialize)]
pub(crate) struct GeminiModelList {
    #[serde(default)]
    pub(crate) models: Vec<GeminiModel>,
}

#[derive(Debug, Clone, Deserialize)]
pub(crate) struct GeminiModel {
    #[serde(default)]
    pub(crate) name: Option<String>,
    #[serde(default, rename = "displayName")]
    pub(crate) display_name: Option<String>,
}
