use std::collections::HashMap;
use std::sync::{Arc, Mutex};

use async_trait::async_trait;
use futures_util::stream;
use serde_json::Value;
use tandem_llm::error::LLMError;
use tandem_llm::http::{HttpRequest, HttpResponse, HttpStreamResponse, HttpTransport};

/// In-memory transport that replays one canned reply and records every request.
pub struct ScriptedTransport {
    status: u16,
    headers: HashMap<String, String>,
    chunks: Vec<Vec<u8>>,
    requests: Mutex<Vec<HttpRequest>>,
}

#[allow(dead_code)]
impl ScriptedTransport {
    pub fn new<I>(status: u16, chunks: I) -> Arc<Self>
    where
        I: IntoIterator,
        I::Item: AsRef<str>,
    {
        Self::with_headers(status, HashMap::new(), chunks)
    }

    pub fn with_headers<I>(status: u16, headers: HashMap<String, String>, chunks: I) -> Arc<Self>
    where
        I: IntoIterator,
        I::Item: AsRef<str>,
    {
        Arc::new(Self {
            status,
            headers,
            chunks: chunks
                .into_iter()
                .map(|chunk| chunk.as_ref().as_bytes().to_vec())
                .collect(),
            requests: Mutex::new(Vec::new()),
        })
    }

    /// SSE body built from `data:` payloads, one event each.
    pub fn sse(payloads: &[&str]) -> Vec<String> {
        payloads
            .iter()
            .map(|payload| format!("data: {payload}\n\n"))
            .collect()
    }

    pub fn requests(&self) -> Vec<HttpRequest> {
        self.requests.lock().unwrap().clone()
    }

    pub fn last_request(&self) -> HttpRequest {
        self.requests().pop().expect("at least one request")
    }

    pub fn last_body(&self) -> Value {
        let body = self.last_request().body.expect("request body");
        serde_json::from_slice(&body).expect("json body")
    }
}

#[async_trait]
impl HttpTransport for ScriptedTransport {
    async fn send(&self, request: HttpRequest) -> Result<HttpResponse, LLMError> {
        self.requests.lock().unwrap().push(request);
        Ok(HttpResponse {
            status: self.status,
            headers: self.headers.clone(),
            body: self.chunks.concat(),
        })
    }

    async fn send_stream(&self, request: HttpRequest) -> Result<HttpStreamResponse, LLMError> {
        self.requests.lock().unwrap().push(request);
        let chunks: Vec<Result<Vec<u8>, LLMError>> =
            self.chunks.iter().cloned().map(Ok).collect();
        Ok(HttpStreamResponse {
            status: self.status,
            headers: self.headers.clone(),
            body: Box::pin(stream::iter(chunks)),
        })
    }
}
