//! Generative client for the Google Generative Language `generateContent`
//! endpoint.

use std::time::Duration;

use async_trait::async_trait;
use serde::{Deserialize, Serialize};

use parley_core::engine::{GenerativeResponder, ResponderError};
use parley_core::types::ResponseMode;
use parley_memory::ChatTurn;

use crate::instructions;

pub const DEFAULT_BASE_URL: &str = "https://generativelanguage.googleapis.com";
const DEFAULT_MODEL: &str = "gemini-pro";

#[derive(Debug, Serialize)]
struct GenerateContentRequest {
    contents: Vec<Content>,
}

#[derive(Debug, Serialize, Deserialize)]
struct Content {
    parts: Vec<Part>,
}

#[derive(Debug, Serialize, Deserialize)]
struct Part {
    text: String,
}

#[derive(Debug, Deserialize)]
struct GenerateContentResponse {
    #[serde(default)]
    candidates: Vec<Candidate>,
}

#[derive(Debug, Deserialize)]
struct Candidate {
    content: Content,
}

/// Stateless client: the whole prompt (instruction, flattened history,
/// current utterance) is rebuilt per call from the inputs.
pub struct GeminiClient {
    client: reqwest::Client,
    base_url: String,
    api_key: String,
    model: String,
}

impl GeminiClient {
    pub fn new(api_key: String) -> Self {
        Self::with_base_url(api_key, DEFAULT_BASE_URL.to_string())
    }

    pub fn with_base_url(api_key: String, base_url: String) -> Self {
        let client = reqwest::Client::builder()
            .timeout(Duration::from_secs(60))
            .build()
            .unwrap_or_else(|_| reqwest::Client::new());

        Self {
            client,
            base_url,
            api_key,
            model: DEFAULT_MODEL.to_string(),
        }
    }

    fn request_body(utterance: &str, history: &[ChatTurn], mode: ResponseMode) -> GenerateContentRequest {
        let flattened = history
            .iter()
            .map(ChatTurn::transcript_line)
            .collect::<Vec<_>>()
            .join("\n");

        let mut parts = vec![
            Part {
                text: instructions::for_mode(mode).to_string(),
            },
            Part {
                text: format!("Chat history:\n{}", flattened),
            },
        ];

        // The current utterance is omitted entirely in title mode; the
        // title is derived from the transcript alone.
        if let ResponseMode::Reply(_) = mode {
            parts.push(Part {
                text: format!("User: {}", utterance),
            });
        }

        GenerateContentRequest {
            contents: vec![Content { parts }],
        }
    }

    fn request_url(&self) -> String {
        format!(
            "{}/v1beta/models/{}:generateContent?key={}",
            self.base_url.trim_end_matches('/'),
            self.model,
            self.api_key
        )
    }
}

#[async_trait]
impl GenerativeResponder for GeminiClient {
    async fn respond(
        &self,
        utterance: &str,
        history: &[ChatTurn],
        mode: ResponseMode,
    ) -> Result<String, ResponderError> {
        let body = Self::request_body(utterance, history, mode);
        tracing::debug!(
            "generative request: mode={:?}, history_turns={}",
            mode,
            history.len()
        );

        let response = self
            .client
            .post(self.request_url())
            .json(&body)
            .send()
            .await
            .map_err(|e| {
                if e.is_connect() || e.is_timeout() {
                    ResponderError::Http("Network connection failed".to_string())
                } else {
                    ResponderError::Http(format!("HTTP request failed: {}", e))
                }
            })?;

        if !response.status().is_success() {
            let status = response.status();
            let text = response.text().await.unwrap_or_default();
            return Err(ResponderError::Api(format!("{}: {}", status, text)));
        }

        let parsed: GenerateContentResponse = response
            .json()
            .await
            .map_err(|e| ResponderError::Parse(e.to_string()))?;

        let text = parsed
            .candidates
            .first()
            .and_then(|candidate| candidate.content.parts.first())
            .map(|part| part.text.as_str())
            .ok_or(ResponderError::EmptyResponse)?;

        let cleaned = strip_self_identification(text);
        if cleaned.is_empty() {
            return Err(ResponderError::EmptyResponse);
        }

        Ok(cleaned.to_string())
    }
}

/// Drop a leading `"Gemini:"`-style self-identification the model sometimes
/// prepends, plus surrounding whitespace.
fn strip_self_identification(text: &str) -> &str {
    let trimmed = text.trim();
    let bytes = trimmed.as_bytes();
    const PREFIX: &[u8] = b"gemini:";
    if bytes.len() >= PREFIX.len() && bytes[..PREFIX.len()].eq_ignore_ascii_case(PREFIX) {
        trimmed[PREFIX.len()..].trim_start()
    } else {
        trimmed
    }
}
