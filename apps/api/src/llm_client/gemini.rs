//! Gemini `generateContent` adapter.
//!
//! The key travels in the `x-goog-api-key` header, never in the URL.

use async_trait::async_trait;
use reqwest::Client;
use serde::{Deserialize, Serialize};

use super::{
    parse_payload, require_credential, send_json, FailureKind, ProviderAdapter, ProviderConfig,
    ProviderFailure, ProviderResult, TEMPERATURE,
};

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
struct GenerateContentRequest<'a> {
    contents: Vec<Content<'a>>,
    generation_config: GenerationConfig,
}

#[derive(Debug, Serialize)]
struct Content<'a> {
    parts: Vec<Part<'a>>,
}

#[derive(Debug, Serialize)]
struct Part<'a> {
    text: &'a str,
}

#[derive(Debug, Serialize)]
struct GenerationConfig {
    temperature: f32,
}

#[derive(Debug, Deserialize)]
struct GenerateContentResponse {
    #[serde(default)]
    candidates: Vec<Candidate>,
}

#[derive(Debug, Deserialize)]
struct Candidate {
    content: Option<CandidateContent>,
}

#[derive(Debug, Deserialize)]
struct CandidateContent {
    #[serde(default)]
    parts: Vec<ResponsePart>,
}

#[derive(Debug, Deserialize)]
struct ResponsePart {
    text: Option<String>,
}

impl GenerateContentResponse {
    /// `candidates[0].content.parts[0].text`
    fn text(&self) -> Option<&str> {
        self.candidates
            .first()
            .and_then(|c| c.content.as_ref())
            .and_then(|c| c.parts.first())
            .and_then(|p| p.text.as_deref())
    }
}

pub struct GeminiAdapter {
    http: Client,
}

impl GeminiAdapter {
    pub fn new(http: Client) -> Self {
        Self { http }
    }
}

fn generate_content_url(config: &ProviderConfig) -> String {
    format!(
        "{}/{}:generateContent",
        config.endpoint.trim_end_matches('/'),
        config.model_id
    )
}

#[async_trait]
impl ProviderAdapter for GeminiAdapter {
    async fn generate(&self, prompt: &str, config: &ProviderConfig) -> ProviderResult {
        let api_key = require_credential(config)?;

        let body = GenerateContentRequest {
            contents: vec![Content {
                parts: vec![Part { text: prompt }],
            }],
            generation_config: GenerationConfig {
                temperature: TEMPERATURE,
            },
        };

        let request = self
            .http
            .post(generate_content_url(config))
            .header("x-goog-api-key", api_key)
            .timeout(config.timeout)
            .json(&body);

        let response: GenerateContentResponse = send_json(request).await?;
        let text = response.text().ok_or_else(|| {
            ProviderFailure::new(
                FailureKind::MalformedResponse,
                "response contained no candidate text",
            )
        })?;

        parse_payload(text)
    }
}
