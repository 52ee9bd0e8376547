//! OpenAI chat-completions adapter.
//!
//! DeepSeek exposes the same wire format, so `complete_chat` is shared with
//! `llm_client::deepseek`.

use async_trait::async_trait;
use reqwest::Client;
use serde::{Deserialize, Serialize};

use super::{
    parse_payload, require_credential, send_json, FailureKind, ProviderAdapter, ProviderConfig,
    ProviderFailure, ProviderResult, TEMPERATURE,
};

#[derive(Debug, Serialize)]
struct ChatRequest<'a> {
    model: &'a str,
    messages: Vec<ChatMessage<'a>>,
    temperature: f32,
}

#[derive(Debug, Serialize)]
struct ChatMessage<'a> {
    role: &'a str,
    content: &'a str,
}

#[derive(Debug, Deserialize)]
struct ChatResponse {
    #[serde(default)]
    choices: Vec<Choice>,
}

#[derive(Debug, Deserialize)]
struct Choice {
    message: ChoiceMessage,
}

#[derive(Debug, Deserialize)]
struct ChoiceMessage {
    content: Option<String>,
}

impl ChatResponse {
    /// Text of the first choice, if any.
    fn text(&self) -> Option<&str> {
        self.choices
            .first()
            .and_then(|c| c.message.content.as_deref())
    }
}

/// One chat-completions round trip: bearer auth, a single user message.
pub(crate) async fn complete_chat(
    http: &Client,
    prompt: &str,
    config: &ProviderConfig,
) -> ProviderResult {
    let api_key = require_credential(config)?;

    let body = ChatRequest {
        model: &config.model_id,
        messages: vec![ChatMessage {
            role: "user",
            content: prompt,
        }],
        temperature: TEMPERATURE,
    };

    let request = http
        .post(&config.endpoint)
        .bearer_auth(api_key)
        .timeout(config.timeout)
        .json(&body);

    let response: ChatResponse = send_json(request).await?;
    let text = response.text().ok_or_else(|| {
        ProviderFailure::new(
            FailureKind::MalformedResponse,
            "response contained no message content",
        )
    })?;

    parse_payload(text)
}

pub struct OpenAiAdapter {
    http: Client,
}

impl OpenAiAdapter {
    pub fn new(http: Client) -> Self {
        Self { http }
    }
}

#[async_trait]
impl ProviderAdapter for OpenAiAdapter {
    async fn generate(&self, prompt: &str, config: &ProviderConfig) -> ProviderResult {
        complete_chat(&self.http, prompt, config).await
    }
}
