//! DeepSeek adapter. Speaks the OpenAI chat-completions format.

use async_trait::async_trait;
use reqwest::Client;

use super::openai::complete_chat;
use super::{ProviderAdapter, ProviderConfig, ProviderResult};

pub struct DeepSeekAdapter {
    http: Client,
}

impl DeepSeekAdapter {
    pub fn new(http: Client) -> Self {
        Self { http }
    }
}

#[async_trait]
impl ProviderAdapter for DeepSeekAdapter {
    async fn generate(&self, prompt: &str, config: &ProviderConfig) -> ProviderResult {
        complete_chat(&self.http, prompt, config).await
    }
}

#[cfg(test)]
mod tests {
    use std::time::Duration;

    use serde_json::json;
    use wiremock::matchers::{body_partial_json, header, method, path};
    use wiremock::{Mock, MockServer, ResponseTemplate};

    use super::*;
    use crate::llm_client::{FailureKind, ProviderKind};

    fn test_config(server: &MockServer) -> ProviderConfig {
        let mut config = ProviderConfig::new(
            ProviderKind::DeepSeek,
            Some("ds-test".to_string()),
            Duration::from_secs(5),
        );
        config.endpoint = format!("{}/v1/chat/completions", server.uri());
        config
    }

    #[tokio::test]
    async fn test_deepseek_sends_model_and_bearer_key() {
        let server = MockServer::start().await;
        Mock::given(method("POST"))
            .and(path("/v1/chat/completions"))
            .and(header("authorization", "Bearer ds-test"))
            .and(body_partial_json(json!({
                "model": "deepseek-chat",
                "messages": [{"role": "user", "content": "career prompt"}]
            })))
            .respond_with(ResponseTemplate::new(200).set_body_json(json!({
                "choices": [{"message": {"role": "assistant", "content": "[\"Chartered Accountant\"]"}}]
            })))
            .expect(1)
            .mount(&server)
            .await;

        let adapter = DeepSeekAdapter::new(Client::new());
        let payload = adapter
            .generate("career prompt", &test_config(&server))
            .await
            .unwrap();

        assert_eq!(payload, json!(["Chartered Accountant"]));
    }

    #[tokio::test]
    async fn test_deepseek_401_is_auth_error() {
        let server = MockServer::start().await;
        Mock::given(method("POST"))
            .respond_with(ResponseTemplate::new(401).set_body_string("invalid api key"))
            .mount(&server)
            .await;

        let adapter = DeepSeekAdapter::new(Client::new());
        let failure = adapter
            .generate("prompt", &test_config(&server))
            .await
            .unwrap_err();

        assert_eq!(failure.kind, FailureKind::AuthError);
    }
}
