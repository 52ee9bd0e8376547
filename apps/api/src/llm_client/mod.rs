/// LLM Client: the single point of entry for all hosted text-generation calls.
///
/// ARCHITECTURAL RULE: No other module may call a provider API directly.
/// Each adapter issues exactly one request per `generate` call and reports the
/// outcome as a `ProviderResult`. Fallback between providers is owned by
/// `generation::orchestrator`, never by an adapter.
use std::fmt;
use std::str::FromStr;
use std::sync::Arc;
use std::time::Duration;

use async_trait::async_trait;
use reqwest::{Client, RequestBuilder, StatusCode};
use serde::de::DeserializeOwned;
use serde_json::Value;
use thiserror::Error;

pub mod deepseek;
pub mod gemini;
pub mod openai;
pub mod prompts;

#[cfg(test)]
pub(crate) mod fake;

/// Sampling temperature sent to every provider.
pub const TEMPERATURE: f32 = 0.7;
/// Upper bound on raw text echoed into failure details.
const SNIPPET_CHARS: usize = 200;

// ────────────────────────────────────────────────────────────────────────────
// Provider identity and configuration
// ────────────────────────────────────────────────────────────────────────────

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ProviderKind {
    OpenAi,
    Gemini,
    DeepSeek,
}

impl ProviderKind {
    pub fn display_name(self) -> &'static str {
        match self {
            ProviderKind::OpenAi => "OpenAI",
            ProviderKind::Gemini => "Gemini",
            ProviderKind::DeepSeek => "DeepSeek",
        }
    }

    /// Prefix of the `<PREFIX>_API_KEY` / `_API_URL` / `_MODEL` variables.
    pub fn env_prefix(self) -> &'static str {
        match self {
            ProviderKind::OpenAi => "OPENAI",
            ProviderKind::Gemini => "GEMINI",
            ProviderKind::DeepSeek => "DEEPSEEK",
        }
    }

    pub fn default_endpoint(self) -> &'static str {
        match self {
            ProviderKind::OpenAi => "https://api.openai.com/v1/chat/completions",
            ProviderKind::Gemini => "https://generativelanguage.googleapis.com/v1beta/models",
            ProviderKind::DeepSeek => "https://api.deepseek.com/v1/chat/completions",
        }
    }

    pub fn default_model(self) -> &'static str {
        match self {
            ProviderKind::OpenAi => "gpt-3.5-turbo",
            ProviderKind::Gemini => "gemini-2.5-flash",
            ProviderKind::DeepSeek => "deepseek-chat",
        }
    }
}

impl FromStr for ProviderKind {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "openai" => Ok(ProviderKind::OpenAi),
            "gemini" => Ok(ProviderKind::Gemini),
            "deepseek" => Ok(ProviderKind::DeepSeek),
            other => Err(format!(
                "unknown provider '{other}' (expected openai, gemini or deepseek)"
            )),
        }
    }
}

/// Static per-provider settings, built once at startup and never mutated.
#[derive(Clone)]
pub struct ProviderConfig {
    pub kind: ProviderKind,
    pub name: String,
    pub endpoint: String,
    pub api_key: Option<String>,
    pub model_id: String,
    /// Upper bound for one call to this provider.
    pub timeout: Duration,
}

impl ProviderConfig {
    /// Config with the provider's default endpoint and model.
    pub fn new(kind: ProviderKind, api_key: Option<String>, timeout: Duration) -> Self {
        Self {
            kind,
            name: kind.display_name().to_string(),
            endpoint: kind.default_endpoint().to_string(),
            api_key,
            model_id: kind.default_model().to_string(),
            timeout,
        }
    }

    /// The credential, if present and non-blank.
    pub fn credential(&self) -> Option<&str> {
        self.api_key
            .as_deref()
            .map(str::trim)
            .filter(|key| !key.is_empty())
    }
}

impl fmt::Debug for ProviderConfig {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("ProviderConfig")
            .field("name", &self.name)
            .field("endpoint", &self.endpoint)
            .field("api_key", &self.credential().map(|_| "<redacted>"))
            .field("model_id", &self.model_id)
            .field("timeout", &self.timeout)
            .finish()
    }
}

// ────────────────────────────────────────────────────────────────────────────
// Results
// ────────────────────────────────────────────────────────────────────────────

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FailureKind {
    NetworkError,
    AuthError,
    RateLimited,
    MalformedResponse,
    Timeout,
}

impl fmt::Display for FailureKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let label = match self {
            FailureKind::NetworkError => "network error",
            FailureKind::AuthError => "auth error",
            FailureKind::RateLimited => "rate limited",
            FailureKind::MalformedResponse => "malformed response",
            FailureKind::Timeout => "timeout",
        };
        f.write_str(label)
    }
}

/// Why a single provider attempt did not produce a payload.
/// `detail` may contain upstream text: log it, never return it to clients.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("{kind}: {detail}")]
pub struct ProviderFailure {
    pub kind: FailureKind,
    pub detail: String,
}

impl ProviderFailure {
    pub fn new(kind: FailureKind, detail: impl Into<String>) -> Self {
        Self {
            kind,
            detail: detail.into(),
        }
    }

    pub fn timeout(after: Duration) -> Self {
        Self::new(
            FailureKind::Timeout,
            format!("no response within {}ms", after.as_millis()),
        )
    }
}

/// Parsed JSON on success. The shape is NOT validated here.
pub type ProviderResult = Result<Value, ProviderFailure>;

// ────────────────────────────────────────────────────────────────────────────
// Adapter trait
// ────────────────────────────────────────────────────────────────────────────

/// One hosted text-generation provider.
///
/// Implementations must not panic and must not retry; every outcome is
/// reported through `ProviderResult`.
#[async_trait]
pub trait ProviderAdapter: Send + Sync {
    async fn generate(&self, prompt: &str, config: &ProviderConfig) -> ProviderResult;
}

/// Builds the adapter for `kind` on top of a shared HTTP client.
pub fn adapter_for(kind: ProviderKind, http: Client) -> Arc<dyn ProviderAdapter> {
    match kind {
        ProviderKind::OpenAi => Arc::new(openai::OpenAiAdapter::new(http)),
        ProviderKind::Gemini => Arc::new(gemini::GeminiAdapter::new(http)),
        ProviderKind::DeepSeek => Arc::new(deepseek::DeepSeekAdapter::new(http)),
    }
}

// ────────────────────────────────────────────────────────────────────────────
// Helpers shared by the adapters
// ────────────────────────────────────────────────────────────────────────────

/// Fails fast with `AuthError` when the provider has no usable credential.
pub(crate) fn require_credential(config: &ProviderConfig) -> Result<&str, ProviderFailure> {
    config.credential().ok_or_else(|| {
        ProviderFailure::new(
            FailureKind::AuthError,
            format!("{} API key is not configured", config.name),
        )
    })
}

/// Sends the request and decodes a 2xx body into the provider's envelope type.
pub(crate) async fn send_json<R: DeserializeOwned>(
    request: RequestBuilder,
) -> Result<R, ProviderFailure> {
    let response = request.send().await.map_err(transport_failure)?;
    let status = response.status();
    let body = response.text().await.map_err(transport_failure)?;

    if !status.is_success() {
        return Err(status_failure(status, &body));
    }

    serde_json::from_str(&body).map_err(|e| {
        ProviderFailure::new(
            FailureKind::MalformedResponse,
            format!("unexpected response envelope ({e}): {}", snippet(&body)),
        )
    })
}

fn transport_failure(err: reqwest::Error) -> ProviderFailure {
    if err.is_timeout() {
        ProviderFailure::new(FailureKind::Timeout, err.to_string())
    } else {
        ProviderFailure::new(FailureKind::NetworkError, err.to_string())
    }
}

fn status_failure(status: StatusCode, body: &str) -> ProviderFailure {
    let kind = match status {
        StatusCode::TOO_MANY_REQUESTS => FailureKind::RateLimited,
        StatusCode::UNAUTHORIZED | StatusCode::FORBIDDEN => FailureKind::AuthError,
        _ => FailureKind::NetworkError,
    };
    ProviderFailure::new(kind, format!("status {}: {}", status.as_u16(), snippet(body)))
}

/// Strips Markdown fences from model text and parses the rest as JSON.
pub(crate) fn parse_payload(text: &str) -> ProviderResult {
    let cleaned = strip_json_fences(text);
    serde_json::from_str(cleaned).map_err(|e| {
        ProviderFailure::new(
            FailureKind::MalformedResponse,
            format!("model text is not JSON ({e}): {}", snippet(cleaned)),
        )
    })
}

/// Strips a leading ``` fence (with an optional `json` tag in any case) and a
/// trailing ``` fence, each optional.
fn strip_json_fences(text: &str) -> &str {
    let text = text.trim();
    let text = match text.strip_prefix("```") {
        Some(rest) => match rest.get(..4) {
            Some(tag) if tag.eq_ignore_ascii_case("json") => &rest[4..],
            _ => rest,
        },
        None => text,
    };
    let text = text.trim_end();
    text.strip_suffix("```").unwrap_or(text).trim()
}

fn snippet(text: &str) -> String {
    let mut out: String = text.chars().take(SNIPPET_CHARS).collect();
    if text.chars().count() > SNIPPET_CHARS {
        out.push('…');
    }
    out
}
