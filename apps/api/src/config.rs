use std::collections::HashSet;
use std::time::Duration;

use anyhow::{bail, Context, Result};

use crate::llm_client::{ProviderConfig, ProviderKind};

const DEFAULT_PROVIDER_ORDER: &str = "openai,gemini,deepseek";
const DEFAULT_PROVIDER_TIMEOUT_SECS: u64 = 30;
const DEFAULT_COLLEGE_API_URL: &str = "http://localhost:5000/colleges";
const DEFAULT_COLLEGE_TIMEOUT_SECS: u64 = 10;

/// Application configuration loaded from environment variables.
/// Fails at startup on malformed values. Missing provider keys are not an
/// error: that provider is skipped at request time.
#[derive(Debug, Clone)]
pub struct Config {
    /// Attempt order for every generation request.
    pub providers: Vec<ProviderConfig>,
    pub college_api_url: String,
    /// Upper bound for one college directory request.
    pub college_timeout: Duration,
    pub port: u16,
    pub rust_log: String,
}

impl Config {
    pub fn from_env() -> Result<Self> {
        dotenvy::dotenv().ok(); // load .env if present; ignore if missing

        let timeout = timeout_from_env("PROVIDER_TIMEOUT_SECS", DEFAULT_PROVIDER_TIMEOUT_SECS)?;

        let order = parse_provider_order(
            &optional_env("PROVIDER_ORDER").unwrap_or_else(|| DEFAULT_PROVIDER_ORDER.to_string()),
        )?;

        Ok(Config {
            providers: order
                .into_iter()
                .map(|kind| provider_from_env(kind, timeout))
                .collect(),
            college_api_url: optional_env("COLLEGE_API_URL")
                .unwrap_or_else(|| DEFAULT_COLLEGE_API_URL.to_string()),
            college_timeout: timeout_from_env(
                "COLLEGE_TIMEOUT_SECS",
                DEFAULT_COLLEGE_TIMEOUT_SECS,
            )?,
            port: std::env::var("PORT")
                .unwrap_or_else(|_| "8080".to_string())
                .parse::<u16>()
                .context("PORT must be a valid port number")?,
            rust_log: std::env::var("RUST_LOG").unwrap_or_else(|_| "info".to_string()),
        })
    }
}

/// `<PREFIX>_API_KEY`, plus optional `<PREFIX>_API_URL` / `<PREFIX>_MODEL` overrides.
fn provider_from_env(kind: ProviderKind, timeout: Duration) -> ProviderConfig {
    let prefix = kind.env_prefix();
    let mut config = ProviderConfig::new(kind, optional_env(&format!("{prefix}_API_KEY")), timeout);
    if let Some(endpoint) = optional_env(&format!("{prefix}_API_URL")) {
        config.endpoint = endpoint;
    }
    if let Some(model) = optional_env(&format!("{prefix}_MODEL")) {
        config.model_id = model;
    }
    config
}

/// Parses a comma-separated provider list such as `gemini,openai`.
pub fn parse_provider_order(raw: &str) -> Result<Vec<ProviderKind>> {
    let mut seen = HashSet::new();
    let mut order = Vec::new();

    for name in raw.split(',').map(str::trim).filter(|s| !s.is_empty()) {
        let kind: ProviderKind = name
            .parse()
            .map_err(|e: String| anyhow::anyhow!("PROVIDER_ORDER: {e}"))?;
        if !seen.insert(kind) {
            bail!("PROVIDER_ORDER lists '{name}' more than once");
        }
        order.push(kind);
    }

    if order.is_empty() {
        bail!("PROVIDER_ORDER must name at least one provider");
    }
    Ok(order)
}

/// Whole seconds, greater than zero.
fn timeout_from_env(key: &str, default_secs: u64) -> Result<Duration> {
    let secs = match optional_env(key) {
        Some(raw) => raw
            .parse::<u64>()
            .with_context(|| format!("{key} must be a whole number of seconds"))?,
        None => default_secs,
    };
    if secs == 0 {
        bail!("{key} must be greater than zero");
    }
    Ok(Duration::from_secs(secs))
}

fn optional_env(key: &str) -> Option<String> {
    std::env::var(key).ok().filter(|v| !v.trim().is_empty())
}
