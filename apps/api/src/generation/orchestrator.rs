//! Provider fallback orchestration.
//!
//! Flow: build_prompt → provider[0] → validate → (success | provider[1] → …) → exhausted.
//!
//! Providers are tried strictly one at a time in configured order. Each call is
//! bounded by that provider's timeout. The first payload that passes the
//! validator wins; nothing is merged across providers and no provider is
//! retried within one request.

use std::sync::Arc;

use reqwest::Client;
use tracing::{error, info, warn};

use crate::generation::prompts::build_prompt;
use crate::generation::request::{
    GenerationPayload, GenerationRequest, Qualification, QuizAnswer, RequestKind,
};
use crate::generation::validator::validate;
use crate::llm_client::{
    adapter_for, FailureKind, ProviderAdapter, ProviderConfig, ProviderFailure,
};

// ────────────────────────────────────────────────────────────────────────────
// Data models
// ────────────────────────────────────────────────────────────────────────────

/// A provider's adapter paired with its read-only configuration.
#[derive(Clone)]
pub struct ProviderSlot {
    pub config: ProviderConfig,
    pub adapter: Arc<dyn ProviderAdapter>,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum AttemptStatus {
    Served,
    Failed(ProviderFailure),
}

/// One provider tried during a run, in attempt order.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AttemptRecord {
    pub provider: String,
    pub status: AttemptStatus,
}

impl AttemptRecord {
    pub fn failure(&self) -> Option<&ProviderFailure> {
        match &self.status {
            AttemptStatus::Failed(failure) => Some(failure),
            AttemptStatus::Served => None,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum OrchestrationOutcome {
    Success {
        payload: GenerationPayload,
        provider_used: String,
        /// Failed attempts followed by the serving one.
        attempts: Vec<AttemptRecord>,
    },
    /// Every configured provider failed. `attempts` holds one failure per provider.
    Exhausted { attempts: Vec<AttemptRecord> },
}

impl OrchestrationOutcome {
    pub fn attempts(&self) -> &[AttemptRecord] {
        match self {
            OrchestrationOutcome::Success { attempts, .. }
            | OrchestrationOutcome::Exhausted { attempts } => attempts,
        }
    }

    /// The payload on success, dropping the attempt log.
    pub fn into_payload(self) -> Option<GenerationPayload> {
        match self {
            OrchestrationOutcome::Success { payload, .. } => Some(payload),
            OrchestrationOutcome::Exhausted { .. } => None,
        }
    }
}

// ────────────────────────────────────────────────────────────────────────────
// Orchestrator
// ────────────────────────────────────────────────────────────────────────────

/// Stateless apart from its provider list; share it behind an `Arc`.
pub struct Orchestrator {
    providers: Vec<ProviderSlot>,
}

impl Orchestrator {
    pub fn new(providers: Vec<ProviderSlot>) -> Self {
        Self { providers }
    }

    /// One real adapter per config, all sharing `http`'s connection pool.
    pub fn from_configs(configs: Vec<ProviderConfig>, http: &Client) -> Self {
        let providers = configs
            .into_iter()
            .map(|config| ProviderSlot {
                adapter: adapter_for(config.kind, http.clone()),
                config,
            })
            .collect();
        Self::new(providers)
    }

    /// Provider names in attempt order.
    pub fn provider_names(&self) -> Vec<&str> {
        self.providers
            .iter()
            .map(|slot| slot.config.name.as_str())
            .collect()
    }

    pub async fn generate_quiz(&self, qualification: Qualification) -> OrchestrationOutcome {
        self.run(&GenerationRequest::Quiz { qualification }).await
    }

    pub async fn get_career_titles(
        &self,
        qualification: Qualification,
        answers: Vec<QuizAnswer>,
    ) -> OrchestrationOutcome {
        self.run(&GenerationRequest::Titles {
            qualification,
            answers,
        })
        .await
    }

    pub async fn get_career_details(
        &self,
        career_title: String,
        qualification: Qualification,
    ) -> OrchestrationOutcome {
        self.run(&GenerationRequest::Details {
            qualification,
            career_title,
        })
        .await
    }

    /// Tries each provider in order until one yields a valid payload.
    pub async fn run(&self, request: &GenerationRequest) -> OrchestrationOutcome {
        let kind = request.kind();
        let prompt = build_prompt(request);
        let mut attempts = Vec::with_capacity(self.providers.len());

        for slot in &self.providers {
            let provider = slot.config.name.clone();

            match attempt(slot, &prompt, kind).await {
                Ok(payload) => {
                    info!(
                        "{} generated by {} (class {}) after {} failed attempt(s)",
                        kind,
                        provider,
                        request.qualification(),
                        attempts.len()
                    );
                    attempts.push(AttemptRecord {
                        provider: provider.clone(),
                        status: AttemptStatus::Served,
                    });
                    return OrchestrationOutcome::Success {
                        payload,
                        provider_used: provider,
                        attempts,
                    };
                }
                Err(failure) => {
                    warn!("{} attempt via {} failed: {}", kind, provider, failure);
                    attempts.push(AttemptRecord {
                        provider,
                        status: AttemptStatus::Failed(failure),
                    });
                }
            }
        }

        error!(
            "{} generation exhausted all {} provider(s): {}",
            kind,
            attempts.len(),
            attempts
                .iter()
                .filter_map(|a| a.failure().map(|f| format!("{}={}", a.provider, f.kind)))
                .collect::<Vec<_>>()
                .join(", ")
        );

        OrchestrationOutcome::Exhausted { attempts }
    }
}

/// One bounded call to one provider, followed by structural validation.
async fn attempt(
    slot: &ProviderSlot,
    prompt: &str,
    kind: RequestKind,
) -> Result<GenerationPayload, ProviderFailure> {
    let timeout = slot.config.timeout;
    let value = tokio::time::timeout(timeout, slot.adapter.generate(prompt, &slot.config))
        .await
        .map_err(|_| ProviderFailure::timeout(timeout))??;

    validate(kind, value).map_err(|reason| {
        ProviderFailure::new(
            FailureKind::MalformedResponse,
            format!("payload does not match the {kind} schema: {reason}"),
        )
    })
}

// ────────────────────────────────────────────────────────────────────────────
// Tests
// ────────────────────────────────────────────────────────────────────────────
