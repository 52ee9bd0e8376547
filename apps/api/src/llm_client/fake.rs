//! Scripted provider adapter for tests that must not touch the network.

use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::{Arc, Mutex};
use std::time::Duration;

use async_trait::async_trait;
use serde_json::Value;

use super::{
    FailureKind, ProviderAdapter, ProviderConfig, ProviderFailure, ProviderKind, ProviderResult,
};
use crate::generation::orchestrator::ProviderSlot;

/// Returns the same result on every call and records what it was asked.
pub struct FakeAdapter {
    result: ProviderResult,
    delay: Option<Duration>,
    calls: AtomicUsize,
    prompts: Mutex<Vec<String>>,
}

impl FakeAdapter {
    pub fn returning(payload: Value) -> Arc<Self> {
        Self::with_result(Ok(payload), None)
    }

    pub fn failing(kind: FailureKind) -> Arc<Self> {
        Self::with_result(Err(ProviderFailure::new(kind, "scripted failure")), None)
    }

    /// Responds with `payload` only after `delay` has elapsed.
    pub fn slow(payload: Value, delay: Duration) -> Arc<Self> {
        Self::with_result(Ok(payload), Some(delay))
    }

    fn with_result(result: ProviderResult, delay: Option<Duration>) -> Arc<Self> {
        Arc::new(Self {
            result,
            delay,
            calls: AtomicUsize::new(0),
            prompts: Mutex::new(Vec::new()),
        })
    }

    pub fn calls(&self) -> usize {
        self.calls.load(Ordering::SeqCst)
    }

    pub fn last_prompt(&self) -> Option<String> {
        self.prompts.lock().ok().and_then(|p| p.last().cloned())
    }
}

#[async_trait]
impl ProviderAdapter for FakeAdapter {
    async fn generate(&self, prompt: &str, _config: &ProviderConfig) -> ProviderResult {
        self.calls.fetch_add(1, Ordering::SeqCst);
        if let Ok(mut prompts) = self.prompts.lock() {
            prompts.push(prompt.to_string());
        }
        if let Some(delay) = self.delay {
            tokio::time::sleep(delay).await;
        }
        self.result.clone()
    }
}

/// Wraps a fake in a slot named after `kind`, with a credential and a 5s timeout.
pub fn slot(kind: ProviderKind, adapter: &Arc<FakeAdapter>) -> ProviderSlot {
    ProviderSlot {
        config: ProviderConfig::new(kind, Some("test-key".to_string()), Duration::from_secs(5)),
        adapter: adapter.clone(),
    }
}
