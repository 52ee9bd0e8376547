use std::sync::Arc;

use crate::colleges::client::CollegeClient;
use crate::generation::orchestrator::Orchestrator;

/// Shared application state injected into all route handlers via Axum extractors.
#[derive(Clone)]
pub struct AppState {
    /// Provider fallback chain. Read-only after startup.
    pub orchestrator: Arc<Orchestrator>,
    pub colleges: CollegeClient,
}
