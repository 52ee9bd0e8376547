//! Axum route handlers for the Generation API.

use axum::{
    extract::{rejection::JsonRejection, Query, State},
    Json,
};
use serde::{Deserialize, Serialize};
use tracing::debug;

use crate::errors::AppError;
use crate::generation::orchestrator::OrchestrationOutcome;
use crate::generation::request::{GenerationPayload, Qualification, QuizAnswer};
use crate::state::AppState;

// ────────────────────────────────────────────────────────────────────────────
// Request / Response types
// ────────────────────────────────────────────────────────────────────────────

#[derive(Debug, Deserialize)]
pub struct QuizQuery {
    pub qualification: Option<String>,
}

#[derive(Debug, Serialize)]
pub struct QuizResponse {
    pub quiz: GenerationPayload,
}

#[derive(Debug, Deserialize)]
pub struct SubmitQuizRequest {
    pub qualification: Option<String>,
    pub answers: Option<Vec<QuizAnswer>>,
}

#[derive(Debug, Serialize)]
pub struct CareerTitlesResponse {
    pub career_titles: GenerationPayload,
}

#[derive(Debug, Deserialize)]
pub struct CareerDetailsRequest {
    pub qualification: Option<String>,
    pub career_title: Option<String>,
}

#[derive(Debug, Serialize)]
pub struct CareerDetailsResponse {
    pub career_details: GenerationPayload,
}

fn parse_qualification(raw: Option<&str>) -> Result<Qualification, AppError> {
    raw.ok_or_else(|| AppError::Validation("qualification is required".to_string()))?
        .parse()
        .map_err(AppError::Validation)
}

/// Success becomes the payload; exhaustion becomes a 503 with a generic message.
/// Per-provider failures were already logged by the orchestrator.
fn payload_or_unavailable(
    outcome: OrchestrationOutcome,
    what: &str,
) -> Result<GenerationPayload, AppError> {
    let attempts = outcome.attempts().len();
    match outcome.into_payload() {
        Some(payload) => {
            debug!("{what}: served after {attempts} provider attempt(s)");
            Ok(payload)
        }
        None => Err(AppError::ServiceUnavailable(format!(
            "Failed to {what}. AI service may be unavailable."
        ))),
    }
}

// ────────────────────────────────────────────────────────────────────────────
// Handlers
// ────────────────────────────────────────────────────────────────────────────

/// GET /api/quiz?qualification=10
///
/// Generates a short aptitude and interest quiz for the student's level.
pub async fn handle_get_quiz(
    State(state): State<AppState>,
    Query(params): Query<QuizQuery>,
) -> Result<Json<QuizResponse>, AppError> {
    let qualification = parse_qualification(params.qualification.as_deref())?;

    let outcome = state
        .orchestrator
        .generate_quiz(qualification)
        .await;
    let quiz = payload_or_unavailable(outcome, "generate quiz")?;

    Ok(Json(QuizResponse { quiz }))
}

/// POST /api/quiz/submit
///
/// Turns quiz answers into up to five suggested career titles.
pub async fn handle_submit_quiz(
    State(state): State<AppState>,
    body: Result<Json<SubmitQuizRequest>, JsonRejection>,
) -> Result<Json<CareerTitlesResponse>, AppError> {
    let Json(request) = body?;
    let qualification = parse_qualification(request.qualification.as_deref())?;
    let answers = match request.answers {
        Some(answers) if !answers.is_empty() => answers,
        _ => {
            return Err(AppError::Validation(
                "\"answers\" is required and must be a non-empty array".to_string(),
            ))
        }
    };

    let outcome = state
        .orchestrator
        .get_career_titles(qualification, answers)
        .await;
    let career_titles = payload_or_unavailable(outcome, "get career suggestions")?;

    Ok(Json(CareerTitlesResponse { career_titles }))
}

/// POST /api/career/details
///
/// Returns the roadmap (degrees, course mapping, mermaid flowchart) for one career.
pub async fn handle_career_details(
    State(state): State<AppState>,
    body: Result<Json<CareerDetailsRequest>, JsonRejection>,
) -> Result<Json<CareerDetailsResponse>, AppError> {
    let Json(request) = body?;
    let qualification = parse_qualification(request.qualification.as_deref())?;
    let career_title = request
        .career_title
        .map(|t| t.trim().to_string())
        .filter(|t| !t.is_empty())
        .ok_or_else(|| AppError::Validation("\"career_title\" is required".to_string()))?;

    let outcome = state
        .orchestrator
        .get_career_details(career_title, qualification)
        .await;
    let career_details = payload_or_unavailable(outcome, "get career details")?;

    Ok(Json(CareerDetailsResponse { career_details }))
}
