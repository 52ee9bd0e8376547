pub mod health;

use axum::{
    routing::{get, post},
    Router,
};

use crate::colleges::handlers as colleges;
use crate::generation::handlers as generation;
use crate::state::AppState;

pub fn build_router(state: AppState) -> Router {
    Router::new()
        .route("/health", get(health::health_handler))
        // AI career guidance flow
        .route("/api/quiz", get(generation::handle_get_quiz))
        .route("/api/quiz/submit", post(generation::handle_submit_quiz))
        .route(
            "/api/career/details",
            post(generation::handle_career_details),
        )
        // College directory
        .route("/api/colleges", get(colleges::handle_list_colleges))
        .route(
            "/api/colleges/:college_id",
            get(colleges::handle_get_college),
        )
        .with_state(state)
}
