pub mod health;

use axum::{
    routing::{get, post},
    Router,
};

use crate::analysis::handlers;
use crate::state::AppState;

pub fn build_router(state: AppState) -> Router {
    Router::new()
        .route("/health", get(health::health_handler))
        .route(
            "/api/v1/resumes/analyze",
            post(handlers::handle_analyze_resume),
        )
        .route(
            "/api/v1/applications/score",
            post(handlers::handle_score_application),
        )
        .route(
            "/api/v1/applications/evaluate",
            post(handlers::handle_evaluate_application),
        )
        .with_state(state)
}
