//! Axum route handlers for the resume analysis API.

use axum::{extract::State, Json};
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::analysis::normalizer::extract_resume_fields;
use crate::analysis::scorer::evaluate_fit;
use crate::errors::AppError;
use crate::models::job::JobVacancy;
use crate::models::resume::{ExtractedResume, FitEvaluation};
use crate::state::AppState;

// ────────────────────────────────────────────────────────────────────────────
// Request / Response types
// ────────────────────────────────────────────────────────────────────────────

#[derive(Debug, Deserialize)]
pub struct AnalyzeResumeRequest {
    pub resume_url: String,
}

#[derive(Debug, Serialize)]
pub struct AnalyzeResumeResponse {
    pub resume: ExtractedResume,
}

#[derive(Debug, Deserialize)]
pub struct ScoreApplicationRequest {
    pub job: JobVacancy,
    pub resume: ExtractedResume,
}

#[derive(Debug, Serialize)]
pub struct ScoreApplicationResponse {
    pub evaluation: FitEvaluation,
}

#[derive(Debug, Deserialize)]
pub struct EvaluateApplicationRequest {
    pub resume_url: String,
    pub job: JobVacancy,
}

#[derive(Debug, Serialize)]
pub struct EvaluateApplicationResponse {
    pub id: Uuid,
    pub resume: ExtractedResume,
    pub evaluation: FitEvaluation,
    pub analyzed_at: DateTime<Utc>,
}

// ────────────────────────────────────────────────────────────────────────────
// Handlers
// ────────────────────────────────────────────────────────────────────────────

/// POST /api/v1/resumes/analyze
///
/// Extracts raw text from the stored resume PDF and normalizes it into the
/// four-field record. Extraction failures surface to the caller — the
/// pipeline never proceeds to normalization without text.
pub async fn handle_analyze_resume(
    State(state): State<AppState>,
    Json(request): Json<AnalyzeResumeRequest>,
) -> Result<Json<AnalyzeResumeResponse>, AppError> {
    if request.resume_url.trim().is_empty() {
        return Err(AppError::Validation(
            "resume_url cannot be empty".to_string(),
        ));
    }

    let raw_text = state.extractor.extract_text(&request.resume_url).await?;
    let resume = extract_resume_fields(&raw_text, state.llm.as_ref()).await;

    Ok(Json(AnalyzeResumeResponse { resume }))
}

/// POST /api/v1/applications/score
///
/// Scores an already-extracted resume against a vacancy snapshot. Always
/// returns a valid evaluation; service failures come back as the score-0
/// default with the fixed apology feedback.
pub async fn handle_score_application(
    State(state): State<AppState>,
    Json(request): Json<ScoreApplicationRequest>,
) -> Result<Json<ScoreApplicationResponse>, AppError> {
    let evaluation = evaluate_fit(&request.job, &request.resume, state.llm.as_ref()).await;

    Ok(Json(ScoreApplicationResponse { evaluation }))
}

/// POST /api/v1/applications/evaluate
///
/// Full submission pipeline: extract → normalize → score.
pub async fn handle_evaluate_application(
    State(state): State<AppState>,
    Json(request): Json<EvaluateApplicationRequest>,
) -> Result<Json<EvaluateApplicationResponse>, AppError> {
    if request.resume_url.trim().is_empty() {
        return Err(AppError::Validation(
            "resume_url cannot be empty".to_string(),
        ));
    }

    let raw_text = state.extractor.extract_text(&request.resume_url).await?;
    let resume = extract_resume_fields(&raw_text, state.llm.as_ref()).await;
    let evaluation = evaluate_fit(&request.job, &resume, state.llm.as_ref()).await;

    Ok(Json(EvaluateApplicationResponse {
        id: Uuid::new_v4(),
        resume,
        evaluation,
        analyzed_at: Utc::now(),
    }))
}
