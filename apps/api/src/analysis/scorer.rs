//! Candidate Fit Scorer — one LLM call scoring an extracted resume against a
//! vacancy snapshot.

use anyhow::{bail, Context, Result};
use serde_json::{json, Value};
use tracing::{debug, error};

use crate::analysis::prompts::{FIT_SCORE_PROMPT, FIT_SCORE_SYSTEM};
use crate::llm_client::{strip_json_fences, ChatCompleter};
use crate::models::job::JobVacancy;
use crate::models::resume::{ExtractedResume, FitEvaluation};

/// Scores a candidate against a vacancy.
///
/// Fail-open: any internal failure yields `FitEvaluation::unavailable()`
/// (score 0 plus a fixed apology), logged for operators but never surfaced
/// to the submission flow.
pub async fn evaluate_fit(
    job: &JobVacancy,
    resume: &ExtractedResume,
    llm: &dyn ChatCompleter,
) -> FitEvaluation {
    match try_evaluate(job, resume, llm).await {
        Ok(evaluation) => evaluation,
        Err(err) => {
            error!("fit evaluation failed: {err:#}");
            FitEvaluation::unavailable()
        }
    }
}

async fn try_evaluate(
    job: &JobVacancy,
    resume: &ExtractedResume,
    llm: &dyn ChatCompleter,
) -> Result<FitEvaluation> {
    let job_details = serde_json::to_string(&json!({
        "job_title": job.title,
        "job_description": job.description,
        "job_location": job.location,
        "job_type": job.job_type,
        "job_salary": job.salary,
    }))?;
    let resume_details = serde_json::to_string(resume)?;

    let prompt = FIT_SCORE_PROMPT
        .replace("{job_details}", &job_details)
        .replace("{resume_details}", &resume_details);

    let content = llm
        .complete_json(FIT_SCORE_SYSTEM, &prompt)
        .await
        .context("LLM fit scoring call failed")?;

    debug!("LLM fit evaluation response: {content}");

    let parsed: Value = serde_json::from_str(strip_json_fences(&content))
        .context("LLM evaluation is not valid JSON")?;
    let fields = parsed
        .as_object()
        .context("LLM evaluation is not a JSON object")?;

    for key in ["aiGeneratedScore", "aiGeneratedFeedback"] {
        if !fields.contains_key(key) {
            bail!("LLM evaluation is missing required key: {key}");
        }
    }

    // Returned as-is: score range and feedback length are trusted to the
    // prompt contract.
    serde_json::from_value(parsed).context("LLM evaluation has malformed fields")
}
