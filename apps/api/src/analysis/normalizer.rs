//! Resume Field Normalizer — one LLM call turning raw resume text into the
//! four-field structured record.

use anyhow::{bail, Context, Result};
use serde_json::Value;
use tracing::{debug, error};

use crate::analysis::flatten::flatten_value;
use crate::analysis::prompts::{RESUME_PARSE_PROMPT, RESUME_PARSE_SYSTEM};
use crate::llm_client::{strip_json_fences, ChatCompleter};
use crate::models::resume::ExtractedResume;

const REQUIRED_KEYS: [&str; 4] = ["summary", "skills", "experience", "education"];

/// Extracts structured fields from raw resume text.
///
/// Fail-open: any internal failure (HTTP, parse, validation) is logged and
/// the all-empty record is returned, so one bad resume never aborts an
/// application submission.
pub async fn extract_resume_fields(raw_text: &str, llm: &dyn ChatCompleter) -> ExtractedResume {
    match try_extract(raw_text, llm).await {
        Ok(resume) => resume,
        Err(err) => {
            error!("resume field extraction failed: {err:#}");
            ExtractedResume::default()
        }
    }
}

async fn try_extract(raw_text: &str, llm: &dyn ChatCompleter) -> Result<ExtractedResume> {
    let prompt = RESUME_PARSE_PROMPT.replace("{raw_text}", raw_text);
    let content = llm
        .complete_json(RESUME_PARSE_SYSTEM, &prompt)
        .await
        .context("LLM resume parse call failed")?;

    debug!("LLM resume parse response: {content}");

    let parsed: Value = serde_json::from_str(strip_json_fences(&content))
        .context("LLM response is not valid JSON")?;
    let fields = parsed
        .as_object()
        .context("LLM response is not a JSON object")?;

    let missing: Vec<&str> = REQUIRED_KEYS
        .iter()
        .copied()
        .filter(|key| !fields.contains_key(*key))
        .collect();
    if !missing.is_empty() {
        bail!("LLM response is missing required keys: {}", missing.join(", "));
    }

    let field = |key: &str| fields.get(key).map(flatten_value).unwrap_or_default();

    Ok(ExtractedResume {
        summary: field("summary"),
        skills: field("skills"),
        experience: field("experience"),
        education: field("education"),
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::llm_client::LlmError;
    use async_trait::async_trait;

    struct FakeChat(Option<&'static str>);

    #[async_trait]
    impl ChatCompleter for FakeChat {
        async fn complete_json(&self, _system: &str, _user: &str) -> Result<String, LlmError> {
            match self.0 {
                Some(response) => Ok(response.to_string()),
                None => Err(LlmError::EmptyContent),
            }
        }
    }

    #[tokio::test]
    async fn test_well_formed_response_normalizes_nested_skills() {
        let llm = FakeChat(Some(
            r#"{"summary": "Backend engineer.",
                "skills": ["Go", "SQL"],
                "experience": [["Acme Corp, 3 years"], ["Initech, 2 years"]],
                "education": "BSc CS"}"#,
        ));

        let resume = extract_resume_fields("raw text", &llm).await;
        assert_eq!(resume.summary, "Backend engineer.");
        assert_eq!(resume.skills, "Go, SQL");
        assert_eq!(resume.experience, "Acme Corp, 3 years, Initech, 2 years");
        assert_eq!(resume.education, "BSc CS");
    }

    #[tokio::test]
    async fn test_missing_key_yields_all_empty_record() {
        let llm = FakeChat(Some(
            r#"{"summary": "x", "skills": "y", "experience": "z"}"#,
        ));

        let resume = extract_resume_fields("raw text", &llm).await;
        assert_eq!(resume, ExtractedResume::default());
    }

    #[tokio::test]
    async fn test_invalid_json_yields_all_empty_record() {
        let llm = FakeChat(Some("I could not parse that resume, sorry."));

        let resume = extract_resume_fields("raw text", &llm).await;
        assert_eq!(resume, ExtractedResume::default());
    }

    #[tokio::test]
    async fn test_llm_failure_yields_all_empty_record() {
        let llm = FakeChat(None);

        let resume = extract_resume_fields("raw text", &llm).await;
        assert_eq!(resume, ExtractedResume::default());
    }

    #[tokio::test]
    async fn test_fenced_response_is_accepted() {
        let llm = FakeChat(Some(
            "```json\n{\"summary\": \"s\", \"skills\": \"k\", \"experience\": \"e\", \"education\": \"d\"}\n```",
        ));

        let resume = extract_resume_fields("raw text", &llm).await;
        assert_eq!(resume.summary, "s");
        assert_eq!(resume.education, "d");
    }

    #[tokio::test]
    async fn test_null_fields_become_empty_strings() {
        let llm = FakeChat(Some(
            r#"{"summary": null, "skills": [], "experience": null, "education": null}"#,
        ));

        let resume = extract_resume_fields("raw text", &llm).await;
        assert_eq!(resume, ExtractedResume::default());
    }
}
