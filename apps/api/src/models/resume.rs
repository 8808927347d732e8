use serde::{Deserialize, Serialize};

/// Structured fields extracted from a resume PDF.
///
/// All four fields are always present: anything the source text does not
/// contain is the empty string, and values are flat strings no matter how
/// the model nested them in its response.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct ExtractedResume {
    pub summary: String,
    pub skills: String,
    pub experience: String,
    pub education: String,
}

/// Feedback substituted when the scoring stage cannot produce a valid
/// evaluation. Shown to employers as-is.
pub const FEEDBACK_UNAVAILABLE: &str =
    "An error occurred during resume analysis. Please try again later.";

/// LLM fit evaluation of a candidate against a vacancy.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct FitEvaluation {
    /// 0–100 suitability score. `0` doubles as the service-error default.
    pub ai_generated_score: u32,
    pub ai_generated_feedback: String,
}

impl FitEvaluation {
    /// The fail-open default returned when scoring fails internally.
    pub fn unavailable() -> Self {
        Self {
            ai_generated_score: 0,
            ai_generated_feedback: FEEDBACK_UNAVAILABLE.to_string(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_fit_evaluation_serializes_camel_case_keys() {
        let evaluation = FitEvaluation {
            ai_generated_score: 85,
            ai_generated_feedback: "Strong backend match.".to_string(),
        };

        let json = serde_json::to_value(&evaluation).unwrap();
        assert_eq!(json["aiGeneratedScore"], 85);
        assert_eq!(json["aiGeneratedFeedback"], "Strong backend match.");
    }

    #[test]
    fn test_unavailable_default_shape() {
        let evaluation = FitEvaluation::unavailable();
        assert_eq!(evaluation.ai_generated_score, 0);
        assert_eq!(evaluation.ai_generated_feedback, FEEDBACK_UNAVAILABLE);
    }
}
