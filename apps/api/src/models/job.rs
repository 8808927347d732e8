use serde::{Deserialize, Serialize};

/// Read-only snapshot of a job vacancy, supplied by the caller at scoring
/// time. Vacancy storage is owned by the job-board layer, not this service.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct JobVacancy {
    pub title: String,
    pub description: String,
    pub location: String,
    #[serde(rename = "type")]
    pub job_type: String,
    pub salary: String,
}
