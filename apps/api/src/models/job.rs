use serde::{Deserialize, Serialize};

/// Structured tags attached to a posting. Only `skills` takes part in matching.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct JobTags {
    pub skills: Vec<String>,
}

/// The matchable attributes of one open position.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Job {
    pub id: String,
    #[serde(default)]
    pub title: String,
    #[serde(default)]
    pub company: String,
    #[serde(default)]
    pub location: String,
    #[serde(default)]
    pub description: String,
    #[serde(default)]
    pub tags: Option<JobTags>,
    #[serde(default)]
    pub minimum_experience: Option<i32>,
    /// Accepted and stored, but only its presence affects experience scoring.
    #[serde(default)]
    pub experience_level: Option<String>,
    #[serde(default)]
    pub salary_min: Option<f64>,
    #[serde(default)]
    pub salary_max: Option<f64>,
}
