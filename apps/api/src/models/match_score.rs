use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::models::job::Job;

/// Breakdown of which signals contributed to a match.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct MatchDetails {
    pub matched_skills: Vec<String>,
    /// At most five entries, in the job's tag order.
    pub missing_skills: Vec<String>,
    /// Required minus actual years. Negative when the candidate exceeds the requirement.
    pub experience_gap: i32,
    pub location_match: bool,
    pub salary_in_range: bool,
}

/// Result of scoring one candidate against one job. All scores are 0–100, 2 decimals.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct JobMatchScore {
    pub job_id: String,
    pub match_score: f64,
    pub skills_match_score: f64,
    pub experience_match_score: f64,
    pub location_match_score: f64,
    pub salary_match_score: f64,
    pub match_details: MatchDetails,
}

/// A stored score joined with the job it was computed for.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PersistedRecommendation {
    pub user_id: Uuid,
    pub score: JobMatchScore,
    pub job: Job,
    pub calculated_at: DateTime<Utc>,
    pub viewed: bool,
}

impl PersistedRecommendation {
    pub fn is_fresh(&self, ttl: chrono::Duration, now: DateTime<Utc>) -> bool {
        now - self.calculated_at < ttl
    }
}
