//! Recommendation selector — ranks a job set for one candidate.

use std::collections::HashSet;

use crate::matching::aggregator::calculate_job_match;
use crate::models::candidate::CandidateProfile;
use crate::models::job::Job;
use crate::models::match_score::JobMatchScore;

/// Filtering and truncation rules for one selection pass.
#[derive(Debug, Clone, Default)]
pub struct SelectionCriteria {
    pub limit: usize,
    pub min_score: f64,
    /// Jobs the candidate already applied to.
    pub excluded_job_ids: HashSet<String>,
}

/// Scores every non-excluded job, keeps those at or above `min_score`,
/// and returns at most `limit` results, best first.
///
/// The sort is stable: equal scores keep their input order.
pub fn select_recommendations(
    candidate: &CandidateProfile,
    jobs: &[Job],
    criteria: &SelectionCriteria,
) -> Vec<JobMatchScore> {
    let mut scored: Vec<JobMatchScore> = jobs
        .iter()
        .filter(|job| !criteria.excluded_job_ids.contains(&job.id))
        .map(|job| calculate_job_match(candidate, job))
        .filter(|score| score.match_score >= criteria.min_score)
        .collect();

    rank_scores(&mut scored, criteria.limit);
    scored
}

/// Stable descending sort by `match_score`, then truncation.
pub fn rank_scores(scores: &mut Vec<JobMatchScore>, limit: usize) {
    scores.sort_by(|a, b| b.match_score.total_cmp(&a.match_score));
    scores.truncate(limit);
}
