//! Recommendation service — drives the pure selector over a `MatchStore`.
//!
//! Flow: profile → applied ids → cached scores (if fresh) → active jobs → score → persist → cut.

use std::collections::HashSet;

use chrono::{Duration, Utc};
use tracing::{debug, info};
use uuid::Uuid;

use crate::errors::AppError;
use crate::matching::aggregator::calculate_job_match;
use crate::matching::selector::{rank_scores, select_recommendations, SelectionCriteria};
use crate::models::match_score::{JobMatchScore, PersistedRecommendation};
use crate::store::MatchStore;

/// Service-wide knobs, built from `Config` at startup.
#[derive(Debug, Clone)]
pub struct MatchingSettings {
    /// How long a persisted score may be served before it is recomputed.
    pub score_ttl: Duration,
    /// Upper bound on active jobs scored per request.
    pub job_pool_size: usize,
}

impl Default for MatchingSettings {
    fn default() -> Self {
        Self {
            score_ttl: Duration::hours(24),
            job_pool_size: 100,
        }
    }
}

#[derive(Debug, Clone)]
pub struct RecommendationRequest {
    pub limit: usize,
    pub min_score: f64,
    /// Ignore cached scores and recompute.
    pub refresh: bool,
}

/// Ranked recommendations for `user_id`.
///
/// A user without a profile gets an empty list, not an error.
pub async fn get_job_recommendations(
    store: &dyn MatchStore,
    user_id: Uuid,
    request: &RecommendationRequest,
    settings: &MatchingSettings,
) -> Result<Vec<JobMatchScore>, AppError> {
    let Some(candidate) = store.load_candidate_profile(user_id).await? else {
        debug!("No profile for user {user_id}; returning no recommendations");
        return Ok(Vec::new());
    };

    let applied = store.load_applied_job_ids(user_id).await?;

    if !request.refresh {
        if let Some(cached) = fresh_cached_scores(store, user_id, &applied, settings).await? {
            let recommendations = serve(cached, request);
            debug!(
                "Serving {} cached recommendations for user {user_id}",
                recommendations.len()
            );
            return Ok(recommendations);
        }
    }

    let jobs = store
        .load_active_jobs(&applied, settings.job_pool_size)
        .await?;

    // The whole pool is stored so later requests can cut it differently.
    let criteria = SelectionCriteria {
        limit: jobs.len(),
        min_score: 0.0,
        excluded_job_ids: applied,
    };
    let pool = select_recommendations(&candidate, &jobs, &criteria);

    store.persist_recommendations(user_id, &pool).await?;

    let recommendations = serve(pool, request);
    info!(
        "Scored {} jobs for user {user_id}, returning {} recommendations",
        jobs.len(),
        recommendations.len()
    );
    Ok(recommendations)
}

/// Applies the request's minimum score and limit to a scored pool.
fn serve(pool: Vec<JobMatchScore>, request: &RecommendationRequest) -> Vec<JobMatchScore> {
    let mut scores: Vec<JobMatchScore> = pool
        .into_iter()
        .filter(|s| s.match_score >= request.min_score)
        .collect();
    rank_scores(&mut scores, request.limit);
    scores
}

/// Unexpired cached scores minus jobs applied to since they were stored,
/// or `None` when nothing unexpired is cached.
async fn fresh_cached_scores(
    store: &dyn MatchStore,
    user_id: Uuid,
    applied: &HashSet<String>,
    settings: &MatchingSettings,
) -> Result<Option<Vec<JobMatchScore>>, AppError> {
    let now = Utc::now();
    let fresh: Vec<JobMatchScore> = store
        .load_persisted_recommendations(user_id, true)
        .await?
        .into_iter()
        .filter(|p| p.is_fresh(settings.score_ttl, now))
        .map(|p| p.score)
        .collect();

    if fresh.is_empty() {
        debug!("No unexpired cached scores for user {user_id}");
        return Ok(None);
    }

    Ok(Some(
        fresh
            .into_iter()
            .filter(|s| !applied.contains(&s.job_id))
            .collect(),
    ))
}

/// Scores one stored job for one stored candidate.
pub async fn score_job_for_candidate(
    store: &dyn MatchStore,
    user_id: Uuid,
    job_id: &str,
) -> Result<JobMatchScore, AppError> {
    let candidate = store
        .load_candidate_profile(user_id)
        .await?
        .ok_or_else(|| AppError::NotFound(format!("Candidate profile for user {user_id} not found")))?;
    let job = store
        .load_job(job_id)
        .await?
        .ok_or_else(|| AppError::NotFound(format!("Job {job_id} not found")))?;

    Ok(calculate_job_match(&candidate, &job))
}

pub async fn list_saved_recommendations(
    store: &dyn MatchStore,
    user_id: Uuid,
    include_viewed: bool,
) -> Result<Vec<PersistedRecommendation>, AppError> {
    Ok(store
        .load_persisted_recommendations(user_id, include_viewed)
        .await?)
}

pub async fn mark_recommendation_viewed(
    store: &dyn MatchStore,
    user_id: Uuid,
    job_id: &str,
) -> Result<(), AppError> {
    if store.mark_viewed(user_id, job_id).await? {
        Ok(())
    } else {
        Err(AppError::NotFound(format!(
            "No recommendation for job {job_id}"
        )))
    }
}
