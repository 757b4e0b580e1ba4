//! Axum route handlers for the Matching API.

use axum::{
    extract::{Path, Query, State},
    http::StatusCode,
    Json,
};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::errors::AppError;
use crate::matching::aggregator::calculate_job_match;
use crate::matching::service::{
    get_job_recommendations, list_saved_recommendations, mark_recommendation_viewed,
    score_job_for_candidate, RecommendationRequest,
};
use crate::models::candidate::CandidateProfile;
use crate::models::job::Job;
use crate::models::match_score::{JobMatchScore, PersistedRecommendation};
use crate::state::AppState;

const MAX_RECOMMENDATION_LIMIT: usize = 100;

// ────────────────────────────────────────────────────────────────────────────
// Request / Response types
// ────────────────────────────────────────────────────────────────────────────

#[derive(Debug, Deserialize)]
pub struct MatchRequest {
    pub candidate: CandidateProfile,
    pub job: Job,
}

#[derive(Debug, Deserialize)]
pub struct UserIdQuery {
    pub user_id: Uuid,
}

#[derive(Debug, Deserialize)]
pub struct RecommendationsQuery {
    pub user_id: Uuid,
    pub limit: Option<usize>,
    pub min_score: Option<f64>,
    #[serde(default)]
    pub refresh: bool,
}

#[derive(Debug, Deserialize)]
pub struct SavedRecommendationsQuery {
    pub user_id: Uuid,
    #[serde(default)]
    pub include_viewed: bool,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct MarkViewedRequest {
    pub user_id: Uuid,
}

#[derive(Debug, Serialize)]
pub struct RecommendationsResponse {
    pub recommendations: Vec<JobMatchScore>,
}

#[derive(Debug, Serialize)]
pub struct SavedRecommendationsResponse {
    pub recommendations: Vec<PersistedRecommendation>,
}

// ────────────────────────────────────────────────────────────────────────────
// Handlers
// ────────────────────────────────────────────────────────────────────────────

/// POST /api/v1/match
///
/// Scores a candidate/job pair supplied in the body. Nothing is loaded or stored.
pub async fn handle_match(
    Json(request): Json<MatchRequest>,
) -> Result<Json<JobMatchScore>, AppError> {
    if request.job.id.trim().is_empty() {
        return Err(AppError::Validation("job.id cannot be empty".to_string()));
    }
    Ok(Json(calculate_job_match(&request.candidate, &request.job)))
}

/// GET /api/v1/match/:job_id?user_id=
pub async fn handle_match_stored(
    State(state): State<AppState>,
    Path(job_id): Path<String>,
    Query(params): Query<UserIdQuery>,
) -> Result<Json<JobMatchScore>, AppError> {
    let score = score_job_for_candidate(state.store.as_ref(), params.user_id, &job_id).await?;
    Ok(Json(score))
}

/// GET /api/v1/recommendations?user_id=&limit=&min_score=&refresh=
///
/// Serves fresh cached scores when available, otherwise scores the active job pool.
pub async fn handle_recommendations(
    State(state): State<AppState>,
    Query(params): Query<RecommendationsQuery>,
) -> Result<Json<RecommendationsResponse>, AppError> {
    let request = RecommendationRequest {
        limit: params.limit.unwrap_or(state.default_limit),
        min_score: params.min_score.unwrap_or(state.default_min_score),
        refresh: params.refresh,
    };
    validate_recommendation_request(&request)?;

    let recommendations = get_job_recommendations(
        state.store.as_ref(),
        params.user_id,
        &request,
        &state.settings,
    )
    .await?;

    Ok(Json(RecommendationsResponse { recommendations }))
}

/// GET /api/v1/recommendations/saved?user_id=&include_viewed=
pub async fn handle_saved_recommendations(
    State(state): State<AppState>,
    Query(params): Query<SavedRecommendationsQuery>,
) -> Result<Json<SavedRecommendationsResponse>, AppError> {
    let recommendations =
        list_saved_recommendations(state.store.as_ref(), params.user_id, params.include_viewed)
            .await?;
    Ok(Json(SavedRecommendationsResponse { recommendations }))
}

/// PATCH /api/v1/recommendations/:job_id/viewed
pub async fn handle_mark_viewed(
    State(state): State<AppState>,
    Path(job_id): Path<String>,
    Json(request): Json<MarkViewedRequest>,
) -> Result<StatusCode, AppError> {
    mark_recommendation_viewed(state.store.as_ref(), request.user_id, &job_id).await?;
    Ok(StatusCode::NO_CONTENT)
}

fn validate_recommendation_request(request: &RecommendationRequest) -> Result<(), AppError> {
    if request.limit == 0 || request.limit > MAX_RECOMMENDATION_LIMIT {
        return Err(AppError::Validation(format!(
            "limit must be between 1 and {MAX_RECOMMENDATION_LIMIT}"
        )));
    }
    if !(0.0..=100.0).contains(&request.min_score) {
        return Err(AppError::Validation(
            "min_score must be between 0 and 100".to_string(),
        ));
    }
    Ok(())
}
