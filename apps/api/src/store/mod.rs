//! Data-access seam for the matching service.
//!
//! `AppState` carries an `Arc<dyn MatchStore>`; production wires `PgMatchStore`,
//! tests wire `InMemoryMatchStore`.

use std::collections::HashSet;

use async_trait::async_trait;
use thiserror::Error;
use uuid::Uuid;

use crate::models::candidate::CandidateProfile;
use crate::models::job::Job;
use crate::models::match_score::{JobMatchScore, PersistedRecommendation};

#[cfg(test)]
pub mod memory;
pub mod pg;

#[derive(Debug, Error)]
pub enum StoreError {
    #[error("database error: {0}")]
    Database(#[from] sqlx::Error),

    #[error("store unavailable: {0}")]
    Unavailable(String),
}

#[async_trait]
pub trait MatchStore: Send + Sync {
    /// Profile with skills and preferences, or `None` when the user has no profile.
    async fn load_candidate_profile(
        &self,
        user_id: Uuid,
    ) -> Result<Option<CandidateProfile>, StoreError>;

    /// Ids of jobs the user has already applied to.
    async fn load_applied_job_ids(&self, user_id: Uuid) -> Result<HashSet<String>, StoreError>;

    /// Open postings, newest first, without the excluded ids.
    async fn load_active_jobs(
        &self,
        excluding: &HashSet<String>,
        max_count: usize,
    ) -> Result<Vec<Job>, StoreError>;

    async fn load_job(&self, job_id: &str) -> Result<Option<Job>, StoreError>;

    /// Upserts by (user, job), overwriting earlier scores and resetting `viewed`.
    async fn persist_recommendations(
        &self,
        user_id: Uuid,
        scores: &[JobMatchScore],
    ) -> Result<(), StoreError>;

    /// Stored scores joined with their jobs, best first.
    async fn load_persisted_recommendations(
        &self,
        user_id: Uuid,
        include_viewed: bool,
    ) -> Result<Vec<PersistedRecommendation>, StoreError>;

    /// Returns `false` when no stored score exists for the pair.
    async fn mark_viewed(&self, user_id: Uuid, job_id: &str) -> Result<bool, StoreError>;
}
