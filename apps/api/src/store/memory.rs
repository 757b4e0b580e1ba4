//! In-memory `MatchStore` for exercising the service and routes without Postgres.

use std::collections::{HashMap, HashSet};
use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::RwLock;

use async_trait::async_trait;
use chrono::{DateTime, Utc};
use uuid::Uuid;

use crate::models::candidate::CandidateProfile;
use crate::models::job::Job;
use crate::models::match_score::{JobMatchScore, PersistedRecommendation};
use crate::store::{MatchStore, StoreError};

struct StoredJob {
    job: Job,
    active: bool,
}

struct StoredScore {
    score: JobMatchScore,
    calculated_at: DateTime<Utc>,
    viewed: bool,
}

#[derive(Default)]
pub struct InMemoryMatchStore {
    profiles: RwLock<HashMap<Uuid, CandidateProfile>>,
    /// Insertion order; later entries are newer postings.
    jobs: RwLock<Vec<StoredJob>>,
    applications: RwLock<HashMap<Uuid, HashSet<String>>>,
    scores: RwLock<HashMap<(Uuid, String), StoredScore>>,
    unavailable: RwLock<Option<String>>,
    active_job_loads: AtomicUsize,
}

impl InMemoryMatchStore {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn insert_profile(&self, user_id: Uuid, profile: CandidateProfile) {
        self.profiles.write().unwrap().insert(user_id, profile);
    }

    pub fn insert_job(&self, job: Job) {
        self.jobs.write().unwrap().push(StoredJob { job, active: true });
    }

    pub fn insert_closed_job(&self, job: Job) {
        self.jobs.write().unwrap().push(StoredJob { job, active: false });
    }

    /// Marks a previously inserted job as no longer open.
    pub fn close_job(&self, job_id: &str) {
        for stored in self.jobs.write().unwrap().iter_mut() {
            if stored.job.id == job_id {
                stored.active = false;
            }
        }
    }

    pub fn insert_application(&self, user_id: Uuid, job_id: &str) {
        self.applications
            .write()
            .unwrap()
            .entry(user_id)
            .or_default()
            .insert(job_id.to_string());
    }

    /// Backdates every stored score for `user_id`.
    pub fn set_calculated_at(&self, user_id: Uuid, calculated_at: DateTime<Utc>) {
        for ((owner, _), stored) in self.scores.write().unwrap().iter_mut() {
            if *owner == user_id {
                stored.calculated_at = calculated_at;
            }
        }
    }

    /// Makes every subsequent call fail with `StoreError::Unavailable`.
    pub fn fail_with(&self, reason: &str) {
        *self.unavailable.write().unwrap() = Some(reason.to_string());
    }

    pub fn active_job_loads(&self) -> usize {
        self.active_job_loads.load(Ordering::SeqCst)
    }

    pub fn stored_score(&self, user_id: Uuid, job_id: &str) -> Option<JobMatchScore> {
        self.scores
            .read()
            .unwrap()
            .get(&(user_id, job_id.to_string()))
            .map(|s| s.score.clone())
    }

    fn check_available(&self) -> Result<(), StoreError> {
        match self.unavailable.read().unwrap().as_ref() {
            Some(reason) => Err(StoreError::Unavailable(reason.clone())),
            None => Ok(()),
        }
    }

    fn find_job(&self, job_id: &str, active_only: bool) -> Option<Job> {
        self.jobs
            .read()
            .unwrap()
            .iter()
            .find(|stored| stored.job.id == job_id && (stored.active || !active_only))
            .map(|stored| stored.job.clone())
    }
}

#[async_trait]
impl MatchStore for InMemoryMatchStore {
    async fn load_candidate_profile(
        &self,
        user_id: Uuid,
    ) -> Result<Option<CandidateProfile>, StoreError> {
        self.check_available()?;
        Ok(self.profiles.read().unwrap().get(&user_id).cloned())
    }

    async fn load_applied_job_ids(&self, user_id: Uuid) -> Result<HashSet<String>, StoreError> {
        self.check_available()?;
        Ok(self
            .applications
            .read()
            .unwrap()
            .get(&user_id)
            .cloned()
            .unwrap_or_default())
    }

    async fn load_active_jobs(
        &self,
        excluding: &HashSet<String>,
        max_count: usize,
    ) -> Result<Vec<Job>, StoreError> {
        self.check_available()?;
        self.active_job_loads.fetch_add(1, Ordering::SeqCst);
        Ok(self
            .jobs
            .read()
            .unwrap()
            .iter()
            .rev()
            .filter(|stored| stored.active && !excluding.contains(&stored.job.id))
            .take(max_count)
            .map(|stored| stored.job.clone())
            .collect())
    }

    async fn load_job(&self, job_id: &str) -> Result<Option<Job>, StoreError> {
        self.check_available()?;
        Ok(self.find_job(job_id, false))
    }

    async fn persist_recommendations(
        &self,
        user_id: Uuid,
        scores: &[JobMatchScore],
    ) -> Result<(), StoreError> {
        self.check_available()?;
        let now = Utc::now();
        let mut stored = self.scores.write().unwrap();
        for score in scores {
            stored.insert(
                (user_id, score.job_id.clone()),
                StoredScore {
                    score: score.clone(),
                    calculated_at: now,
                    viewed: false,
                },
            );
        }
        Ok(())
    }

    async fn load_persisted_recommendations(
        &self,
        user_id: Uuid,
        include_viewed: bool,
    ) -> Result<Vec<PersistedRecommendation>, StoreError> {
        self.check_available()?;
        let stored = self.scores.read().unwrap();
        let mut rows: Vec<PersistedRecommendation> = stored
            .iter()
            .filter(|((owner, _), s)| *owner == user_id && (include_viewed || !s.viewed))
            .filter_map(|((_, job_id), s)| {
                self.find_job(job_id, true).map(|job| PersistedRecommendation {
                    user_id,
                    score: s.score.clone(),
                    job,
                    calculated_at: s.calculated_at,
                    viewed: s.viewed,
                })
            })
            .collect();
        rows.sort_by(|a, b| {
            b.score
                .match_score
                .total_cmp(&a.score.match_score)
                .then_with(|| a.score.job_id.cmp(&b.score.job_id))
        });
        Ok(rows)
    }

    async fn mark_viewed(&self, user_id: Uuid, job_id: &str) -> Result<bool, StoreError> {
        self.check_available()?;
        match self
            .scores
            .write()
            .unwrap()
            .get_mut(&(user_id, job_id.to_string()))
        {
            Some(stored) => {
                stored.viewed = true;
                Ok(true)
            }
            None => Ok(false),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::match_score::MatchDetails;

    fn job(id: &str) -> Job {
        Job {
            id: id.to_string(),
            ..Default::default()
        }
    }

    fn score(job_id: &str, match_score: f64) -> JobMatchScore {
        JobMatchScore {
            job_id: job_id.to_string(),
            match_score,
            skills_match_score: 0.0,
            experience_match_score: 0.0,
            location_match_score: 0.0,
            salary_match_score: 0.0,
            match_details: MatchDetails::default(),
        }
    }

    #[tokio::test]
    async fn test_active_jobs_newest_first_and_filtered() {
        let store = InMemoryMatchStore::new();
        store.insert_job(job("old"));
        store.insert_closed_job(job("closed"));
        store.insert_job(job("applied"));
        store.insert_job(job("new"));

        let excluding = HashSet::from(["applied".to_string()]);
        let jobs = store.load_active_jobs(&excluding, 10).await.unwrap();
        let ids: Vec<&str> = jobs.iter().map(|j| j.id.as_str()).collect();
        assert_eq!(ids, vec!["new", "old"]);

        let capped = store.load_active_jobs(&HashSet::new(), 1).await.unwrap();
        assert_eq!(capped.len(), 1);
        assert_eq!(store.active_job_loads(), 2);
    }

    #[tokio::test]
    async fn test_persist_overwrites_and_resets_viewed() {
        let store = InMemoryMatchStore::new();
        let user_id = Uuid::new_v4();
        store.insert_job(job("job-1"));

        store
            .persist_recommendations(user_id, &[score("job-1", 40.0)])
            .await
            .unwrap();
        assert!(store.mark_viewed(user_id, "job-1").await.unwrap());
        assert!(store
            .load_persisted_recommendations(user_id, false)
            .await
            .unwrap()
            .is_empty());

        store
            .persist_recommendations(user_id, &[score("job-1", 70.0)])
            .await
            .unwrap();
        let rows = store
            .load_persisted_recommendations(user_id, false)
            .await
            .unwrap();
        assert_eq!(rows.len(), 1);
        assert_eq!(rows[0].score.match_score, 70.0);
        assert!(!rows[0].viewed);
    }

    #[tokio::test]
    async fn test_persisted_scores_skip_closed_jobs() {
        let store = InMemoryMatchStore::new();
        let user_id = Uuid::new_v4();
        store.insert_job(job("open"));
        store.insert_closed_job(job("closed"));

        store
            .persist_recommendations(user_id, &[score("open", 80.0), score("closed", 90.0)])
            .await
            .unwrap();
        let rows = store
            .load_persisted_recommendations(user_id, true)
            .await
            .unwrap();
        let ids: Vec<&str> = rows.iter().map(|r| r.job.id.as_str()).collect();
        assert_eq!(ids, vec!["open"]);

        store.close_job("open");
        assert!(store
            .load_persisted_recommendations(user_id, true)
            .await
            .unwrap()
            .is_empty());
        // Single-job lookups still see closed postings.
        assert!(store.load_job("closed").await.unwrap().is_some());
    }

    #[tokio::test]
    async fn test_mark_viewed_unknown_pair_returns_false() {
        let store = InMemoryMatchStore::new();
        assert!(!store.mark_viewed(Uuid::new_v4(), "nope").await.unwrap());
    }

    #[tokio::test]
    async fn test_unavailable_store_errors() {
        let store = InMemoryMatchStore::new();
        store.fail_with("maintenance");
        let err = store.load_candidate_profile(Uuid::new_v4()).await.unwrap_err();
        assert!(matches!(err, StoreError::Unavailable(reason) if reason == "maintenance"));
    }
}
