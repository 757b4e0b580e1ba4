//! Postgres-backed `MatchStore`.

use std::collections::HashSet;

use async_trait::async_trait;
use chrono::{DateTime, Utc};
use sqlx::types::Json;
use sqlx::{FromRow, PgPool};
use tracing::{debug, info};
use uuid::Uuid;

use crate::models::candidate::{CandidatePreferences, CandidateProfile};
use crate::models::job::{Job, JobTags};
use crate::models::match_score::{JobMatchScore, MatchDetails, PersistedRecommendation};
use crate::store::{MatchStore, StoreError};

const JOB_COLUMNS: &str = r#"
    j.id,
    COALESCE(j.title, '') AS title,
    COALESCE(j.company, '') AS company,
    COALESCE(j.location, '') AS location,
    COALESCE(j.description, '') AS description,
    j.tags,
    j.minimum_experience,
    j.experience_level,
    j.salary_min::float8 AS salary_min,
    j.salary_max::float8 AS salary_max
"#;

#[derive(Debug, FromRow)]
struct CandidateProfileRow {
    location: Option<String>,
    years_experience: Option<i32>,
    expected_salary_min: Option<f64>,
    expected_salary_max: Option<f64>,
    preferences: Option<Json<CandidatePreferences>>,
}

#[derive(Debug, FromRow)]
struct JobRow {
    id: String,
    title: String,
    company: String,
    location: String,
    description: String,
    tags: Option<Json<JobTags>>,
    minimum_experience: Option<i32>,
    experience_level: Option<String>,
    salary_min: Option<f64>,
    salary_max: Option<f64>,
}

impl From<JobRow> for Job {
    fn from(row: JobRow) -> Self {
        Job {
            id: row.id,
            title: row.title,
            company: row.company,
            location: row.location,
            description: row.description,
            tags: row.tags.map(|Json(tags)| tags),
            minimum_experience: row.minimum_experience,
            experience_level: row.experience_level,
            salary_min: row.salary_min,
            salary_max: row.salary_max,
        }
    }
}

#[derive(Debug, FromRow)]
struct PersistedRow {
    user_id: Uuid,
    match_score: f64,
    skills_match_score: f64,
    experience_match_score: f64,
    location_match_score: f64,
    salary_match_score: f64,
    match_details: Json<MatchDetails>,
    viewed: bool,
    calculated_at: DateTime<Utc>,
    #[sqlx(flatten)]
    job: JobRow,
}

impl From<PersistedRow> for PersistedRecommendation {
    fn from(row: PersistedRow) -> Self {
        let job: Job = row.job.into();
        PersistedRecommendation {
            user_id: row.user_id,
            score: JobMatchScore {
                job_id: job.id.clone(),
                match_score: row.match_score,
                skills_match_score: row.skills_match_score,
                experience_match_score: row.experience_match_score,
                location_match_score: row.location_match_score,
                salary_match_score: row.salary_match_score,
                match_details: row.match_details.0,
            },
            job,
            calculated_at: row.calculated_at,
            viewed: row.viewed,
        }
    }
}

/// `MatchStore` over the hosted Postgres schema.
#[derive(Clone)]
pub struct PgMatchStore {
    pool: PgPool,
}

impl PgMatchStore {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }
}

#[async_trait]
impl MatchStore for PgMatchStore {
    async fn load_candidate_profile(
        &self,
        user_id: Uuid,
    ) -> Result<Option<CandidateProfile>, StoreError> {
        let row = sqlx::query_as::<_, CandidateProfileRow>(
            r#"
            SELECT location, years_experience,
                   expected_salary_min::float8 AS expected_salary_min,
                   expected_salary_max::float8 AS expected_salary_max,
                   preferences
            FROM candidate_profiles
            WHERE user_id = $1
            "#,
        )
        .bind(user_id)
        .fetch_optional(&self.pool)
        .await?;

        let Some(row) = row else {
            debug!("No candidate profile for user {user_id}");
            return Ok(None);
        };

        let skills: Vec<String> = sqlx::query_scalar(
            "SELECT skill_name FROM candidate_skills WHERE user_id = $1 ORDER BY position, skill_name",
        )
        .bind(user_id)
        .fetch_all(&self.pool)
        .await?;

        Ok(Some(CandidateProfile {
            location: row.location,
            years_experience: row.years_experience,
            expected_salary_min: row.expected_salary_min,
            expected_salary_max: row.expected_salary_max,
            skills,
            preferences: row.preferences.map(|Json(p)| p),
        }))
    }

    async fn load_applied_job_ids(&self, user_id: Uuid) -> Result<HashSet<String>, StoreError> {
        let ids: Vec<String> =
            sqlx::query_scalar("SELECT job_id FROM job_applications WHERE user_id = $1")
                .bind(user_id)
                .fetch_all(&self.pool)
                .await?;
        Ok(ids.into_iter().collect())
    }

    async fn load_active_jobs(
        &self,
        excluding: &HashSet<String>,
        max_count: usize,
    ) -> Result<Vec<Job>, StoreError> {
        let excluded: Vec<String> = excluding.iter().cloned().collect();
        let limit = i64::try_from(max_count)
            .map_err(|_| StoreError::Unavailable(format!("job pool size {max_count} too large")))?;

        let rows = sqlx::query_as::<_, JobRow>(&format!(
            r#"
            SELECT {JOB_COLUMNS}
            FROM jobs j
            WHERE j.status = 'active' AND NOT (j.id = ANY($1))
            ORDER BY j.created_at DESC
            LIMIT $2
            "#
        ))
        .bind(&excluded)
        .bind(limit)
        .fetch_all(&self.pool)
        .await?;

        debug!(
            "Loaded {} active jobs ({} excluded)",
            rows.len(),
            excluded.len()
        );
        Ok(rows.into_iter().map(Job::from).collect())
    }

    async fn load_job(&self, job_id: &str) -> Result<Option<Job>, StoreError> {
        let row = sqlx::query_as::<_, JobRow>(&format!(
            "SELECT {JOB_COLUMNS} FROM jobs j WHERE j.id = $1"
        ))
        .bind(job_id)
        .fetch_optional(&self.pool)
        .await?;
        Ok(row.map(Job::from))
    }

    async fn persist_recommendations(
        &self,
        user_id: Uuid,
        scores: &[JobMatchScore],
    ) -> Result<(), StoreError> {
        if scores.is_empty() {
            return Ok(());
        }

        let mut tx = self.pool.begin().await?;
        for score in scores {
            sqlx::query(
                r#"
                INSERT INTO job_match_scores
                    (user_id, job_id, match_score, skills_match_score, experience_match_score,
                     location_match_score, salary_match_score, match_details, viewed, calculated_at)
                VALUES ($1, $2, $3, $4, $5, $6, $7, $8, FALSE, NOW())
                ON CONFLICT (user_id, job_id) DO UPDATE SET
                    match_score = EXCLUDED.match_score,
                    skills_match_score = EXCLUDED.skills_match_score,
                    experience_match_score = EXCLUDED.experience_match_score,
                    location_match_score = EXCLUDED.location_match_score,
                    salary_match_score = EXCLUDED.salary_match_score,
                    match_details = EXCLUDED.match_details,
                    viewed = FALSE,
                    calculated_at = EXCLUDED.calculated_at
                "#,
            )
            .bind(user_id)
            .bind(&score.job_id)
            .bind(score.match_score)
            .bind(score.skills_match_score)
            .bind(score.experience_match_score)
            .bind(score.location_match_score)
            .bind(score.salary_match_score)
            .bind(Json(&score.match_details))
            .execute(&mut *tx)
            .await?;
        }
        tx.commit().await?;

        info!(
            "Persisted {} match scores for user {user_id}",
            scores.len()
        );
        Ok(())
    }

    async fn load_persisted_recommendations(
        &self,
        user_id: Uuid,
        include_viewed: bool,
    ) -> Result<Vec<PersistedRecommendation>, StoreError> {
        let rows = sqlx::query_as::<_, PersistedRow>(&format!(
            r#"
            SELECT s.user_id, s.match_score, s.skills_match_score, s.experience_match_score,
                   s.location_match_score, s.salary_match_score, s.match_details,
                   s.viewed, s.calculated_at,
                   {JOB_COLUMNS}
            FROM job_match_scores s
            JOIN jobs j ON j.id = s.job_id
            WHERE s.user_id = $1 AND j.status = 'active' AND ($2 OR NOT s.viewed)
            ORDER BY s.match_score DESC, s.calculated_at DESC
            "#
        ))
        .bind(user_id)
        .bind(include_viewed)
        .fetch_all(&self.pool)
        .await?;

        Ok(rows.into_iter().map(PersistedRecommendation::from).collect())
    }

    async fn mark_viewed(&self, user_id: Uuid, job_id: &str) -> Result<bool, StoreError> {
        let result =
            sqlx::query("UPDATE job_match_scores SET viewed = TRUE WHERE user_id = $1 AND job_id = $2")
                .bind(user_id)
                .bind(job_id)
                .execute(&self.pool)
                .await?;
        Ok(result.rows_affected() > 0)
    }
}
