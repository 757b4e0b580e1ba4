use std::sync::Arc;

use crate::config::Config;
use crate::matching::service::MatchingSettings;
use crate::store::MatchStore;

/// Shared application state injected into all route handlers via Axum extractors.
#[derive(Clone)]
pub struct AppState {
    /// Data access for profiles, jobs and stored scores. Postgres in production.
    pub store: Arc<dyn MatchStore>,
    pub settings: MatchingSettings,
    pub default_limit: usize,
    pub default_min_score: f64,
}

impl AppState {
    pub fn new(store: Arc<dyn MatchStore>, config: &Config) -> Self {
        Self {
            store,
            settings: MatchingSettings {
                score_ttl: config.match_score_ttl,
                job_pool_size: config.match_job_pool_size,
            },
            default_limit: config.default_recommendation_limit,
            default_min_score: config.default_min_match_score,
        }
    }
}
