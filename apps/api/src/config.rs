use anyhow::{bail, Context, Result};
use chrono::TimeDelta;

/// Application configuration loaded from environment variables.
/// Fails at startup if required variables are missing or malformed.
#[derive(Debug, Clone)]
pub struct Config {
    pub database_url: String,
    pub db_max_connections: u32,
    pub port: u16,
    pub rust_log: String,
    /// How long a persisted match score stays servable from cache.
    pub match_score_ttl: TimeDelta,
    /// Active jobs scored per recommendation request.
    pub match_job_pool_size: usize,
    pub default_recommendation_limit: usize,
    pub default_min_match_score: f64,
}

impl Config {
    pub fn from_env() -> Result<Self> {
        dotenvy::dotenv().ok(); // load .env if present; ignore if missing

        Ok(Config {
            database_url: require_env("DATABASE_URL")?,
            db_max_connections: parse_env("DB_MAX_CONNECTIONS", 10)?,
            port: parse_env("PORT", 8080)?,
            rust_log: std::env::var("RUST_LOG").unwrap_or_else(|_| "info".to_string()),
            match_score_ttl: parse_ttl_hours("MATCH_SCORE_TTL_HOURS", 24)?,
            match_job_pool_size: parse_env("MATCH_JOB_POOL_SIZE", 100)?,
            default_recommendation_limit: parse_env("DEFAULT_RECOMMENDATION_LIMIT", 10)?,
            default_min_match_score: parse_env("DEFAULT_MIN_MATCH_SCORE", 50.0)?,
        })
    }
}

fn require_env(key: &str) -> Result<String> {
    std::env::var(key).with_context(|| format!("Required environment variable '{key}' is not set"))
}

fn parse_env<T>(key: &str, default: T) -> Result<T>
where
    T: std::str::FromStr,
    T::Err: std::error::Error + Send + Sync + 'static,
{
    match std::env::var(key) {
        Ok(raw) => raw
            .trim()
            .parse::<T>()
            .with_context(|| format!("{key} must be a valid value, got '{raw}'")),
        Err(_) => Ok(default),
    }
}

/// Whole hours, zero or more. Zero disables the score cache.
fn parse_ttl_hours(key: &str, default_hours: i64) -> Result<TimeDelta> {
    let hours: i64 = parse_env(key, default_hours)?;
    if hours < 0 {
        bail!("{key} must not be negative, got {hours}");
    }
    TimeDelta::try_hours(hours).with_context(|| format!("{key} is out of range, got {hours}"))
}
