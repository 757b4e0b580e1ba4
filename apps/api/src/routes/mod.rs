pub mod health;

use axum::{
    routing::{get, patch, post},
    Router,
};

use crate::matching::handlers;
use crate::state::AppState;

pub fn build_router(state: AppState) -> Router {
    Router::new()
        .route("/health", get(health::health_handler))
        // Matching API
        .route("/api/v1/match", post(handlers::handle_match))
        .route("/api/v1/match/:job_id", get(handlers::handle_match_stored))
        .route(
            "/api/v1/recommendations",
            get(handlers::handle_recommendations),
        )
        .route(
            "/api/v1/recommendations/saved",
            get(handlers::handle_saved_recommendations),
        )
        .route(
            "/api/v1/recommendations/:job_id/viewed",
            patch(handlers::handle_mark_viewed),
        )
        .with_state(state)
}
