pub mod health;

use axum::{
    routing::{get, post},
    Router,
};

use crate::generation::handlers;
use crate::state::AppState;

pub fn build_router(state: AppState) -> Router {
    Router::new()
        .route("/health", get(health::health_handler))
        .route(
            "/api/v1/quests/recommendations",
            post(handlers::handle_recommend_quests),
        )
        .route(
            "/api/v1/reflections/analysis",
            post(handlers::handle_analyze_reflection),
        )
        .with_state(state)
}
