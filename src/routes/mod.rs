/// Application routes configuration
use crate::handlers::{get_filters, get_launch_detail, get_launches, health, refresh, AppState};
use axum::{routing::get, Router};

/// Build the application router with all routes
pub fn build_router(state: AppState) -> Router {
    Router::new()
        // Health check
        .route("/health", get(health))
        // Dashboard endpoints
        .route("/filters", get(get_filters))
        .route("/launches", get(get_launches))
        .route("/launches/:id", get(get_launch_detail))
        // Data loading
        .route("/refresh", get(refresh))
        .with_state(state)
}
