// HTTP API module.
// Routes for health checks, repository listing, and language statistics.

use axum::{Router, routing::get};
use tower_http::trace::TraceLayer;

use crate::service::RepoStatsService;

pub mod handlers;

pub use handlers::ApiError;

/// Application state shared across HTTP handlers.
#[derive(Clone)]
pub struct AppState {
    pub service: RepoStatsService,
}

impl AppState {
    pub fn new(service: RepoStatsService) -> Self {
        Self { service }
    }
}

/// Build the application router.
///
/// `/repos` and `/stats` read an optional JSON filter from the request body,
/// so both accept GET and POST.
pub fn build_router(state: AppState) -> Router {
    Router::new()
        .route("/ping", get(handlers::ping))
        .route(
            "/repos",
            get(handlers::list_repositories).post(handlers::list_repositories),
        )
        .route(
            "/stats",
            get(handlers::compute_stats).post(handlers::compute_stats),
        )
        .layer(TraceLayer::new_for_http())
        .with_state(state)
}
