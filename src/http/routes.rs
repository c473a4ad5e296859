use super::handlers;
use super::state::AppState;
use axum::{
    routing::{get, patch},
    Router,
};
use tower_http::trace::TraceLayer;

/// Create the HTTP router with all routes
pub fn create_router(state: AppState) -> Router {
    Router::new()
        // Greeting
        .route("/", get(handlers::greeting))
        // Meeting CRUD
        .route(
            "/api/meetings",
            get(handlers::list_meetings).post(handlers::create_meeting),
        )
        .route(
            "/api/meetings/:id",
            patch(handlers::update_meeting).delete(handlers::delete_meeting),
        )
        // Add tracing middleware for request logging
        .layer(TraceLayer::new_for_http())
        .with_state(state)
}
