//! HTTP API server
//!
//! This module provides the REST API over the meetings collection:
//! - GET /api/meetings - List all meetings
//! - POST /api/meetings - Create a new meeting
//! - PATCH /api/meetings/:id - Partially update a meeting
//! - DELETE /api/meetings/:id - Delete a meeting
//! - GET / - Greeting

mod handlers;
mod routes;
mod state;

pub use routes::create_router;
pub use state::AppState;
