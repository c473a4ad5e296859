use crate::store::MeetingStore;
use mongodb::Database;

/// Shared application state for HTTP handlers
#[derive(Clone)]
pub struct AppState {
    /// Store handle, opened once at startup and shared by all requests
    pub meetings: MeetingStore,
}

impl AppState {
    pub fn new(database: &Database) -> Self {
        Self {
            meetings: MeetingStore::new(database),
        }
    }
}
