pub mod config;
pub mod http;
pub mod store;

pub use config::Config;
pub use http::{create_router, AppState};
pub use store::{Meeting, MeetingDraft, MeetingPatch, MeetingStore};
