use super::state::AppState;
use crate::store::{Meeting, MeetingDraft, MeetingPatch};
use axum::{
    extract::{Path, State},
    http::StatusCode,
    response::{IntoResponse, Json},
};
use bson::oid::ObjectId;
use serde::Serialize;
use tracing::{error, info};

// ============================================================================
// Request/Response Types
// ============================================================================

/// Wire shape of a meeting: hex `_id`, RFC 3339 date
#[derive(Debug, Serialize)]
pub struct MeetingBody {
    #[serde(rename = "_id")]
    pub id: String,
    pub name: String,
    pub wine: String,
    pub location: String,
    pub date: chrono::DateTime<chrono::Utc>,
}

impl From<Meeting> for MeetingBody {
    fn from(meeting: Meeting) -> Self {
        Self {
            id: meeting.id.to_hex(),
            name: meeting.name,
            wine: meeting.wine,
            location: meeting.location,
            date: meeting.date,
        }
    }
}

#[derive(Debug, Serialize)]
pub struct MessageResponse {
    pub message: String,
}

impl MessageResponse {
    fn new(message: &str) -> Self {
        Self {
            message: message.to_string(),
        }
    }
}

// ============================================================================
// Handlers
// ============================================================================

/// GET /
/// Greeting for anyone poking at the root
pub async fn greeting() -> impl IntoResponse {
    (StatusCode::OK, "Welcome to the wine BYOB meetings server!")
}

/// GET /api/meetings
/// List all meetings
pub async fn list_meetings(State(state): State<AppState>) -> impl IntoResponse {
    match state.meetings.list().await {
        Ok(meetings) => {
            let body: Vec<MeetingBody> = meetings.into_iter().map(MeetingBody::from).collect();
            (StatusCode::OK, Json(body)).into_response()
        }
        Err(e) => {
            error!("Failed to list meetings: {}", e);
            (
                StatusCode::INTERNAL_SERVER_ERROR,
                Json(MessageResponse::new("Error retrieving meetings")),
            )
                .into_response()
        }
    }
}

/// POST /api/meetings
/// Create a new meeting
///
/// Any creation failure (missing field, wrong type, store fault) collapses to
/// one generic 500, matching the reference contract.
pub async fn create_meeting(
    State(state): State<AppState>,
    Json(payload): Json<serde_json::Value>,
) -> impl IntoResponse {
    let draft: MeetingDraft = match serde_json::from_value(payload) {
        Ok(draft) => draft,
        Err(e) => {
            error!("Rejected meeting payload: {}", e);
            return (
                StatusCode::INTERNAL_SERVER_ERROR,
                Json(MessageResponse::new("Error creating meeting")),
            )
                .into_response();
        }
    };

    if !draft.is_valid() {
        error!("Rejected meeting payload: empty required field");
        return (
            StatusCode::INTERNAL_SERVER_ERROR,
            Json(MessageResponse::new("Error creating meeting")),
        )
            .into_response();
    }

    match state.meetings.create(draft).await {
        Ok(meeting) => {
            info!("Created meeting {}", meeting.id);
            (StatusCode::CREATED, Json(MeetingBody::from(meeting))).into_response()
        }
        Err(e) => {
            error!("Failed to create meeting: {}", e);
            (
                StatusCode::INTERNAL_SERVER_ERROR,
                Json(MessageResponse::new("Error creating meeting")),
            )
                .into_response()
        }
    }
}

/// PATCH /api/meetings/:id
/// Merge the provided fields into an existing meeting
pub async fn update_meeting(
    State(state): State<AppState>,
    Path(id): Path<String>,
    Json(payload): Json<serde_json::Value>,
) -> impl IntoResponse {
    let Ok(id) = ObjectId::parse_str(&id) else {
        error!("Malformed meeting id: {}", id);
        return (
            StatusCode::INTERNAL_SERVER_ERROR,
            Json(MessageResponse::new("Error updating meeting")),
        )
            .into_response();
    };

    let patch: MeetingPatch = match serde_json::from_value(payload) {
        Ok(patch) => patch,
        Err(e) => {
            error!("Rejected update payload for meeting {}: {}", id, e);
            return (
                StatusCode::INTERNAL_SERVER_ERROR,
                Json(MessageResponse::new("Error updating meeting")),
            )
                .into_response();
        }
    };

    match state.meetings.update(id, patch).await {
        Ok(Some(meeting)) => {
            info!("Updated meeting {}", meeting.id);
            (StatusCode::OK, Json(MeetingBody::from(meeting))).into_response()
        }
        Ok(None) => (
            StatusCode::NOT_FOUND,
            Json(MessageResponse::new("Meeting not found")),
        )
            .into_response(),
        Err(e) => {
            error!("Failed to update meeting {}: {}", id, e);
            (
                StatusCode::INTERNAL_SERVER_ERROR,
                Json(MessageResponse::new("Error updating meeting")),
            )
                .into_response()
        }
    }
}

/// DELETE /api/meetings/:id
/// Delete a meeting
pub async fn delete_meeting(
    State(state): State<AppState>,
    Path(id): Path<String>,
) -> impl IntoResponse {
    let Ok(id) = ObjectId::parse_str(&id) else {
        error!("Malformed meeting id: {}", id);
        return (
            StatusCode::INTERNAL_SERVER_ERROR,
            Json(MessageResponse::new("Error deleting meeting")),
        )
            .into_response();
    };

    match state.meetings.delete(id).await {
        Ok(Some(meeting)) => {
            info!("Deleted meeting {}", meeting.id);
            (
                StatusCode::OK,
                Json(MessageResponse::new("Meeting successfully deleted")),
            )
                .into_response()
        }
        Ok(None) => (
            StatusCode::NOT_FOUND,
            Json(MessageResponse::new("Meeting not found")),
        )
            .into_response(),
        Err(e) => {
            error!("Failed to delete meeting {}: {}", id, e);
            (
                StatusCode::INTERNAL_SERVER_ERROR,
                Json(MessageResponse::new("Error deleting meeting")),
            )
                .into_response()
        }
    }
}
