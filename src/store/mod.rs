//! Document store layer backed by MongoDB
//!
//! One collection (`meetings`), four operations. The existence check behind the
//! 404 responses of update and delete is folded into the atomic
//! find-and-modify calls.

mod meetings;

pub use meetings::{Meeting, MeetingDraft, MeetingPatch, MeetingStore};
