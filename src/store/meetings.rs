use bson::doc;
use bson::oid::ObjectId;
use bson::Document;
use mongodb::options::{FindOneAndUpdateOptions, ReturnDocument};
use mongodb::{Collection, Database};
use serde::{Deserialize, Serialize};

/// A wine meeting as persisted in the `meetings` collection.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Meeting {
    #[serde(rename = "_id")]
    /// Unique identifier, assigned at creation, immutable
    pub id: ObjectId,
    /// Name of the meeting
    pub name: String,
    /// Wine brought to the meeting
    pub wine: String,
    /// Where the meeting takes place
    pub location: String,
    #[serde(with = "bson::serde_helpers::chrono_datetime_as_bson_datetime")]
    /// When the meeting takes place
    pub date: chrono::DateTime<chrono::Utc>,
}

/// Candidate meeting payload for creation. All four fields are required.
#[derive(Debug, Deserialize)]
pub struct MeetingDraft {
    pub name: String,
    pub wine: String,
    pub location: String,
    pub date: chrono::DateTime<chrono::Utc>,
}

impl MeetingDraft {
    /// Required text fields must be non-empty.
    pub fn is_valid(&self) -> bool {
        !self.name.is_empty() && !self.wine.is_empty() && !self.location.is_empty()
    }
}

/// Partial update payload. Absent fields are left unchanged.
#[derive(Debug, Default, Deserialize)]
pub struct MeetingPatch {
    pub name: Option<String>,
    pub wine: Option<String>,
    pub location: Option<String>,
    pub date: Option<chrono::DateTime<chrono::Utc>>,
}

impl MeetingPatch {
    /// Build the `$set` document carrying only the provided fields, so the
    /// update merges into the stored record instead of overwriting it.
    pub fn into_set_document(self) -> Document {
        let mut set = Document::new();
        if let Some(name) = self.name {
            set.insert("name", name);
        }
        if let Some(wine) = self.wine {
            set.insert("wine", wine);
        }
        if let Some(location) = self.location {
            set.insert("location", location);
        }
        if let Some(date) = self.date {
            set.insert("date", bson::DateTime::from_chrono(date));
        }
        set
    }
}

/// Handle on the `meetings` collection. Cheap to clone; all clones share the
/// client's connection pool.
#[derive(Clone)]
pub struct MeetingStore {
    collection: Collection<Meeting>,
}

impl MeetingStore {
    pub fn new(database: &Database) -> Self {
        Self {
            collection: database.collection("meetings"),
        }
    }

    /// Fetches every meeting. No filtering, no ordering guarantee.
    pub async fn list(&self) -> Result<Vec<Meeting>, mongodb::error::Error> {
        use futures::TryStreamExt;

        let cursor = self.collection.find(doc! {}, None).await?;
        cursor.try_collect().await
    }

    /// Persists a draft under a freshly assigned identifier and returns the
    /// stored record.
    pub async fn create(&self, draft: MeetingDraft) -> Result<Meeting, mongodb::error::Error> {
        let meeting = Meeting {
            id: ObjectId::new(),
            name: draft.name,
            wine: draft.wine,
            location: draft.location,
            date: draft.date,
        };

        self.collection.insert_one(&meeting, None).await?;

        Ok(meeting)
    }

    /// Merges the patch into the meeting with the given id and returns the
    /// post-merge record, or None if no such meeting exists.
    pub async fn update(
        &self,
        id: ObjectId,
        patch: MeetingPatch,
    ) -> Result<Option<Meeting>, mongodb::error::Error> {
        let set = patch.into_set_document();

        // MongoDB rejects an empty $set; a zero-field merge is a plain lookup.
        if set.is_empty() {
            return self.collection.find_one(doc! { "_id": id }, None).await;
        }

        self.collection
            .find_one_and_update(
                doc! { "_id": id },
                doc! { "$set": set },
                Some(
                    FindOneAndUpdateOptions::builder()
                        .return_document(ReturnDocument::After)
                        .build(),
                ),
            )
            .await
    }

    /// Removes the meeting with the given id, returning the removed record or
    /// None if no such meeting exists.
    pub async fn delete(&self, id: ObjectId) -> Result<Option<Meeting>, mongodb::error::Error> {
        self.collection
            .find_one_and_delete(doc! { "_id": id }, None)
            .await
    }
}
