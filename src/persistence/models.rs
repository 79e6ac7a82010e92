//! Database models for state snapshots.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::domain::{EventId, UserId};

/// `kind` column value for the event registry payload.
pub const KIND_EVENTS: &str = "events";
/// `kind` column value for the registration store payload.
pub const KIND_REGISTRATIONS: &str = "registrations";
/// `kind` column value for the feedback store payload.
pub const KIND_FEEDBACK: &str = "feedback";
/// `kind` column value for the bookmark store payload.
pub const KIND_BOOKMARKS: &str = "bookmarks";

/// A snapshot row from the `state_snapshots` table.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct StateSnapshot {
    /// Auto-increment row ID.
    pub id: i64,
    /// Store discriminator (e.g. `"events"`).
    pub kind: String,
    /// Full store contents as JSONB.
    pub payload: serde_json::Value,
    /// Snapshot timestamp.
    pub snapshot_at: DateTime<Utc>,
}

/// One user's bookmark set inside the `bookmarks` payload.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct BookmarkRow {
    /// Owning user.
    pub user_id: UserId,
    /// Bookmarked event ids, sorted.
    pub event_ids: Vec<EventId>,
}
