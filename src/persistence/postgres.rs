//! PostgreSQL implementation of the persistence layer.

use chrono::{DateTime, Utc};
use sqlx::PgPool;

use super::models::{
    BookmarkRow, KIND_BOOKMARKS, KIND_EVENTS, KIND_FEEDBACK, KIND_REGISTRATIONS, StateSnapshot,
};
use crate::domain::{
    BookmarkStore, EventRecord, EventRegistry, Feedback, FeedbackStore, Registration,
    RegistrationStore,
};
use crate::error::HubError;

/// PostgreSQL-backed persistence layer using `sqlx::PgPool`.
#[derive(Debug, Clone)]
pub struct PostgresPersistence {
    pool: PgPool,
}

impl PostgresPersistence {
    /// Creates a new persistence layer with the given connection pool.
    #[must_use]
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }

    /// Saves one store payload as a snapshot row.
    ///
    /// # Errors
    ///
    /// Returns a [`HubError::Storage`] on database failure.
    pub async fn save_snapshot(
        &self,
        kind: &str,
        payload: &serde_json::Value,
    ) -> Result<i64, HubError> {
        let row = sqlx::query_scalar::<_, i64>(
            "INSERT INTO state_snapshots (kind, payload) VALUES ($1, $2) RETURNING id",
        )
        .bind(kind)
        .bind(payload)
        .fetch_one(&self.pool)
        .await
        .map_err(|e| HubError::Storage(e.to_string()))?;

        Ok(row)
    }

    /// Loads the latest snapshot for each kind using `DISTINCT ON`.
    ///
    /// # Errors
    ///
    /// Returns a [`HubError::Storage`] on database failure.
    pub async fn load_latest_snapshots(&self) -> Result<Vec<StateSnapshot>, HubError> {
        let rows = sqlx::query_as::<_, (i64, String, serde_json::Value, DateTime<Utc>)>(
            "SELECT DISTINCT ON (kind) id, kind, payload, snapshot_at \
             FROM state_snapshots ORDER BY kind, snapshot_at DESC",
        )
        .fetch_all(&self.pool)
        .await
        .map_err(|e| HubError::Storage(e.to_string()))?;

        Ok(rows
            .into_iter()
            .map(|(id, kind, payload, snapshot_at)| StateSnapshot {
                id,
                kind,
                payload,
                snapshot_at,
            })
            .collect())
    }

    /// Deletes snapshots older than the given number of days.
    ///
    /// # Errors
    ///
    /// Returns a [`HubError::Storage`] on database failure.
    pub async fn delete_old_snapshots(&self, before_days: u64) -> Result<u64, HubError> {
        let cutoff =
            Utc::now() - chrono::Duration::days(i64::try_from(before_days).unwrap_or(i64::MAX));

        let result = sqlx::query("DELETE FROM state_snapshots WHERE snapshot_at < $1")
            .bind(cutoff)
            .execute(&self.pool)
            .await
            .map_err(|e| HubError::Storage(e.to_string()))?;

        Ok(result.rows_affected())
    }

    /// Snapshots every in-memory store in one pass.
    ///
    /// Each store becomes its own row, so a partial failure never leaves
    /// a mixed-generation set behind: restore always picks the latest
    /// complete row per kind.
    ///
    /// # Errors
    ///
    /// Returns a [`HubError::Storage`] on serialization or database failure.
    pub async fn save_state(
        &self,
        events: &EventRegistry,
        registrations: &RegistrationStore,
        feedback: &FeedbackStore,
        bookmarks: &BookmarkStore,
    ) -> Result<(), HubError> {
        let event_records = events.snapshot().await;
        let registration_rows = registrations.snapshot().await;
        let feedback_rows = feedback.snapshot().await;
        let bookmark_rows: Vec<BookmarkRow> = bookmarks
            .snapshot()
            .await
            .into_iter()
            .map(|(user_id, event_ids)| BookmarkRow { user_id, event_ids })
            .collect();

        self.save_snapshot(KIND_EVENTS, &to_payload(&event_records)?)
            .await?;
        self.save_snapshot(KIND_REGISTRATIONS, &to_payload(&registration_rows)?)
            .await?;
        self.save_snapshot(KIND_FEEDBACK, &to_payload(&feedback_rows)?)
            .await?;
        self.save_snapshot(KIND_BOOKMARKS, &to_payload(&bookmark_rows)?)
            .await?;

        tracing::debug!(
            events = event_records.len(),
            registrations = registration_rows.len(),
            feedback = feedback_rows.len(),
            bookmark_sets = bookmark_rows.len(),
            "state snapshot saved"
        );

        Ok(())
    }

    /// Restores every store from the latest snapshot per kind.
    ///
    /// Intended for startup, when the stores are still empty. Kinds with
    /// no stored snapshot are left untouched.
    ///
    /// # Errors
    ///
    /// Returns a [`HubError`] on database failure, a corrupt payload, or
    /// a duplicate row in the payload.
    pub async fn restore_state(
        &self,
        events: &EventRegistry,
        registrations: &RegistrationStore,
        feedback: &FeedbackStore,
        bookmarks: &BookmarkStore,
    ) -> Result<(), HubError> {
        for snapshot in self.load_latest_snapshots().await? {
            match snapshot.kind.as_str() {
                KIND_EVENTS => {
                    let records: Vec<EventRecord> = from_payload(snapshot.payload)?;
                    let count = records.len();
                    for record in records {
                        events.insert(record).await?;
                    }
                    tracing::info!(count, "restored events from snapshot");
                }
                KIND_REGISTRATIONS => {
                    let rows: Vec<Registration> = from_payload(snapshot.payload)?;
                    let count = rows.len();
                    for row in rows {
                        registrations.insert_unique(row).await?;
                    }
                    tracing::info!(count, "restored registrations from snapshot");
                }
                KIND_FEEDBACK => {
                    let rows: Vec<Feedback> = from_payload(snapshot.payload)?;
                    let count = rows.len();
                    for row in rows {
                        feedback.insert(row).await?;
                    }
                    tracing::info!(count, "restored feedback from snapshot");
                }
                KIND_BOOKMARKS => {
                    let rows: Vec<BookmarkRow> = from_payload(snapshot.payload)?;
                    let count = rows.len();
                    for row in rows {
                        bookmarks.restore(row.user_id, row.event_ids).await;
                    }
                    tracing::info!(count, "restored bookmark sets from snapshot");
                }
                other => {
                    tracing::warn!(kind = %other, "skipping unknown snapshot kind");
                }
            }
        }
        Ok(())
    }
}

fn to_payload<T: serde::Serialize>(value: &T) -> Result<serde_json::Value, HubError> {
    serde_json::to_value(value).map_err(|e| HubError::Storage(e.to_string()))
}

fn from_payload<T: serde::de::DeserializeOwned>(payload: serde_json::Value) -> Result<T, HubError> {
    serde_json::from_value(payload).map_err(|e| HubError::Storage(e.to_string()))
}
