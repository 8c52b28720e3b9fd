//! Append-only persistence for rendered activity records.

use async_trait::async_trait;
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use thiserror::Error;
use tribe_storage::ActivityId;

use crate::event::{ActivityAction, ActivityKind, ActivityMeta};

/// An immutable, rendered activity feed entry.
///
/// Never mutated after creation; corrections happen by appending new records.
#[derive(Clone, Debug, Serialize, Deserialize)]
pub struct ActivityRecord {
    pub id: ActivityId,
    pub kind: ActivityKind,
    pub action: ActivityAction,
    /// Rendered feed sentence (see [`crate::render_message`]).
    pub message: String,
    pub meta: ActivityMeta,
    pub created_at: DateTime<Utc>,
}

/// Filter for querying the activity log
#[derive(Clone, Debug, Default)]
pub struct ActivityFilter {
    pub kind: Option<ActivityKind>,
    pub action: Option<ActivityAction>,
    /// Maximum number of results to return
    pub limit: Option<u32>,
    /// Number of results to skip (for pagination)
    pub offset: Option<u32>,
}

impl ActivityFilter {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn kind(mut self, kind: ActivityKind) -> Self {
        self.kind = Some(kind);
        self
    }

    pub fn action(mut self, action: ActivityAction) -> Self {
        self.action = Some(action);
        self
    }

    pub fn limit(mut self, limit: u32) -> Self {
        self.limit = Some(limit);
        self
    }

    pub fn offset(mut self, offset: u32) -> Self {
        self.offset = Some(offset);
        self
    }
}

/// Error type for activity log operations
#[derive(Debug, Error)]
pub enum ActivityLogError {
    #[error("database error: {0}")]
    Database(String),
}

/// Trait for activity log persistence.
///
/// Failures to append must be logged by the caller but never fail the
/// operation that produced the event.
#[async_trait]
pub trait ActivityLog: Send + Sync {
    /// Append one record. Records are immutable once appended.
    async fn append(&self, record: ActivityRecord) -> Result<(), ActivityLogError>;

    /// Query records matching the filter, newest first.
    async fn query(&self, filter: ActivityFilter) -> Result<Vec<ActivityRecord>, ActivityLogError>;

    /// Count records matching the filter.
    async fn count(&self, filter: ActivityFilter) -> Result<u64, ActivityLogError>;
}
