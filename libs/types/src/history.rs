//! Point-in-time snapshots of a rating entity
//!
//! A `HistoryQueryResult` is a read-only view assembled from one entry of the
//! platform's per-key history feed. It is never persisted on its own.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::rating::Rating;

/// One historical state of a rating entity.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct HistoryQueryResult {
    /// Decoded entity, or a stub carrying only the key for empty values.
    pub record: Rating,
    /// Platform-assigned mutation identifier
    pub tx_id: String,
    /// Platform commit time
    pub timestamp: DateTime<Utc>,
    /// True when the entry records a deletion
    pub is_delete: bool,
}
