//! History reconstruction
//!
//! Turns the raw per-key mutation feed into typed point-in-time snapshots.
//! Entries keep the platform's order; nothing is sorted here.

use rating_types::history::HistoryQueryResult;
use rating_types::ids::LedgerId;
use rating_types::rating::Rating;
use tracing::debug;

use crate::errors::{PlatformError, RatingError};
use crate::stub::KeyModification;

/// Decode a stored value into a rating, attributing failures to `ledger_id`.
pub fn decode_rating(ledger_id: &LedgerId, bytes: &[u8]) -> Result<Rating, RatingError> {
    Rating::from_bytes(bytes).map_err(|e| RatingError::Decode {
        ledger_id: ledger_id.to_string(),
        reason: e.to_string(),
    })
}

/// Build the snapshot sequence for `ledger_id` from its history feed.
///
/// Entries with an empty value (tombstones) become a stub record carrying
/// only the ledger id. The first feed or decode error aborts the whole
/// reconstruction.
pub fn reconstruct<I>(ledger_id: &LedgerId, feed: I) -> Result<Vec<HistoryQueryResult>, RatingError>
where
    I: IntoIterator<Item = Result<KeyModification, PlatformError>>,
{
    let mut records = Vec::new();

    for modification in feed {
        let modification = modification?;

        let record = if modification.value.is_empty() {
            Rating::tombstone(ledger_id.clone())
        } else {
            decode_rating(ledger_id, &modification.value)?
        };

        debug!(
            ledger_id = %ledger_id,
            tx_id = %modification.tx_id,
            is_delete = modification.is_delete,
            "History entry reconstructed"
        );

        records.push(HistoryQueryResult {
            record,
            tx_id: modification.tx_id,
            timestamp: modification.timestamp,
            is_delete: modification.is_delete,
        });
    }

    Ok(records)
}
