//! Rating entity stored under one ledger key
//!
//! The persisted value is a JSON object with the fixed field names
//! `ledgerId`, `rate`, `ratedBy` and `ownerId`. Missing fields decode to
//! their zero value so older or partial writes remain readable.

use serde::{Deserialize, Serialize};

use crate::ids::LedgerId;

/// Rate assigned to a freshly created entity (3 of 5).
pub const DEFAULT_RATE: i64 = 3;

/// `rated_by` sentinel written on creation.
pub const INIT_RATER: &str = "init";

/// The versioned value stored under one ledger key.
///
/// `rate` is not range-checked at this layer.
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct Rating {
    pub ledger_id: LedgerId,
    pub rate: i64,
    pub rated_by: String,
    pub owner_id: String,
}

impl Rating {
    /// Entity written when a subject+service pair is first registered.
    pub fn initial(ledger_id: LedgerId, owner_id: impl Into<String>) -> Self {
        Self {
            ledger_id,
            rate: DEFAULT_RATE,
            rated_by: INIT_RATER.to_string(),
            owner_id: owner_id.into(),
        }
    }

    /// Entity written by a rater. The owner is left empty.
    pub fn rated(ledger_id: LedgerId, rate: i64, rated_by: impl Into<String>) -> Self {
        Self {
            ledger_id,
            rate,
            rated_by: rated_by.into(),
            owner_id: String::new(),
        }
    }

    /// Placeholder record for a history entry that carried no value.
    pub fn tombstone(ledger_id: LedgerId) -> Self {
        Self {
            ledger_id,
            ..Self::default()
        }
    }

    /// Encode to the persisted JSON form.
    pub fn to_bytes(&self) -> Result<Vec<u8>, serde_json::Error> {
        serde_json::to_vec(self)
    }

    /// Decode from the persisted JSON form.
    ///
    /// A stored `null` decodes to the zero rating, like an object with every
    /// field missing.
    pub fn from_bytes(bytes: &[u8]) -> Result<Self, serde_json::Error> {
        Ok(serde_json::from_slice::<Option<Self>>(bytes)?.unwrap_or_default())
    }
}
