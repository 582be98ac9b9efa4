//! Identifier types for rating entities
//!
//! A rating entity is keyed by the subject being rated and the service the
//! rating applies to. The key is formed once, at creation, and is treated as
//! an opaque string afterwards.

use serde::{Deserialize, Serialize};
use std::fmt;

/// Separator between the owner and service parts of a ledger key.
pub const LEDGER_ID_SEPARATOR: char = ':';

/// Composite key identifying one subject+service rating entity.
///
/// Format: "OWNER:SERVICE" (e.g., "u1:delivery"). Only [`LedgerId::compose`]
/// builds the key from its parts; every other constructor takes the key
/// verbatim and never re-derives it.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Default, Serialize, Deserialize)]
#[serde(transparent)]
pub struct LedgerId(String);

impl LedgerId {
    /// Form the key for a new entity from owner and service type.
    pub fn compose(owner_id: &str, service_type: &str) -> Self {
        let mut key = String::with_capacity(owner_id.len() + service_type.len() + 1);
        key.push_str(owner_id);
        key.push(LEDGER_ID_SEPARATOR);
        key.push_str(service_type);
        Self(key)
    }

    /// Wrap an existing key as supplied by a caller.
    pub fn new(key: impl Into<String>) -> Self {
        Self(key.into())
    }

    /// Get the key string
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for LedgerId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

impl From<&str> for LedgerId {
    fn from(s: &str) -> Self {
        Self::new(s)
    }
}

impl From<String> for LedgerId {
    fn from(s: String) -> Self {
        Self(s)
    }
}
