//! In-memory Ledger Platform
//!
//! A single-process stand-in for the platform: committed world state, an
//! append-only history per key, and transactions that commit atomically.
//!
//! Semantics follow an execute-then-commit ledger:
//! - Reads inside a transaction see committed state only, never the
//!   transaction's own pending writes.
//! - All writes of a transaction share one tx id and one timestamp.
//! - A transaction dropped without `commit` leaves no trace.

use chrono::{DateTime, Utc};
use sha2::{Digest, Sha256};
use std::collections::{BTreeMap, HashMap};
use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::Arc;
use tracing::{debug, warn};
use uuid::Uuid;

use crate::errors::PlatformError;
use crate::stub::{HistoryIterator, KeyModification, LedgerStub};

/// In-memory versioned key-value ledger.
#[derive(Debug)]
pub struct MemoryLedger {
    /// Committed current values
    world: HashMap<String, Vec<u8>>,
    /// Per-key mutation history, oldest first
    history: HashMap<String, Vec<KeyModification>>,
    /// Per-ledger nonce mixed into tx ids
    nonce: Uuid,
    /// Number of committed transactions
    sequence: u64,
    /// History iterators handed out and not yet closed
    open_feeds: Arc<AtomicUsize>,
}

impl MemoryLedger {
    pub fn new() -> Self {
        Self {
            world: HashMap::new(),
            history: HashMap::new(),
            nonce: Uuid::now_v7(),
            sequence: 0,
            open_feeds: Arc::new(AtomicUsize::new(0)),
        }
    }

    /// Open a transaction against the current committed state.
    pub fn transaction(&mut self) -> MemoryTransaction<'_> {
        MemoryTransaction {
            ledger: self,
            writes: BTreeMap::new(),
        }
    }

    /// Run `f` as one unit of work; commit on `Ok`, discard on `Err`.
    pub fn submit<T, E, F>(&mut self, f: F) -> Result<T, E>
    where
        F: FnOnce(&mut MemoryTransaction<'_>) -> Result<T, E>,
    {
        let mut tx = self.transaction();
        let output = f(&mut tx)?;
        tx.commit();
        Ok(output)
    }

    /// Run `f` as a query. Any writes it makes are discarded.
    pub fn evaluate<T, E, F>(&mut self, f: F) -> Result<T, E>
    where
        F: FnOnce(&mut MemoryTransaction<'_>) -> Result<T, E>,
    {
        let mut tx = self.transaction();
        f(&mut tx)
    }

    /// Delete `key` as a platform-side transaction.
    ///
    /// Returns the tx id of the deletion, or `None` if the key held no value.
    pub fn delete(&mut self, key: &str) -> Option<String> {
        self.world.remove(key)?;

        let tx_id = self.next_tx_id();
        let timestamp = Utc::now();
        self.history
            .entry(key.to_string())
            .or_default()
            .push(KeyModification {
                value: Vec::new(),
                tx_id: tx_id.clone(),
                timestamp,
                is_delete: true,
            });

        debug!(key, tx_id = %tx_id, "Key deleted");
        Some(tx_id)
    }

    /// Number of history feeds opened and not yet closed.
    pub fn open_feeds(&self) -> usize {
        self.open_feeds.load(Ordering::SeqCst)
    }

    /// Number of committed mutations of `key`.
    pub fn history_len(&self, key: &str) -> usize {
        self.history.get(key).map_or(0, Vec::len)
    }

    /// Number of committed transactions.
    pub fn sequence(&self) -> u64 {
        self.sequence
    }

    fn next_tx_id(&mut self) -> String {
        self.sequence += 1;
        let mut hasher = Sha256::new();
        hasher.update(self.nonce.as_bytes());
        hasher.update(self.sequence.to_be_bytes());
        hex::encode(hasher.finalize())
    }

    fn apply(&mut self, writes: BTreeMap<String, Vec<u8>>) -> Option<String> {
        if writes.is_empty() {
            return None;
        }

        let tx_id = self.next_tx_id();
        let timestamp: DateTime<Utc> = Utc::now();

        for (key, value) in writes {
            self.history
                .entry(key.clone())
                .or_default()
                .push(KeyModification {
                    value: value.clone(),
                    tx_id: tx_id.clone(),
                    timestamp,
                    is_delete: false,
                });
            self.world.insert(key, value);
        }

        debug!(tx_id = %tx_id, sequence = self.sequence, "Transaction committed");
        Some(tx_id)
    }
}

impl Default for MemoryLedger {
    fn default() -> Self {
        Self::new()
    }
}

/// One unit of work against a [`MemoryLedger`].
#[derive(Debug)]
pub struct MemoryTransaction<'a> {
    ledger: &'a mut MemoryLedger,
    /// Pending writes, applied in key order on commit
    writes: BTreeMap<String, Vec<u8>>,
}

impl MemoryTransaction<'_> {
    /// Apply the write set. Returns the tx id, or `None` for a read-only
    /// transaction.
    pub fn commit(mut self) -> Option<String> {
        let writes = std::mem::take(&mut self.writes);
        self.ledger.apply(writes)
    }
}

impl LedgerStub for MemoryTransaction<'_> {
    type History = MemoryHistory;

    fn get_state(&self, key: &str) -> Result<Option<Vec<u8>>, PlatformError> {
        if key.is_empty() {
            return Err(PlatformError::Read {
                key: key.to_string(),
                reason: "key must not be empty".to_string(),
            });
        }
        Ok(self.ledger.world.get(key).cloned())
    }

    fn put_state(&mut self, key: &str, value: &[u8]) -> Result<(), PlatformError> {
        if key.is_empty() {
            return Err(PlatformError::Write {
                key: key.to_string(),
                reason: "key must not be empty".to_string(),
            });
        }
        if value.is_empty() {
            warn!(key, "Rejected empty value write");
            return Err(PlatformError::Write {
                key: key.to_string(),
                reason: "value must not be empty".to_string(),
            });
        }
        self.writes.insert(key.to_string(), value.to_vec());
        Ok(())
    }

    fn history_for_key(&self, key: &str) -> Result<MemoryHistory, PlatformError> {
        if key.is_empty() {
            return Err(PlatformError::History {
                key: key.to_string(),
                reason: "key must not be empty".to_string(),
            });
        }

        let entries = self.ledger.history.get(key).cloned().unwrap_or_default();
        self.ledger.open_feeds.fetch_add(1, Ordering::SeqCst);

        Ok(MemoryHistory {
            entries: entries.into_iter(),
            open_feeds: Some(Arc::clone(&self.ledger.open_feeds)),
        })
    }
}

/// History iterator handed out by [`MemoryTransaction`], oldest first.
#[derive(Debug)]
pub struct MemoryHistory {
    entries: std::vec::IntoIter<KeyModification>,
    /// Present until closed
    open_feeds: Option<Arc<AtomicUsize>>,
}

impl Iterator for MemoryHistory {
    type Item = Result<KeyModification, PlatformError>;

    fn next(&mut self) -> Option<Self::Item> {
        self.open_feeds.as_ref()?;
        self.entries.next().map(Ok)
    }
}

impl HistoryIterator for MemoryHistory {
    fn close(&mut self) {
        if let Some(counter) = self.open_feeds.take() {
            counter.fetch_sub(1, Ordering::SeqCst);
        }
    }
}
