//! Ledger access — the contract's only point of contact with the platform
//!
//! The Ledger Platform provides atomic per-key reads and writes plus an
//! append-only history feed per key. The contract sees it through
//! [`LedgerStub`], scoped to the current transaction.
//!
//! History feeds hold platform-side read resources. They are always wrapped
//! in a [`HistoryFeed`] guard, which closes the underlying iterator exactly
//! once when the guard goes out of scope.

use chrono::{DateTime, Utc};

use crate::errors::PlatformError;

/// One committed mutation of a key, as reported by the platform.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct KeyModification {
    /// Value written by the mutation; empty for deletions.
    pub value: Vec<u8>,
    pub tx_id: String,
    pub timestamp: DateTime<Utc>,
    pub is_delete: bool,
}

/// Platform iterator over the history of one key.
///
/// Entries arrive in platform order. `close` releases the platform handle
/// and must be safe to call on a partially consumed iterator.
pub trait HistoryIterator: Iterator<Item = Result<KeyModification, PlatformError>> {
    fn close(&mut self);
}

/// Transaction-scoped handle to the Ledger Platform.
pub trait LedgerStub {
    type History: HistoryIterator;

    /// Current committed value, or `None` if the key was never written.
    ///
    /// A key holding an empty value is reported as `Some(vec![])`.
    fn get_state(&self, key: &str) -> Result<Option<Vec<u8>>, PlatformError>;

    /// Write a new current value for `key`.
    fn put_state(&mut self, key: &str, value: &[u8]) -> Result<(), PlatformError>;

    /// Open the mutation history of `key`.
    fn history_for_key(&self, key: &str) -> Result<Self::History, PlatformError>;
}

/// Scoped history feed. Closes the platform iterator on drop.
#[derive(Debug)]
pub struct HistoryFeed<I: HistoryIterator> {
    inner: I,
    closed: bool,
}

impl<I: HistoryIterator> HistoryFeed<I> {
    /// Open the history of `key` through `stub`.
    pub fn open<S>(stub: &S, key: &str) -> Result<Self, PlatformError>
    where
        S: LedgerStub<History = I>,
    {
        Ok(Self::new(stub.history_for_key(key)?))
    }

    /// Take ownership of an already opened iterator.
    pub fn new(inner: I) -> Self {
        Self {
            inner,
            closed: false,
        }
    }

    /// Close the feed now instead of at scope end.
    pub fn close(mut self) {
        self.release();
    }

    fn release(&mut self) {
        if !self.closed {
            self.closed = true;
            self.inner.close();
        }
    }
}

impl<I: HistoryIterator> Iterator for HistoryFeed<I> {
    type Item = Result<KeyModification, PlatformError>;

    fn next(&mut self) -> Option<Self::Item> {
        if self.closed {
            return None;
        }
        self.inner.next()
    }
}

impl<I: HistoryIterator> Drop for HistoryFeed<I> {
    fn drop(&mut self) {
        self.release();
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::cell::Cell;
    use std::rc::Rc;

    struct CountingIter {
        entries: std::vec::IntoIter<Result<KeyModification, PlatformError>>,
        closes: Rc<Cell<usize>>,
    }

    impl Iterator for CountingIter {
        type Item = Result<KeyModification, PlatformError>;

        fn next(&mut self) -> Option<Self::Item> {
            self.entries.next()
        }
    }

    impl HistoryIterator for CountingIter {
        fn close(&mut self) {
            self.closes.set(self.closes.get() + 1);
        }
    }

    fn modification(tx_id: &str) -> KeyModification {
        KeyModification {
            value: b"{}".to_vec(),
            tx_id: tx_id.to_string(),
            timestamp: Utc::now(),
            is_delete: false,
        }
    }

    fn counting(n: usize) -> (CountingIter, Rc<Cell<usize>>) {
        let closes = Rc::new(Cell::new(0));
        let entries: Vec<_> = (0..n).map(|i| Ok(modification(&format!("tx{}", i)))).collect();
        (
            CountingIter {
                entries: entries.into_iter(),
                closes: closes.clone(),
            },
            closes,
        )
    }

    #[test]
    fn test_feed_closes_on_drop() {
        let (iter, closes) = counting(3);
        {
            let mut feed = HistoryFeed::new(iter);
            assert!(feed.next().is_some());
        }
        assert_eq!(closes.get(), 1);
    }

    #[test]
    fn test_feed_explicit_close_happens_once() {
        let (iter, closes) = counting(2);
        let feed = HistoryFeed::new(iter);
        feed.close();
        assert_eq!(closes.get(), 1);
    }

    #[test]
    fn test_feed_closes_after_full_drain() {
        let (iter, closes) = counting(4);
        let feed = HistoryFeed::new(iter);
        let ids: Vec<String> = feed.map(|m| m.unwrap().tx_id).collect();
        assert_eq!(ids, vec!["tx0", "tx1", "tx2", "tx3"]);
        assert_eq!(closes.get(), 1);
    }

    #[test]
    fn test_feed_closes_on_early_return() {
        fn first_tx(iter: CountingIter) -> Option<String> {
            let mut feed = HistoryFeed::new(iter);
            let first = feed.next()?.ok()?;
            Some(first.tx_id)
        }

        let (iter, closes) = counting(5);
        assert_eq!(first_tx(iter).as_deref(), Some("tx0"));
        assert_eq!(closes.get(), 1);
    }
}
