//! Rating contract — lifecycle of one rating entity per subject+service pair
//!
//! `NonExistent -> Active` through [`RatingContract::init_ledger`], then any
//! number of overwrites through [`RatingContract::register_rate`]. Deletion
//! is not part of this contract; external deletions only show up in
//! [`RatingContract::get_all_ratings`].
//!
//! The contract holds no state. Every operation receives the transaction's
//! [`LedgerStub`] and reads the platform's committed state at call time.

use rating_types::history::HistoryQueryResult;
use rating_types::ids::LedgerId;
use rating_types::rating::Rating;
use tracing::{debug, info};

use crate::errors::RatingError;
use crate::history::{decode_rating, reconstruct};
use crate::stub::{HistoryFeed, LedgerStub};

/// Stateless rating contract.
#[derive(Debug, Clone, Copy, Default)]
pub struct RatingContract;

impl RatingContract {
    pub fn new() -> Self {
        Self
    }

    /// Create the rating entity for `owner_id` on `service_type`.
    ///
    /// The entity starts at the default rate with the `init` rater sentinel.
    /// Fails with `AlreadyExists` if the key already holds a value.
    pub fn init_ledger<S: LedgerStub>(
        &self,
        stub: &mut S,
        owner_id: &str,
        service_type: &str,
    ) -> Result<LedgerId, RatingError> {
        let ledger_id = LedgerId::compose(owner_id, service_type);

        if self.ledger_exists(stub, &ledger_id)? {
            return Err(RatingError::AlreadyExists {
                ledger_id: ledger_id.to_string(),
            });
        }

        let rating = Rating::initial(ledger_id.clone(), owner_id);
        self.put_rating(stub, &rating)?;

        info!(ledger_id = %ledger_id, owner_id, "Rating ledger initialized");
        Ok(ledger_id)
    }

    /// Read the current rating stored under `ledger_id`.
    ///
    /// Only a key the platform reports as absent is `NotFound`; an empty
    /// stored value fails to decode.
    pub fn read_ledger<S: LedgerStub>(
        &self,
        stub: &S,
        ledger_id: &LedgerId,
    ) -> Result<Rating, RatingError> {
        let bytes = stub.get_state(ledger_id.as_str())?.ok_or_else(|| {
            RatingError::NotFound {
                ledger_id: ledger_id.to_string(),
            }
        })?;

        decode_rating(ledger_id, &bytes)
    }

    /// Whether `ledger_id` currently holds a value.
    pub fn ledger_exists<S: LedgerStub>(
        &self,
        stub: &S,
        ledger_id: &LedgerId,
    ) -> Result<bool, RatingError> {
        Ok(stub.get_state(ledger_id.as_str())?.is_some())
    }

    /// Overwrite the rating under `ledger_id`.
    ///
    /// Writes unconditionally: no existence check, no range check. The new
    /// value does not carry the previous owner forward.
    // TODO: reject a second rating from the same rater for this ledger id
    pub fn register_rate<S: LedgerStub>(
        &self,
        stub: &mut S,
        ledger_id: &LedgerId,
        rate: i64,
        rater_id: &str,
    ) -> Result<(), RatingError> {
        let rating = Rating::rated(ledger_id.clone(), rate, rater_id);
        self.put_rating(stub, &rating)?;

        info!(ledger_id = %ledger_id, rate, rater_id, "Rate registered");
        Ok(())
    }

    /// Every committed state of `ledger_id`, in platform feed order.
    ///
    /// Returns an empty list for a key that was never written. The history
    /// feed is closed on every return path.
    pub fn get_all_ratings<S: LedgerStub>(
        &self,
        stub: &S,
        ledger_id: &LedgerId,
    ) -> Result<Vec<HistoryQueryResult>, RatingError> {
        info!(ledger_id = %ledger_id, "GetAllRatings");

        let mut feed = HistoryFeed::open(stub, ledger_id.as_str())?;
        let records = reconstruct(ledger_id, &mut feed)?;
        feed.close();

        debug!(ledger_id = %ledger_id, entries = records.len(), "History collected");
        Ok(records)
    }

    fn put_rating<S: LedgerStub>(&self, stub: &mut S, rating: &Rating) -> Result<(), RatingError> {
        let bytes = rating.to_bytes().map_err(|e| RatingError::Encode {
            ledger_id: rating.ledger_id.to_string(),
            reason: e.to_string(),
        })?;
        stub.put_state(rating.ledger_id.as_str(), &bytes)?;
        Ok(())
    }
}
