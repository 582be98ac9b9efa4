use rating_contract::memory::MemoryLedger;
use rating_contract::RatingContract;
use std::sync::Arc;
use tokio::sync::Mutex;

#[derive(Clone)]
pub struct AppState {
    /// Each request holds the lock for one unit of work
    pub ledger: Arc<Mutex<MemoryLedger>>,
    pub contract: RatingContract,
}

impl AppState {
    pub fn new() -> Self {
        Self {
            ledger: Arc::new(Mutex::new(MemoryLedger::new())),
            contract: RatingContract::new(),
        }
    }
}

impl Default for AppState {
    fn default() -> Self {
        Self::new()
    }
}
