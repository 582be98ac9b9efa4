//! Rating Contract Logic
//!
//! This crate implements the contract layer for the rating ledger: one
//! versioned rating entity per subject+service pair, stored on a ledger
//! platform that provides atomic per-key reads/writes and per-key history.
//!
//! # Modules
//! - `errors`: Platform, rating, and dispatch error types
//! - `stub`: Ledger platform access (`LedgerStub`) and the scoped history feed
//! - `history`: Reconstruction of point-in-time snapshots from key history
//! - `contract`: Rating operations (init, read, exists, register, history)
//! - `dispatch`: Name-based function invocation for remote callers
//! - `memory`: In-memory ledger platform
//!
//! # Version
//! v0.1.0 — Initial implementation

pub mod errors;
pub mod stub;
pub mod history;
pub mod contract;
pub mod dispatch;
pub mod memory;

pub use contract::RatingContract;
pub use dispatch::Function;

/// Contract ABI version — frozen after release
pub const CONTRACT_ABI_VERSION: &str = "1.0.0";
