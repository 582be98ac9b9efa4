//! Types library for the rating ledger
//!
//! This library provides the data model stored on the ledger and the
//! snapshot views returned to callers. Field names on the wire are frozen
//! for compatibility with values already committed.
//!
//! # Version
//! v1.0.0 - Frozen wire format
//!
//! # Modules
//! - `ids`: Composite ledger key (`LedgerId`)
//! - `rating`: The rating entity stored under one ledger key
//! - `history`: Point-in-time snapshots reconstructed from key history

// Public modules
pub mod ids;
pub mod rating;
pub mod history;
