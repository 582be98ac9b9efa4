pub mod invoke;
pub mod ledger;
