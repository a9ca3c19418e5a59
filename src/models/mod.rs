//! Data models representing database entities and API bodies.

/// Ledger account model
pub mod account;
/// Debit, credit and balance-check models
pub mod ledger;
