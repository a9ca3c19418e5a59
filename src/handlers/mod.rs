//! HTTP request handlers (route handlers).
//!
//! Each handler extracts request data, delegates to the account service and
//! serializes the result.

/// Account management endpoints
pub mod accounts;
/// Service health
pub mod health;
/// Debit, credit and balance checks
pub mod ledger;
