//! Account data models and API request/response types.
//!
//! This module defines:
//! - `Account`: Database entity, one per user
//! - `NewAccount`: A fully-prepared row handed to the store on creation
//! - `CreateAccountRequest`: Request body for creating accounts
//! - `AccountResponse`: Response body returned to clients
//! - `ListAccountsQuery`: Pagination parameters for the admin listing

use chrono::{DateTime, Utc};
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// Represents a ledger account record from the database.
///
/// # Database Table
///
/// Maps to the `bank_accounts` table. Each account:
/// - Belongs to exactly one user (`user_id` is unique)
/// - Has a unique, human-facing `account_number`
/// - Holds a non-negative balance with cents precision
#[derive(Debug, Clone, PartialEq, sqlx::FromRow)]
pub struct Account {
    /// Unique identifier, generated at creation
    pub id: Uuid,

    /// Owning user, as forwarded by the gateway
    pub user_id: String,

    /// Human-facing identifier, e.g. `ACC7K2Q9ZP1MX`
    pub account_number: String,

    /// Current balance, scale 2
    ///
    /// Only debit and credit write this field.
    pub balance: Decimal,

    /// Currency code, e.g. "USD"
    pub currency: String,

    /// Inactive accounts reject debit and credit
    pub is_active: bool,

    /// Bumped on every balance write; used for compare-and-swap updates
    pub version: i64,

    pub created_at: DateTime<Utc>,

    /// Refreshed on every mutation
    pub updated_at: DateTime<Utc>,
}

/// Row prepared by the service and inserted as-is by the store.
#[derive(Debug, Clone)]
pub struct NewAccount {
    pub id: Uuid,
    pub user_id: String,
    pub account_number: String,
    pub balance: Decimal,
    pub currency: String,
    pub is_active: bool,
}

/// Request body for creating a new account.
///
/// # JSON Example
///
/// ```json
/// {
///   "user_id": "u1",
///   "initial_balance": "1000.00",
///   "currency": "USD"
/// }
/// ```
///
/// `initial_balance` and `currency` fall back to the configured defaults.
#[derive(Debug, Deserialize)]
pub struct CreateAccountRequest {
    pub user_id: String,

    #[serde(default)]
    pub initial_balance: Option<Decimal>,

    #[serde(default)]
    pub currency: Option<String>,
}

/// Response body for account endpoints.
///
/// # JSON Example
///
/// ```json
/// {
///   "id": "550e8400-e29b-41d4-a716-446655440000",
///   "user_id": "u1",
///   "account_number": "ACC7K2Q9ZP1MX",
///   "balance": "1000.00",
///   "currency": "USD",
///   "is_active": true,
///   "created_at": "2025-12-20T10:00:00Z",
///   "updated_at": "2025-12-20T10:00:00Z"
/// }
/// ```
#[derive(Debug, Serialize)]
pub struct AccountResponse {
    pub id: Uuid,
    pub user_id: String,
    pub account_number: String,
    pub balance: Decimal,
    pub currency: String,
    pub is_active: bool,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

/// Drops the internal `version` counter.
impl From<Account> for AccountResponse {
    fn from(account: Account) -> Self {
        Self {
            id: account.id,
            user_id: account.user_id,
            account_number: account.account_number,
            balance: account.balance,
            currency: account.currency,
            is_active: account.is_active,
            created_at: account.created_at,
            updated_at: account.updated_at,
        }
    }
}

/// Query string for `GET /api/v1/accounts`.
#[derive(Debug, Deserialize)]
pub struct ListAccountsQuery {
    #[serde(default)]
    pub skip: i64,

    #[serde(default = "default_limit")]
    pub limit: i64,
}

fn default_limit() -> i64 {
    100
}
