//! Persistence for ledger accounts.
//!
//! The [`AccountStore`] trait is the only path to the `bank_accounts` data.
//! Balance writes are compare-and-swap on the row `version`, so the service
//! can serialize read-check-write sequences per account without holding a
//! lock across requests.

mod memory;
mod postgres;

pub use memory::InMemoryAccountStore;
pub use postgres::PgAccountStore;

use async_trait::async_trait;
use rust_decimal::Decimal;
use uuid::Uuid;

use crate::{
    error::AppError,
    models::account::{Account, NewAccount},
};

#[async_trait]
pub trait AccountStore: Send + Sync {
    /// Insert a new account.
    ///
    /// Fails with [`AppError::Conflict`] when `user_id` or `account_number`
    /// is already taken.
    async fn insert(&self, account: NewAccount) -> Result<Account, AppError>;

    async fn find_by_user_id(&self, user_id: &str) -> Result<Option<Account>, AppError>;

    async fn find_by_id(&self, id: Uuid) -> Result<Option<Account>, AppError>;

    /// Accounts ordered by creation time.
    async fn list(&self, skip: i64, limit: i64) -> Result<Vec<Account>, AppError>;

    /// Write `balance` if the row is still at `expected_version`.
    ///
    /// On success the version is bumped, `updated_at` refreshed and the new
    /// row returned. `None` means another writer got there first.
    async fn update_balance(
        &self,
        id: Uuid,
        expected_version: i64,
        balance: Decimal,
    ) -> Result<Option<Account>, AppError>;

    /// Cheap connectivity probe.
    async fn ping(&self) -> Result<(), AppError>;
}
