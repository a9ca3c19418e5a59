//! PostgreSQL-backed account store.

use async_trait::async_trait;
use rust_decimal::Decimal;
use uuid::Uuid;

use super::AccountStore;
use crate::{
    db::DbPool,
    error::AppError,
    models::account::{Account, NewAccount},
};

const COLUMNS: &str =
    "id, user_id, account_number, balance, currency, is_active, version, created_at, updated_at";

#[derive(Debug, Clone)]
pub struct PgAccountStore {
    pool: DbPool,
}

impl PgAccountStore {
    pub fn new(pool: DbPool) -> Self {
        Self { pool }
    }
}

/// Turn a unique-constraint violation into a `Conflict`.
fn map_insert_error(err: sqlx::Error, account: &NewAccount) -> AppError {
    if let sqlx::Error::Database(db_err) = &err {
        if db_err.is_unique_violation() {
            return match db_err.constraint() {
                Some("bank_accounts_account_number_key") => AppError::Conflict(format!(
                    "Account number {} already exists",
                    account.account_number
                )),
                _ => AppError::Conflict(format!(
                    "Account already exists for user {}",
                    account.user_id
                )),
            };
        }
    }
    err.into()
}

#[async_trait]
impl AccountStore for PgAccountStore {
    async fn insert(&self, account: NewAccount) -> Result<Account, AppError> {
        sqlx::query_as::<_, Account>(&format!(
            r#"
            INSERT INTO bank_accounts (id, user_id, account_number, balance, currency, is_active)
            VALUES ($1, $2, $3, $4, $5, $6)
            RETURNING {COLUMNS}
            "#
        ))
        .bind(account.id)
        .bind(&account.user_id)
        .bind(&account.account_number)
        .bind(account.balance)
        .bind(&account.currency)
        .bind(account.is_active)
        .fetch_one(&self.pool)
        .await
        .map_err(|err| map_insert_error(err, &account))
    }

    async fn find_by_user_id(&self, user_id: &str) -> Result<Option<Account>, AppError> {
        let account = sqlx::query_as::<_, Account>(&format!(
            "SELECT {COLUMNS} FROM bank_accounts WHERE user_id = $1"
        ))
        .bind(user_id)
        .fetch_optional(&self.pool)
        .await?;

        Ok(account)
    }

    async fn find_by_id(&self, id: Uuid) -> Result<Option<Account>, AppError> {
        let account = sqlx::query_as::<_, Account>(&format!(
            "SELECT {COLUMNS} FROM bank_accounts WHERE id = $1"
        ))
        .bind(id)
        .fetch_optional(&self.pool)
        .await?;

        Ok(account)
    }

    async fn list(&self, skip: i64, limit: i64) -> Result<Vec<Account>, AppError> {
        let accounts = sqlx::query_as::<_, Account>(&format!(
            r#"
            SELECT {COLUMNS}
            FROM bank_accounts
            ORDER BY created_at, id
            OFFSET $1
            LIMIT $2
            "#
        ))
        .bind(skip)
        .bind(limit)
        .fetch_all(&self.pool)
        .await?;

        Ok(accounts)
    }

    async fn update_balance(
        &self,
        id: Uuid,
        expected_version: i64,
        balance: Decimal,
    ) -> Result<Option<Account>, AppError> {
        // The version predicate makes this a compare-and-swap: zero rows
        // means someone else committed since we read.
        let account = sqlx::query_as::<_, Account>(&format!(
            r#"
            UPDATE bank_accounts
            SET balance = $1,
                version = version + 1,
                updated_at = NOW()
            WHERE id = $2 AND version = $3
            RETURNING {COLUMNS}
            "#
        ))
        .bind(balance)
        .bind(id)
        .bind(expected_version)
        .fetch_optional(&self.pool)
        .await?;

        Ok(account)
    }

    async fn ping(&self) -> Result<(), AppError> {
        sqlx::query("SELECT 1").execute(&self.pool).await?;
        Ok(())
    }
}
