//! In-process account store.
//!
//! Mirrors the PostgreSQL constraints (unique `user_id` and `account_number`,
//! versioned balance writes) behind a single lock. Used by the test suites
//! and handy for running the service without a database.

use std::collections::HashMap;

use async_trait::async_trait;
use chrono::Utc;
use parking_lot::RwLock;
use rust_decimal::Decimal;
use uuid::Uuid;

use super::AccountStore;
use crate::{
    error::AppError,
    models::account::{Account, NewAccount},
};

#[derive(Debug, Default)]
struct Tables {
    accounts: HashMap<Uuid, Account>,
    by_user: HashMap<String, Uuid>,
    by_number: HashMap<String, Uuid>,
}

#[derive(Debug, Default)]
pub struct InMemoryAccountStore {
    tables: RwLock<Tables>,
}

impl InMemoryAccountStore {
    pub fn new() -> Self {
        Self::default()
    }
}

#[async_trait]
impl AccountStore for InMemoryAccountStore {
    async fn insert(&self, new: NewAccount) -> Result<Account, AppError> {
        let mut tables = self.tables.write();

        if tables.by_user.contains_key(&new.user_id) {
            return Err(AppError::Conflict(format!(
                "Account already exists for user {}",
                new.user_id
            )));
        }
        if tables.by_number.contains_key(&new.account_number) {
            return Err(AppError::Conflict(format!(
                "Account number {} already exists",
                new.account_number
            )));
        }

        let now = Utc::now();
        let account = Account {
            id: new.id,
            user_id: new.user_id,
            account_number: new.account_number,
            balance: new.balance,
            currency: new.currency,
            is_active: new.is_active,
            version: 0,
            created_at: now,
            updated_at: now,
        };

        tables.by_user.insert(account.user_id.clone(), account.id);
        tables
            .by_number
            .insert(account.account_number.clone(), account.id);
        tables.accounts.insert(account.id, account.clone());

        Ok(account)
    }

    async fn find_by_user_id(&self, user_id: &str) -> Result<Option<Account>, AppError> {
        let tables = self.tables.read();
        Ok(tables
            .by_user
            .get(user_id)
            .and_then(|id| tables.accounts.get(id))
            .cloned())
    }

    async fn find_by_id(&self, id: Uuid) -> Result<Option<Account>, AppError> {
        Ok(self.tables.read().accounts.get(&id).cloned())
    }

    async fn list(&self, skip: i64, limit: i64) -> Result<Vec<Account>, AppError> {
        let tables = self.tables.read();
        let mut accounts: Vec<Account> = tables.accounts.values().cloned().collect();
        accounts.sort_by(|a, b| a.created_at.cmp(&b.created_at).then(a.id.cmp(&b.id)));

        Ok(accounts
            .into_iter()
            .skip(skip.max(0) as usize)
            .take(limit.max(0) as usize)
            .collect())
    }

    async fn update_balance(
        &self,
        id: Uuid,
        expected_version: i64,
        balance: Decimal,
    ) -> Result<Option<Account>, AppError> {
        let mut tables = self.tables.write();
        let Some(account) = tables.accounts.get_mut(&id) else {
            return Ok(None);
        };
        if account.version != expected_version {
            return Ok(None);
        }

        account.balance = balance;
        account.version += 1;
        account.updated_at = Utc::now();

        Ok(Some(account.clone()))
    }

    async fn ping(&self) -> Result<(), AppError> {
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rust_decimal_macros::dec;

    fn new_account(user_id: &str, number: &str) -> NewAccount {
        NewAccount {
            id: Uuid::new_v4(),
            user_id: user_id.to_string(),
            account_number: number.to_string(),
            balance: dec!(100.00),
            currency: "USD".to_string(),
            is_active: true,
        }
    }

    #[tokio::test]
    async fn enforces_unique_user_and_number() {
        let store = InMemoryAccountStore::new();
        store.insert(new_account("u1", "ACC1")).await.unwrap();

        let same_user = store.insert(new_account("u1", "ACC2")).await;
        assert!(matches!(same_user, Err(AppError::Conflict(_))));

        let same_number = store.insert(new_account("u2", "ACC1")).await;
        assert!(matches!(same_number, Err(AppError::Conflict(_))));

        assert_eq!(store.list(0, 100).await.unwrap().len(), 1);
    }

    #[tokio::test]
    async fn stale_version_is_not_written() {
        let store = InMemoryAccountStore::new();
        let account = store.insert(new_account("u1", "ACC1")).await.unwrap();

        let updated = store
            .update_balance(account.id, 0, dec!(40.00))
            .await
            .unwrap()
            .unwrap();
        assert_eq!(updated.version, 1);
        assert!(updated.updated_at >= account.updated_at);

        let stale = store.update_balance(account.id, 0, dec!(0.00)).await.unwrap();
        assert!(stale.is_none());

        let current = store.find_by_id(account.id).await.unwrap().unwrap();
        assert_eq!(current.balance, dec!(40.00));
    }

    #[tokio::test]
    async fn list_paginates_in_creation_order() {
        let store = InMemoryAccountStore::new();
        for i in 0..5 {
            store
                .insert(new_account(&format!("u{i}"), &format!("ACC{i}")))
                .await
                .unwrap();
        }

        assert_eq!(store.list(0, 2).await.unwrap().len(), 2);
        assert_eq!(store.list(4, 10).await.unwrap().len(), 1);
        assert!(store.list(10, 10).await.unwrap().is_empty());
    }
}
