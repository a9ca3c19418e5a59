//! Account service - core business logic for the ledger.
//!
//! This service handles:
//! - Account creation with generated identifiers
//! - Balance checks, debits and credits
//! - Amount validation
//!
//! # Concurrency
//!
//! Every debit and credit runs read → check → compare-and-swap against the
//! account `version`. A writer that loses the race re-reads and re-checks,
//! so two debits can never both pass the sufficiency check on the same
//! balance. Accounts never contend with each other.

use std::sync::Arc;

use rand::{Rng, distr::Alphanumeric};
use rust_decimal::Decimal;
use tracing::{debug, info, instrument, warn};
use uuid::Uuid;

use crate::{
    config::{self, Config},
    error::AppError,
    models::{
        account::{Account, NewAccount},
        ledger::{BalanceCheck, MutationOutcome, Rejection},
    },
    store::AccountStore,
};

const ACCOUNT_NUMBER_PREFIX: &str = "ACC";
const ACCOUNT_NUMBER_SUFFIX_LEN: usize = 10;
const MONEY_SCALE: u32 = 2;
const MAX_PAGE_SIZE: i64 = 1000;

/// Largest single value that fits the NUMERIC(14,2) balance column.
fn max_amount() -> Decimal {
    Decimal::new(99_999_999_999_999, MONEY_SCALE)
}

/// Defaults applied when a request leaves a field out.
#[derive(Debug, Clone)]
pub struct AccountPolicy {
    pub default_currency: String,
    pub default_initial_balance: Decimal,
    /// Attempts per debit/credit before giving up with `Contention`
    pub max_update_attempts: u32,
}

impl Default for AccountPolicy {
    fn default() -> Self {
        Self {
            default_currency: config::default_currency(),
            default_initial_balance: config::default_initial_balance(),
            max_update_attempts: config::default_update_attempts(),
        }
    }
}

/// Fails when the configured defaults would be refused on every create.
impl TryFrom<&Config> for AccountPolicy {
    type Error = AppError;

    fn try_from(config: &Config) -> Result<Self, Self::Error> {
        let default_initial_balance = to_money(config.default_initial_balance)?;
        if default_initial_balance < Decimal::ZERO {
            return Err(AppError::InvalidRequest(
                "DEFAULT_INITIAL_BALANCE cannot be negative".to_string(),
            ));
        }

        Ok(Self {
            default_currency: normalize_currency(&config.default_currency)?,
            default_initial_balance,
            max_update_attempts: config.balance_update_max_attempts,
        })
    }
}

#[derive(Debug, Clone, Copy)]
enum Direction {
    Debit,
    Credit,
}

pub struct AccountService {
    store: Arc<dyn AccountStore>,
    policy: AccountPolicy,
}

impl AccountService {
    pub fn new(store: Arc<dyn AccountStore>, policy: AccountPolicy) -> Self {
        Self { store, policy }
    }

    /// Open an account for `user_id`.
    ///
    /// Missing `initial_balance` and `currency` fall back to the policy.
    ///
    /// # Errors
    ///
    /// - `InvalidRequest`: empty user id, malformed currency, negative or
    ///   over-precise initial balance
    /// - `Conflict`: the user already has an account
    #[instrument(skip(self))]
    pub async fn create_account(
        &self,
        user_id: &str,
        initial_balance: Option<Decimal>,
        currency: Option<&str>,
    ) -> Result<Account, AppError> {
        let user_id = normalize_user_id(user_id)?;

        let balance = to_money(initial_balance.unwrap_or(self.policy.default_initial_balance))?;
        if balance < Decimal::ZERO {
            return Err(AppError::InvalidRequest(
                "Initial balance cannot be negative".to_string(),
            ));
        }

        let currency = normalize_currency(currency.unwrap_or(&self.policy.default_currency))?;

        let account = self
            .store
            .insert(NewAccount {
                id: Uuid::new_v4(),
                user_id: user_id.to_string(),
                account_number: generate_account_number(),
                balance,
                currency,
                is_active: true,
            })
            .await?;

        info!(
            account_number = %account.account_number,
            user_id = %account.user_id,
            balance = %account.balance,
            "Created bank account"
        );

        Ok(account)
    }

    pub async fn get_account(&self, user_id: &str) -> Result<Option<Account>, AppError> {
        self.store.find_by_user_id(normalize_user_id(user_id)?).await
    }

    pub async fn get_account_by_id(&self, id: Uuid) -> Result<Option<Account>, AppError> {
        self.store.find_by_id(id).await
    }

    pub async fn list_accounts(&self, skip: i64, limit: i64) -> Result<Vec<Account>, AppError> {
        if skip < 0 || limit < 0 {
            return Err(AppError::InvalidRequest(
                "skip and limit must not be negative".to_string(),
            ));
        }
        self.store.list(skip, limit.min(MAX_PAGE_SIZE)).await
    }

    /// Read-only sufficiency check.
    ///
    /// Checks run in order existence → active → sufficiency and stop at the
    /// first failure.
    #[instrument(skip(self))]
    pub async fn check_balance(
        &self,
        user_id: &str,
        amount: Decimal,
    ) -> Result<BalanceCheck, AppError> {
        let user_id = normalize_user_id(user_id)?;
        let amount = to_positive_amount(amount)?;

        let rejection = match self.store.find_by_user_id(user_id).await? {
            None => Some(Rejection::AccountNotFound),
            Some(account) if !account.is_active => Some(Rejection::AccountInactive),
            Some(account) if account.balance < amount => Some(Rejection::InsufficientFunds {
                available: account.balance,
                required: amount,
            }),
            Some(_) => None,
        };

        Ok(BalanceCheck { rejection })
    }

    /// Take `amount` out of the user's account if it is there to take.
    pub async fn debit_account(
        &self,
        user_id: &str,
        amount: Decimal,
        currency: Option<&str>,
    ) -> Result<MutationOutcome, AppError> {
        self.apply(user_id, amount, currency, Direction::Debit)
            .await
    }

    /// Add `amount` to the user's account.
    pub async fn credit_account(
        &self,
        user_id: &str,
        amount: Decimal,
        currency: Option<&str>,
    ) -> Result<MutationOutcome, AppError> {
        self.apply(user_id, amount, currency, Direction::Credit)
            .await
    }

    pub async fn ping(&self) -> Result<(), AppError> {
        self.store.ping().await
    }

    #[instrument(skip(self))]
    async fn apply(
        &self,
        user_id: &str,
        amount: Decimal,
        currency: Option<&str>,
        direction: Direction,
    ) -> Result<MutationOutcome, AppError> {
        let user_id = normalize_user_id(user_id)?;
        let amount = to_positive_amount(amount)?;
        let max_attempts = self.policy.max_update_attempts.max(1);

        for attempt in 1..=max_attempts {
            let Some(account) = self.store.find_by_user_id(user_id).await? else {
                warn!("Account not found");
                return Ok(MutationOutcome::rejected(
                    Rejection::AccountNotFound,
                    Decimal::ZERO,
                ));
            };

            if let Some(requested) = currency {
                if !requested.trim().eq_ignore_ascii_case(&account.currency) {
                    warn!(
                        account_number = %account.account_number,
                        account_currency = %account.currency,
                        requested_currency = %requested,
                        "Request currency differs from account currency, ignoring"
                    );
                }
            }

            let new_balance = match next_balance(&account, amount, direction) {
                Ok(balance) => balance,
                Err(rejection) => {
                    warn!(
                        account_number = %account.account_number,
                        reason = rejection.code(),
                        "Balance update rejected"
                    );
                    return Ok(MutationOutcome::rejected(rejection, account.balance));
                }
            };

            if new_balance > max_amount() {
                return Err(AppError::InvalidRequest(format!(
                    "Resulting balance would exceed {}",
                    max_amount()
                )));
            }

            match self
                .store
                .update_balance(account.id, account.version, new_balance)
                .await?
            {
                Some(updated) => {
                    info!(
                        account_number = %updated.account_number,
                        amount = %amount,
                        new_balance = %updated.balance,
                        "Balance updated"
                    );
                    return Ok(MutationOutcome::applied(updated.balance));
                }
                None => {
                    debug!(attempt, "Version conflict, retrying");
                }
            }
        }

        warn!(max_attempts, "Gave up on contended balance update");
        Err(AppError::Contention)
    }
}

/// Compute the post-mutation balance, or say why it is not allowed.
///
/// Checks run in the order active → sufficiency.
fn next_balance(
    account: &Account,
    amount: Decimal,
    direction: Direction,
) -> Result<Decimal, Rejection> {
    if !account.is_active {
        return Err(Rejection::AccountInactive);
    }

    match direction {
        Direction::Debit if account.balance < amount => Err(Rejection::InsufficientFunds {
            available: account.balance,
            required: amount,
        }),
        Direction::Debit => Ok(account.balance - amount),
        Direction::Credit => Ok(account.balance + amount),
    }
}

/// Validate a monetary value and pin it to two fractional digits.
fn to_money(value: Decimal) -> Result<Decimal, AppError> {
    if value.abs() > max_amount() {
        return Err(AppError::InvalidRequest(format!(
            "Amounts must not exceed {}",
            max_amount()
        )));
    }
    if value.normalize().scale() > MONEY_SCALE {
        return Err(AppError::InvalidRequest(
            "Amounts must have at most 2 decimal places".to_string(),
        ));
    }
    let mut value = value;
    value.rescale(MONEY_SCALE);
    Ok(value)
}

fn to_positive_amount(value: Decimal) -> Result<Decimal, AppError> {
    if value <= Decimal::ZERO {
        return Err(AppError::InvalidRequest(
            "Amount must be positive".to_string(),
        ));
    }
    to_money(value)
}

/// Ids are matched without surrounding whitespace on every operation.
fn normalize_user_id(user_id: &str) -> Result<&str, AppError> {
    let user_id = user_id.trim();
    if user_id.is_empty() {
        return Err(AppError::InvalidRequest("user_id is required".to_string()));
    }
    Ok(user_id)
}

fn normalize_currency(code: &str) -> Result<String, AppError> {
    let code = code.trim();
    if code.len() != 3 || !code.chars().all(|c| c.is_ascii_alphabetic()) {
        return Err(AppError::InvalidRequest(format!(
            "Invalid currency code: {code}"
        )));
    }
    Ok(code.to_ascii_uppercase())
}

/// `ACC` followed by ten random upper-case alphanumerics.
pub fn generate_account_number() -> String {
    let suffix: String = rand::rng()
        .sample_iter(&Alphanumeric)
        .take(ACCOUNT_NUMBER_SUFFIX_LEN)
        .map(|b| char::from(b).to_ascii_uppercase())
        .collect();

    format!("{ACCOUNT_NUMBER_PREFIX}{suffix}")
}
