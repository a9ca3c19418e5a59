//! Balance operation models.
//!
//! Debit, credit and balance checks report business-rule failures as data,
//! not as errors: a [`Rejection`] carries a stable machine code plus the
//! human-readable message clients have historically parsed.

use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

/// Why a balance operation was refused.
///
/// The `Display` text is part of the public contract and must not change.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum Rejection {
    #[error("Account not found")]
    AccountNotFound,

    #[error("Account is inactive")]
    AccountInactive,

    #[error("Insufficient balance. Available: {available}, Required: {required}")]
    InsufficientFunds { available: Decimal, required: Decimal },
}

impl Rejection {
    /// Stable code for clients that branch on the outcome.
    pub fn code(&self) -> &'static str {
        match self {
            Rejection::AccountNotFound => "account_not_found",
            Rejection::AccountInactive => "account_inactive",
            Rejection::InsufficientFunds { .. } => "insufficient_funds",
        }
    }
}

/// Result of a debit or credit.
///
/// `new_balance` is the persisted balance after a successful mutation, the
/// untouched balance after a rejection, or zero when the account is missing.
#[derive(Debug, Clone, PartialEq)]
pub struct MutationOutcome {
    pub new_balance: Decimal,
    pub rejection: Option<Rejection>,
}

impl MutationOutcome {
    pub const SUCCESS_MESSAGE: &'static str = "Transaction successful";

    pub fn applied(new_balance: Decimal) -> Self {
        Self {
            new_balance,
            rejection: None,
        }
    }

    pub fn rejected(rejection: Rejection, balance: Decimal) -> Self {
        Self {
            new_balance: balance,
            rejection: Some(rejection),
        }
    }

    pub fn success(&self) -> bool {
        self.rejection.is_none()
    }

    pub fn message(&self) -> String {
        match &self.rejection {
            Some(rejection) => rejection.to_string(),
            None => Self::SUCCESS_MESSAGE.to_string(),
        }
    }
}

/// Result of a read-only sufficiency check.
#[derive(Debug, Clone, PartialEq)]
pub struct BalanceCheck {
    pub rejection: Option<Rejection>,
}

impl BalanceCheck {
    pub const SUFFICIENT_MESSAGE: &'static str = "Sufficient balance";

    pub fn sufficient(&self) -> bool {
        self.rejection.is_none()
    }

    pub fn reason(&self) -> String {
        match &self.rejection {
            Some(rejection) => rejection.to_string(),
            None => Self::SUFFICIENT_MESSAGE.to_string(),
        }
    }
}

/// Request to debit (remove money from) a user's account.
///
/// # JSON Example
///
/// ```json
/// {
///   "user_id": "u1",
///   "amount": "300.00",
///   "currency": "USD"
/// }
/// ```
#[derive(Debug, Deserialize)]
pub struct DebitRequest {
    pub user_id: String,
    pub amount: Decimal,

    /// Accepted for compatibility; amounts are always in the account currency
    #[serde(default)]
    pub currency: Option<String>,
}

/// Request to credit (add money to) a user's account.
///
/// Same shape as [`DebitRequest`].
#[derive(Debug, Deserialize)]
pub struct CreditRequest {
    pub user_id: String,
    pub amount: Decimal,

    #[serde(default)]
    pub currency: Option<String>,
}

/// Request to check whether a user could afford `amount`.
#[derive(Debug, Deserialize)]
pub struct BalanceCheckRequest {
    pub user_id: String,
    pub amount: Decimal,
}

/// Response for debit and credit.
///
/// ```json
/// {
///   "success": false,
///   "new_balance": "700.00",
///   "message": "Insufficient balance. Available: 700.00, Required: 800.00",
///   "error_code": "insufficient_funds"
/// }
/// ```
#[derive(Debug, Serialize)]
pub struct TransactionResponse {
    pub success: bool,
    pub new_balance: Decimal,
    pub message: String,
    pub error_code: Option<&'static str>,
}

impl From<MutationOutcome> for TransactionResponse {
    fn from(outcome: MutationOutcome) -> Self {
        Self {
            success: outcome.success(),
            message: outcome.message(),
            error_code: outcome.rejection.as_ref().map(Rejection::code),
            new_balance: outcome.new_balance,
        }
    }
}

/// Response for a balance check.
#[derive(Debug, Serialize)]
pub struct BalanceCheckResponse {
    pub sufficient: bool,
    pub reason: String,
    pub error_code: Option<&'static str>,
}

impl From<BalanceCheck> for BalanceCheckResponse {
    fn from(check: BalanceCheck) -> Self {
        Self {
            sufficient: check.sufficient(),
            reason: check.reason(),
            error_code: check.rejection.as_ref().map(Rejection::code),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rust_decimal_macros::dec;

    #[test]
    fn insufficient_funds_message_keeps_two_decimals() {
        let rejection = Rejection::InsufficientFunds {
            available: dec!(700.00),
            required: dec!(800.00),
        };

        assert_eq!(
            rejection.to_string(),
            "Insufficient balance. Available: 700.00, Required: 800.00"
        );
        assert_eq!(rejection.code(), "insufficient_funds");
    }

    #[test]
    fn response_carries_code_only_on_rejection() {
        let ok: TransactionResponse = MutationOutcome::applied(dec!(10.00)).into();
        assert!(ok.success);
        assert_eq!(ok.message, "Transaction successful");
        assert_eq!(ok.error_code, None);

        let missing: TransactionResponse =
            MutationOutcome::rejected(Rejection::AccountNotFound, Decimal::ZERO).into();
        assert!(!missing.success);
        assert_eq!(missing.message, "Account not found");
        assert_eq!(missing.error_code, Some("account_not_found"));
        assert_eq!(missing.new_balance, Decimal::ZERO);
    }
}
