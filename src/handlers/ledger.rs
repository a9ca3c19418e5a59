//! Balance operation HTTP handlers.
//!
//! - POST /api/v1/accounts/debit - Remove money from a user's account
//! - POST /api/v1/accounts/credit - Add money to a user's account
//! - POST /api/v1/accounts/check-balance - Ask whether a debit would pass
//!
//! Refused operations still answer 200; the body says why via `message`
//! and `error_code`. Only malformed requests and infrastructure failures
//! use error statuses.

use crate::{
    error::AppError,
    models::ledger::{
        BalanceCheckRequest, BalanceCheckResponse, CreditRequest, DebitRequest,
        TransactionResponse,
    },
    state::AppState,
};
use axum::{Json, extract::State};

/// Debit a user's account.
///
/// # Request Body
///
/// ```json
/// { "user_id": "u1", "amount": "300.00", "currency": "USD" }
/// ```
///
/// # Response
///
/// ```json
/// { "success": true, "new_balance": "700.00", "message": "Transaction successful", "error_code": null }
/// ```
pub async fn debit(
    State(state): State<AppState>,
    Json(request): Json<DebitRequest>,
) -> Result<Json<TransactionResponse>, AppError> {
    let outcome = state
        .accounts
        .debit_account(&request.user_id, request.amount, request.currency.as_deref())
        .await?;

    Ok(Json(outcome.into()))
}

/// Credit a user's account.
pub async fn credit(
    State(state): State<AppState>,
    Json(request): Json<CreditRequest>,
) -> Result<Json<TransactionResponse>, AppError> {
    let outcome = state
        .accounts
        .credit_account(&request.user_id, request.amount, request.currency.as_deref())
        .await?;

    Ok(Json(outcome.into()))
}

/// Check whether a user's balance covers `amount`.
///
/// ```json
/// { "sufficient": false, "reason": "Account is inactive", "error_code": "account_inactive" }
/// ```
pub async fn check_balance(
    State(state): State<AppState>,
    Json(request): Json<BalanceCheckRequest>,
) -> Result<Json<BalanceCheckResponse>, AppError> {
    let check = state
        .accounts
        .check_balance(&request.user_id, request.amount)
        .await?;

    Ok(Json(check.into()))
}
