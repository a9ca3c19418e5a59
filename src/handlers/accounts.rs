//! Account management HTTP handlers.
//!
//! This module implements the account-related API endpoints:
//! - POST /api/v1/accounts - Create the account for a user
//! - GET /api/v1/accounts - List all accounts (admin)
//! - GET /api/v1/accounts/{id} - Get account by ID (admin)
//! - GET /api/v1/users/{user_id}/account - Get a user's account
//! - GET /api/v1/me/account - Get the caller's account

use crate::{
    error::AppError,
    middleware::gateway::GatewayIdentity,
    models::account::{AccountResponse, CreateAccountRequest, ListAccountsQuery},
    state::AppState,
};
use axum::{
    Extension, Json,
    extract::{Path, Query, State},
    http::StatusCode,
};
use uuid::Uuid;

/// Create a new account.
///
/// # Request Body
///
/// ```json
/// {
///   "user_id": "u1",
///   "initial_balance": "1000.00",  // optional
///   "currency": "USD"              // optional
/// }
/// ```
///
/// # Response
///
/// - **201 Created**: the new account
/// - **400**: invalid user id, currency or initial balance
/// - **409**: the user already has an account
pub async fn create_account(
    State(state): State<AppState>,
    Json(request): Json<CreateAccountRequest>,
) -> Result<(StatusCode, Json<AccountResponse>), AppError> {
    let account = state
        .accounts
        .create_account(
            &request.user_id,
            request.initial_balance,
            request.currency.as_deref(),
        )
        .await?;

    Ok((StatusCode::CREATED, Json(account.into())))
}

/// Get the account owned by `user_id`.
///
/// Returns 404 if the user has no account.
pub async fn get_user_account(
    State(state): State<AppState>,
    Path(user_id): Path<String>,
) -> Result<Json<AccountResponse>, AppError> {
    let account = state
        .accounts
        .get_account(&user_id)
        .await?
        .ok_or(AppError::AccountNotFound)?;

    Ok(Json(account.into()))
}

/// Get the account of the user the gateway authenticated.
///
/// Returns 401 without `X-User-Id`, 404 if that user has no account.
pub async fn get_my_account(
    State(state): State<AppState>,
    Extension(identity): Extension<GatewayIdentity>,
) -> Result<Json<AccountResponse>, AppError> {
    let user_id = identity.require_user_id()?;

    let account = state
        .accounts
        .get_account(user_id)
        .await?
        .ok_or(AppError::AccountNotFound)?;

    Ok(Json(account.into()))
}

/// Get an account by its ID (admin only).
pub async fn get_account(
    State(state): State<AppState>,
    Path(account_id): Path<Uuid>,
) -> Result<Json<AccountResponse>, AppError> {
    let account = state
        .accounts
        .get_account_by_id(account_id)
        .await?
        .ok_or(AppError::AccountNotFound)?;

    Ok(Json(account.into()))
}

/// List accounts, oldest first (admin only).
///
/// # Query Parameters
///
/// - `skip` - rows to skip, default 0
/// - `limit` - page size, default 100, at most 1000
pub async fn list_accounts(
    State(state): State<AppState>,
    Query(query): Query<ListAccountsQuery>,
) -> Result<Json<Vec<AccountResponse>>, AppError> {
    let accounts = state
        .accounts
        .list_accounts(query.skip, query.limit)
        .await?;

    Ok(Json(accounts.into_iter().map(Into::into).collect()))
}
