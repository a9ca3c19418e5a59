//! Banking service
//!
//! Owns one ledger account per user and exposes balance checks, debits and
//! credits over HTTP. Balances never go negative, and concurrent writes to
//! the same account are serialized with versioned compare-and-swap updates.
//!
//! # Architecture
//!
//! - **Web Framework**: Axum
//! - **Database**: PostgreSQL with sqlx
//! - **Money**: `rust_decimal`, two fractional digits
//! - **Identity**: trusted `X-User-Id` / `X-User-Role` headers from the API gateway

pub mod config;
pub mod db;
pub mod error;
pub mod handlers;
pub mod middleware;
pub mod models;
pub mod routes;
pub mod services;
pub mod state;
pub mod store;

pub use error::AppError;
pub use routes::router;
pub use state::AppState;
