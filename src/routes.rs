//! Router assembly.

use axum::{
    Router, middleware as axum_middleware,
    routing::{get, post},
};
use tower_http::trace::TraceLayer;

use crate::{
    handlers,
    middleware::gateway::{gateway_identity, require_admin},
    state::AppState,
};

/// Build the HTTP router with all routes and middleware.
pub fn router(state: AppState) -> Router {
    let admin = || axum_middleware::from_fn(require_admin);

    Router::new()
        .route("/health", get(handlers::health::health_check))
        // Account management
        .route(
            "/api/v1/accounts",
            post(handlers::accounts::create_account)
                .merge(get(handlers::accounts::list_accounts).route_layer(admin())),
        )
        .route(
            "/api/v1/accounts/{id}",
            get(handlers::accounts::get_account).route_layer(admin()),
        )
        .route(
            "/api/v1/users/{user_id}/account",
            get(handlers::accounts::get_user_account),
        )
        .route("/api/v1/me/account", get(handlers::accounts::get_my_account))
        // Balance operations
        .route("/api/v1/accounts/debit", post(handlers::ledger::debit))
        .route("/api/v1/accounts/credit", post(handlers::ledger::credit))
        .route(
            "/api/v1/accounts/check-balance",
            post(handlers::ledger::check_balance),
        )
        .layer(axum_middleware::from_fn(gateway_identity))
        .layer(TraceLayer::new_for_http())
        .with_state(state)
}
