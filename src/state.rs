//! Shared state handed to every handler.

use std::sync::Arc;

use crate::services::AccountService;

#[derive(Clone)]
pub struct AppState {
    pub accounts: Arc<AccountService>,

    /// Reported by the health endpoint
    pub service_name: Arc<str>,
}

impl AppState {
    pub fn new(accounts: AccountService, service_name: impl Into<Arc<str>>) -> Self {
        Self {
            accounts: Arc::new(accounts),
            service_name: service_name.into(),
        }
    }
}
