//! HTTP middleware components.

/// Trusted identity headers forwarded by the API gateway
pub mod gateway;
