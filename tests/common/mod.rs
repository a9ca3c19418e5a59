// Helpers are shared by several test binaries, not all of which use every one.
#![allow(dead_code)]

use std::sync::Arc;

use axum::{
    Router,
    body::{Body, to_bytes},
    http::{Method, Request, StatusCode, header},
};
use banking_service::{
    AppState,
    services::{AccountPolicy, AccountService},
    store::InMemoryAccountStore,
};
use serde_json::Value;
use tower::ServiceExt;

/// Router backed by a fresh in-memory store.
pub fn test_app() -> (Router, Arc<InMemoryAccountStore>) {
    let store = Arc::new(InMemoryAccountStore::new());
    let accounts = AccountService::new(store.clone(), AccountPolicy::default());
    let app = banking_service::router(AppState::new(accounts, "banking-service"));
    (app, store)
}

pub async fn send(
    app: &Router,
    method: Method,
    uri: &str,
    body: Option<Value>,
    headers: &[(&str, &str)],
) -> (StatusCode, Value) {
    let mut builder = Request::builder().method(method).uri(uri);
    for (name, value) in headers {
        builder = builder.header(*name, *value);
    }

    let request = match body {
        Some(json) => builder
            .header(header::CONTENT_TYPE, "application/json")
            .body(Body::from(json.to_string()))
            .unwrap(),
        None => builder.body(Body::empty()).unwrap(),
    };

    let response = app.clone().oneshot(request).await.unwrap();
    let status = response.status();
    let bytes = to_bytes(response.into_body(), usize::MAX).await.unwrap();
    let value = if bytes.is_empty() {
        Value::Null
    } else {
        serde_json::from_slice(&bytes).unwrap_or(Value::Null)
    };

    (status, value)
}

pub async fn post_json(app: &Router, uri: &str, body: Value) -> (StatusCode, Value) {
    send(app, Method::POST, uri, Some(body), &[]).await
}

pub async fn get(app: &Router, uri: &str, headers: &[(&str, &str)]) -> (StatusCode, Value) {
    send(app, Method::GET, uri, None, headers).await
}
