mod common;

use axum::http::StatusCode;
use common::{get, post_json, test_app};
use serde_json::json;

#[tokio::test(flavor = "multi_thread", worker_threads = 4)]
async fn test_concurrent_debits_over_http() {
    let (app, _) = test_app();
    post_json(
        &app,
        "/api/v1/accounts",
        json!({ "user_id": "u1", "initial_balance": "100.00" }),
    )
    .await;

    let debit = || {
        let app = app.clone();
        tokio::spawn(async move {
            post_json(
                &app,
                "/api/v1/accounts/debit",
                json!({ "user_id": "u1", "amount": "60.00" }),
            )
            .await
        })
    };

    let (first, second) = tokio::join!(debit(), debit());
    let outcomes = [first.unwrap().1, second.unwrap().1];

    let succeeded = outcomes.iter().filter(|o| o["success"] == true).count();
    assert_eq!(succeeded, 1);
    assert!(
        outcomes
            .iter()
            .any(|o| o["error_code"] == "insufficient_funds")
    );

    let (status, account) = get(&app, "/api/v1/users/u1/account", &[]).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(account["balance"], "40.00");
}

#[tokio::test(flavor = "multi_thread", worker_threads = 4)]
async fn test_parallel_accounts_do_not_interfere() {
    let (app, _) = test_app();
    for i in 0..8 {
        post_json(
            &app,
            "/api/v1/accounts",
            json!({ "user_id": format!("u{i}"), "initial_balance": "10.00" }),
        )
        .await;
    }

    let mut tasks = Vec::new();
    for i in 0..8 {
        for _ in 0..5 {
            let app = app.clone();
            tasks.push(tokio::spawn(async move {
                post_json(
                    &app,
                    "/api/v1/accounts/debit",
                    json!({ "user_id": format!("u{i}"), "amount": "1.00" }),
                )
                .await
            }));
        }
    }
    for task in tasks {
        let (status, body) = task.await.unwrap();
        assert_eq!(status, StatusCode::OK);
        assert_eq!(body["success"], true);
    }

    for i in 0..8 {
        let (_, account) = get(&app, &format!("/api/v1/users/u{i}/account"), &[]).await;
        assert_eq!(account["balance"], "5.00");
    }
}
