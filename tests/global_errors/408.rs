//! tests/global_errors/408.rs
//! Ensures that requests outliving the global timeout result in a 408.

#[path = "../mod.rs"]
mod common;

use reqwest::StatusCode;
use serde_json::Value;
use std::time::Duration;
use tokio::time::timeout;

#[tokio::test]
async fn returns_408_when_request_times_out() {
    // The pool keeps retrying the closed port for longer than the request may take
    let app = common::spawn_app_with(&[
        ("DEFAULT_TIMEOUT_SECONDS", "1"),
        ("DB_ACQUIRE_TIMEOUT_SECONDS", "30"),
    ]);

    let resp_result: Result<Result<reqwest::Response, reqwest::Error>, tokio::time::error::Elapsed> = timeout(
        Duration::from_secs(5), // client-side timeout duration
        async {
            reqwest::Client::new()
                .get(app.url("/clients"))
                .send()
                .await
        }
    )
    .await;

    assert!(resp_result.is_ok(), "Client timed out waiting for server.");

    let resp: reqwest::Response = resp_result.unwrap().expect("Request failed unexpectedly.");
    assert_eq!(resp.status(), StatusCode::REQUEST_TIMEOUT);

    let json: Value = common::envelope(resp).await;
    assert_eq!(json["status"], "REQUEST_TIMEOUT");
    assert_eq!(json["code"], 408);
    assert_eq!(json["data"]["error"], "request_timeout");
}
