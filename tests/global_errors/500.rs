//! tests/global_errors/500.rs
//! Ensures that a database failure maps to a 500 without leaking details.

#[path = "../mod.rs"]
mod common;

use reqwest::StatusCode;
use serde_json::Value;

#[tokio::test]
async fn returns_500_when_database_is_unreachable() {
    let app = common::spawn_app();

    let resp: reqwest::Response = reqwest::Client::new()
        .get(app.url("/clients"))
        .send()
        .await
        .expect("Failed to make request.");

    assert_eq!(resp.status(), StatusCode::INTERNAL_SERVER_ERROR);

    let json: Value = common::envelope(resp).await;
    assert_eq!(json["status"], "INTERNAL_SERVER_ERROR");
    assert_eq!(json["code"], 500);
    assert_eq!(json["data"]["error"], "database_error");
    assert_eq!(common::messages(&json), "Internal server error");
}
