//! tests/global_errors/413.rs
//! Ensures that a payload above MAX_REQUEST_BODY_SIZE (1 KiB in tests) triggers 413.

#[path = "../mod.rs"]
mod common;

use reqwest::StatusCode;
use serde_json::{json, Value};

#[tokio::test]
async fn returns_413_when_payload_exceeds_global_limit() {
    let app = common::spawn_app();

    let oversized_payload: Value = json!({
        "username": "x".repeat(4096),
        "email": "big@example.com",
        "senha": "secret",
    });

    let resp: reqwest::Response = reqwest::Client::new()
        .post(app.url("/auth/register"))
        .json(&oversized_payload)
        .send()
        .await
        .expect("Failed to send large request.");

    assert_eq!(resp.status(), StatusCode::PAYLOAD_TOO_LARGE);

    let json: Value = common::envelope(resp).await;
    assert_eq!(json["status"], "PAYLOAD_TOO_LARGE");
    assert_eq!(json["code"], 413);
}
