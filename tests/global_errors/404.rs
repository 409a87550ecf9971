//! tests/global_errors/404.rs
//! Ensures that hitting an unknown route returns HTTP 404.

#[path = "../mod.rs"]
mod common;

use reqwest::StatusCode;
use serde_json::Value;

#[tokio::test]
async fn returns_404_for_nonexistent_route() {
    let app = common::spawn_app();

    let resp: reqwest::Response = reqwest::Client::new()
        .get(app.url("/does-not-exist"))
        .send()
        .await
        .expect("Failed to execute request.");

    assert_eq!(resp.status(), StatusCode::NOT_FOUND);

    let json: Value = common::envelope(resp).await;
    assert_eq!(json["status"], "NOT_FOUND");
    assert_eq!(json["code"], 404);
    assert_eq!(json["data"]["error"], "route_not_found");
    assert!(json["date"].is_string());
}

#[tokio::test]
async fn unknown_routes_are_not_guarded() {
    let app = common::spawn_app();

    // No token: still a 404, the auth layer only wraps matched routes
    let resp: reqwest::Response = reqwest::Client::new()
        .delete(app.url("/produtos/1/imagens"))
        .send()
        .await
        .expect("Failed to execute request.");

    assert_eq!(resp.status(), StatusCode::NOT_FOUND);
}
