//! tests/global_errors/404.rs
//! Ensures that hitting an unknown route returns HTTP 404.

use std::sync::Arc;

use reqwest::StatusCode;
use serde_json::Value;

use crate::common::{get, spawn_app, StaticFetcher};

#[tokio::test]
async fn returns_404_for_nonexistent_route() {
    let base_url: String = spawn_app(Arc::new(StaticFetcher::new(vec![]))).await;

    let (status, body) = get(&base_url, "/does-not-exist").await;

    assert_eq!(status, StatusCode::NOT_FOUND);

    let json: Value = serde_json::from_str(&body).unwrap();
    assert_eq!(json["status"], "NOT_FOUND");
    assert_eq!(json["code"], 404);
}
