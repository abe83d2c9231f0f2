//! tests/global_errors/405.rs
//! The data endpoint is read-only: other methods are rejected.

use std::sync::Arc;

use reqwest::StatusCode;
use serde_json::Value;

use crate::common::{spawn_app, StaticFetcher};

#[tokio::test]
async fn rejects_post_to_data() {
    let fetcher: Arc<StaticFetcher> = Arc::new(StaticFetcher::new(vec![]));
    let base_url: String = spawn_app(fetcher.clone()).await;

    let resp: reqwest::Response = reqwest::Client::new()
        .post(format!("{}/data", base_url))
        .send()
        .await
        .expect("Failed to execute request.");

    assert_eq!(resp.status(), StatusCode::METHOD_NOT_ALLOWED);

    let json: Value = serde_json::from_str(&resp.text().await.unwrap()).unwrap();
    assert_eq!(json["code"], 405);
    assert_eq!(fetcher.calls(), 0);
}
