//! tests/common/mod.rs
//! Shared helpers: fake fetchers and an app spawned on an ephemeral port.
#![allow(dead_code)]

use std::collections::HashMap;
use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::Arc;

use async_trait::async_trait;
use axum::{serve, Router};
use serde_json::Value;
use tokio::net::TcpListener;

use data_loader::config::{environment::EnvironmentVariables, state::AppState};
use data_loader::core::server::create_app;
use data_loader::database::RowFetcher;
use data_loader::errors::{DataError, DataResult};
use data_loader::models::Record;

/// Serves a fixed set of records and counts how often it was asked.
pub struct StaticFetcher {
    records: Vec<Record>,
    calls: AtomicUsize,
}

impl StaticFetcher {
    pub fn new(records: Vec<Value>) -> Self {
        Self {
            records: records.into_iter().map(into_record).collect(),
            calls: AtomicUsize::new(0),
        }
    }

    pub fn calls(&self) -> usize {
        self.calls.load(Ordering::SeqCst)
    }
}

#[async_trait]
impl RowFetcher for StaticFetcher {
    async fn get_all(&self) -> DataResult<Vec<Record>> {
        self.calls.fetch_add(1, Ordering::SeqCst);
        Ok(self.records.clone())
    }
}

/// Fails every call with the error built by `make`.
pub struct FailingFetcher {
    make: fn() -> DataError,
}

impl FailingFetcher {
    pub fn new(make: fn() -> DataError) -> Self {
        Self { make }
    }
}

#[async_trait]
impl RowFetcher for FailingFetcher {
    async fn get_all(&self) -> DataResult<Vec<Record>> {
        Err((self.make)())
    }
}

pub fn into_record(value: Value) -> Record {
    match value {
        Value::Object(map) => map,
        other => panic!("expected a JSON object, got {other}"),
    }
}

pub fn test_environment() -> EnvironmentVariables {
    EnvironmentVariables::from_vars(&HashMap::new()).expect("default environment")
}

/// Serves the app with `fetcher` injected on an OS-assigned port.
/// Returns the base URL, e.g. "http://127.0.0.1:54321".
pub async fn spawn_app(fetcher: Arc<dyn RowFetcher>) -> String {
    let app: Router = create_app(AppState::new(test_environment(), fetcher));

    let listener: TcpListener = TcpListener::bind("127.0.0.1:0")
        .await
        .expect("ephemeral port");
    let base_url: String = format!("http://{}", listener.local_addr().expect("bound address"));

    tokio::spawn(async move {
        if let Err(e) = serve(listener, app).await {
            panic!("test server stopped: {e}");
        }
    });

    base_url
}

/// GETs `path` and returns the status and raw body.
pub async fn get(base_url: &str, path: &str) -> (reqwest::StatusCode, String) {
    let resp: reqwest::Response = reqwest::Client::new()
        .get(format!("{}{}", base_url, path))
        .send()
        .await
        .expect("Failed to execute request.");

    let status: reqwest::StatusCode = resp.status();
    (status, resp.text().await.unwrap())
}
