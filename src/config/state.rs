// Application state shared by all handlers

use std::sync::Arc;

use crate::config::environment::EnvironmentVariables;
use crate::database::RowFetcher;

/// Built once in `main` and handed to the router with `with_state`.
#[derive(Clone)]
pub struct AppState {
    pub environment: Arc<EnvironmentVariables>,
    pub fetcher: Arc<dyn RowFetcher>,
}

impl AppState {
    pub fn new(environment: EnvironmentVariables, fetcher: Arc<dyn RowFetcher>) -> Self {
        Self {
            environment: Arc::new(environment),
            fetcher,
        }
    }
}
