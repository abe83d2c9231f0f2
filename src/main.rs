// Start of file: src/main.rs

use std::sync::Arc;

use axum::{Router, serve};
use tokio::net::TcpListener;

use data_loader::config::{environment::EnvironmentVariables, state::AppState};
use data_loader::core::{logging::init_tracing, server};
use data_loader::database::{MySqlFetcher, RowFetcher};

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    init_tracing();

    let environment: EnvironmentVariables = EnvironmentVariables::load()?;

    // * One fetcher for the whole process; it opens its own connection per request
    let fetcher: Arc<dyn RowFetcher> = Arc::new(MySqlFetcher::new(environment.mysql.clone()));
    let state: AppState = AppState::new(environment, fetcher);

    let listener: TcpListener = server::setup_listener(&state.environment).await?;
    let app: Router = server::create_app(state);

    tracing::info!("Server listening on: {}", listener.local_addr()?);

    serve(listener, app)
        .with_graceful_shutdown(server::shutdown_signal())
        .await?;

    Ok(())
}

// End of file: src/main.rs
