// Application server configuration and setup

use std::time::Duration;
use axum::{
    Router,
    http::StatusCode,
    middleware::from_fn,
    extract::DefaultBodyLimit,
    error_handling::HandleErrorLayer,
};
use tower::{ServiceBuilder, timeout::TimeoutLayer};
use tokio::{signal, net::TcpListener};
use listenfd::ListenFd;
use anyhow::Result;

use crate::api::data::data_routes;
use crate::config::{environment::EnvironmentVariables, state::AppState};
use crate::utils::{
    error_handler::handle_global_error,
    response_handler::error_response_wrapper,
};

/// Creates and configures the application router with all middleware layers
pub fn create_app(state: AppState) -> Router {
    let env: &EnvironmentVariables = &state.environment;
    let timeout: Duration = Duration::from_secs(env.default_timeout_seconds);
    let max_body: usize = env.max_request_body_size;

    Router::new()
        .merge(data_routes())
        .fallback(fallback_handler)
        .layer(
            ServiceBuilder::new()
                .layer(from_fn(error_response_wrapper))
                .layer(HandleErrorLayer::new(handle_global_error))
                .layer(TimeoutLayer::new(timeout))
                .layer(DefaultBodyLimit::max(max_body))
        )
        .with_state(state)
}

async fn fallback_handler() -> StatusCode {
    StatusCode::NOT_FOUND
}

/// Sets up the TCP listener from environment or binds to new address
pub async fn setup_listener(env: &EnvironmentVariables) -> Result<TcpListener> {
    let mut listenfd: ListenFd = ListenFd::from_env();

    let listener: TcpListener = match listenfd.take_tcp_listener(0)? {
        Some(std_listener) => {
            std_listener.set_nonblocking(true)?;
            TcpListener::from_std(std_listener)?
        }
        None => {
            let addr: String = format!("{}:{}", env.host, env.port);
            TcpListener::bind(&addr).await?
        }
    };

    Ok(listener)
}

/// Handles graceful shutdown signals (Ctrl+C and TERM)
pub async fn shutdown_signal() {
    let ctrl_c = async {
        if let Err(e) = signal::ctrl_c().await {
            tracing::error!("Failed to install Ctrl+C handler: {}", e);
            std::future::pending::<()>().await;
        }
    };

    #[cfg(unix)]
    let terminate = async {
        match signal::unix::signal(signal::unix::SignalKind::terminate()) {
            Ok(mut sig) => {
                sig.recv().await;
            }
            Err(e) => {
                tracing::error!("Failed to install TERM handler: {}", e);
                std::future::pending::<()>().await;
            }
        }
    };

    #[cfg(not(unix))]
    let terminate = std::future::pending::<()>();

    tokio::select! {
        _ = ctrl_c => tracing::info!("Shutting down via Ctrl+C"),
        _ = terminate => tracing::info!("Shutting down via TERM signal"),
    }
}
