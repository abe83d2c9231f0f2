// Data API route definitions

use axum::{
    routing::get,
    Router,
};

use crate::config::state::AppState;
use super::handler;

/// Creates router with the read-only data endpoint
pub fn data_routes() -> Router<AppState> {
    Router::new()
        .route("/data", get(handler::get_data))
}
