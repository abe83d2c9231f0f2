// Library root for the data loader service

pub mod api;
pub mod config;
pub mod core;
pub mod database;
pub mod errors;
pub mod models;
pub mod utils;

pub use crate::config::environment::EnvironmentVariables;
pub use crate::config::state::AppState;
pub use crate::database::{MySqlFetcher, RowFetcher};
pub use crate::errors::{DataError, ErrorKind};
pub use crate::models::Row;
