pub mod fetcher;

pub use crate::config::environment::MySqlSettings;
pub use fetcher::{MySqlFetcher, RowFetcher, SELECT_ALL};
