pub mod row;

pub use row::{Record, Row};
