// Handler for the read-only data endpoint

use axum::{extract::State, Json};
use tracing::{info, instrument};

use crate::config::state::AppState;
use crate::errors::DataResult;
use crate::models::{Record, Row};

/// Returns every row of the `data` table as a bare JSON array.
/// Any fetch or validation failure becomes an opaque 500.
#[instrument(skip(state))]
pub async fn get_data(State(state): State<AppState>) -> DataResult<Json<Vec<Row>>> {
    let records: Vec<Record> = state.fetcher.get_all().await?;
    let rows: Vec<Row> = Row::from_records(records)?;

    info!("Serving {} rows", rows.len());
    Ok(Json(rows))
}
