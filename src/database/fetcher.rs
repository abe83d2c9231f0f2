use std::time::Duration;

use async_trait::async_trait;
use serde_json::{Number, Value};
use sqlx::mysql::{MySqlConnectOptions, MySqlConnection, MySqlRow};
use sqlx::{Column, ConnectOptions, Connection, Row, TypeInfo};
use tracing::{debug, info, instrument, warn};

use crate::config::environment::MySqlSettings;
use crate::errors::{DataError, DataResult};
use crate::models::Record;

/// The one statement this service ever runs.
pub const SELECT_ALL: &str = "SELECT id, first_name, last_name FROM data;";

/// Source of raw records for the `/data` route.
#[async_trait]
pub trait RowFetcher: Send + Sync {
    /// Returns every record of the backing table, in store order.
    async fn get_all(&self) -> DataResult<Vec<Record>>;
}

/// Fetches rows from MySQL with a fresh connection per call.
/// No pool: the connection is opened, used once and closed.
#[derive(Debug, Clone)]
pub struct MySqlFetcher {
    settings: MySqlSettings,
}

impl MySqlFetcher {
    pub fn new(settings: MySqlSettings) -> Self {
        Self { settings }
    }

    async fn connect(&self) -> DataResult<MySqlConnection> {
        let options: MySqlConnectOptions = connect_options(&self.settings)?;

        let Some(limit) = connect_deadline(&self.settings) else {
            return options.connect().await.map_err(connection_failure);
        };

        match tokio::time::timeout(limit, options.connect()).await {
            Ok(result) => result.map_err(connection_failure),
            Err(_) => Err(DataError::Connection(format!(
                "timed out after {}s connecting to MySQL",
                limit.as_secs()
            ))),
        }
    }
}

#[async_trait]
impl RowFetcher for MySqlFetcher {
    #[instrument(skip(self))]
    async fn get_all(&self) -> DataResult<Vec<Record>> {
        let mut conn: MySqlConnection = self.connect().await?;
        debug!(host = ?self.settings.host, database = ?self.settings.database, "Connected to MySQL");

        // * Only the connection is closed explicitly; the result set is fully
        // * drained by fetch_all before we get here.
        let result: DataResult<Vec<MySqlRow>> = sqlx::query(SELECT_ALL)
            .fetch_all(&mut conn)
            .await
            .map_err(query_failure);

        // ! Close on every path, success or failure
        if let Err(e) = conn.close().await {
            warn!("Failed to close MySQL connection cleanly: {}", e);
        }

        let rows: Vec<MySqlRow> = result?;
        info!("Fetched {} rows", rows.len());

        rows.iter().map(row_to_record).collect()
    }
}

/// Connect phase bound; `0` disables it.
fn connect_deadline(settings: &MySqlSettings) -> Option<Duration> {
    match settings.connect_timeout_seconds {
        0 => None,
        secs => Some(Duration::from_secs(secs)),
    }
}

fn connection_failure(err: sqlx::Error) -> DataError {
    DataError::Connection(err.to_string())
}

/// Anything that goes wrong once connected (missing table, bad column,
/// dropped socket mid-query) is a query failure.
fn query_failure(err: sqlx::Error) -> DataError {
    DataError::Query(err.to_string())
}

/// Builds connect options, surfacing missing or malformed settings as
/// connection errors.
pub fn connect_options(settings: &MySqlSettings) -> DataResult<MySqlConnectOptions> {
    let require = |value: &Option<String>, name: &str| -> DataResult<String> {
        value
            .clone()
            .ok_or_else(|| DataError::Connection(format!("{name} is not set")))
    };

    let port: u16 = settings
        .port
        .trim()
        .parse()
        .map_err(|_| DataError::Connection(format!("invalid MySQL port `{}`", settings.port)))?;

    Ok(MySqlConnectOptions::new()
        .host(&require(&settings.host, "MYSQL_HOST")?)
        .port(port)
        .username(&require(&settings.user, "MYSQL_USER")?)
        .password(&require(&settings.password, "MYSQL_PASSWORD")?)
        .database(&require(&settings.database, "MYSQL_DATABASE")?))
}

/// Turns one result row into a column-name keyed record.
fn row_to_record(row: &MySqlRow) -> DataResult<Record> {
    row.columns()
        .iter()
        .map(|column| -> DataResult<(String, Value)> {
            let value: Value = column_value(row, column.ordinal())
                .ok_or_else(|| undecodable(column.name(), column.type_info().name()))?;
            Ok((column.name().to_owned(), value))
        })
        .collect()
}

// * Try the decodings the `data` table can plausibly hold; sqlx rejects
// * incompatible column types, so the first match wins. Binary columns are
// * accepted when they hold UTF-8 text.
fn column_value(row: &MySqlRow, index: usize) -> Option<Value> {
    if let Ok(v) = row.try_get::<Option<i64>, _>(index) {
        return Some(v.map(Value::from).unwrap_or(Value::Null));
    }
    if let Ok(v) = row.try_get::<Option<u64>, _>(index) {
        return Some(v.map(Value::from).unwrap_or(Value::Null));
    }
    if let Ok(v) = row.try_get::<Option<String>, _>(index) {
        return Some(v.map(Value::String).unwrap_or(Value::Null));
    }
    if let Ok(v) = row.try_get::<Option<Vec<u8>>, _>(index) {
        return match v {
            Some(bytes) => utf8_value(bytes),
            None => Some(Value::Null),
        };
    }
    if let Ok(v) = row.try_get::<Option<f64>, _>(index) {
        return Some(v.and_then(Number::from_f64).map(Value::Number).unwrap_or(Value::Null));
    }
    None
}

fn utf8_value(bytes: Vec<u8>) -> Option<Value> {
    String::from_utf8(bytes).ok().map(Value::String)
}

/// A column no supported decoding accepts, e.g. DECIMAL or non-UTF-8 bytes.
fn undecodable(column: &str, sql_type: &str) -> DataError {
    let field: &'static str = match column {
        "id" => "id",
        "first_name" => "first_name",
        "last_name" => "last_name",
        _ => "column",
    };
    DataError::validation(field, format!("`{column}` has SQL type {sql_type}, which cannot be decoded"))
}
