// Row schema: one validated record of the `data` table

use serde::{Deserialize, Serialize};
use serde_json::{Map, Number, Value};

use crate::errors::{DataError, DataResult};

/// A field-named record as it comes out of the store.
pub type Record = Map<String, Value>;

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Row {
    pub id: i64,
    pub first_name: String,
    pub last_name: String,
}

impl Row {
    /// Validates a raw record and builds a `Row` from it.
    ///
    /// `id` is coerced from integers, integral floats and numeric strings.
    /// The name fields must be strings.
    pub fn from_record(record: &Record) -> DataResult<Self> {
        Ok(Self {
            id: coerce_id(record.get("id"))?,
            first_name: require_str(record, "first_name")?,
            last_name: require_str(record, "last_name")?,
        })
    }

    /// Validates a whole result set, failing on the first bad record.
    pub fn from_records(records: Vec<Record>) -> DataResult<Vec<Self>> {
        records.iter().map(Self::from_record).collect()
    }
}

fn coerce_id(value: Option<&Value>) -> DataResult<i64> {
    match value {
        None => Err(DataError::validation("id", "is missing")),
        Some(Value::Number(n)) => number_to_i64(n)
            .ok_or_else(|| DataError::validation("id", format!("`{n}` is not a valid integer"))),
        Some(Value::String(s)) => s
            .trim()
            .parse::<i64>()
            .map_err(|_| DataError::validation("id", format!("`{s}` is not a valid integer"))),
        Some(other) => Err(DataError::validation("id", format!("expected an integer, got {}", type_name(other)))),
    }
}

fn number_to_i64(n: &Number) -> Option<i64> {
    if let Some(i) = n.as_i64() {
        return Some(i);
    }
    // u64 beyond i64::MAX falls through to None
    if n.is_u64() {
        return None;
    }
    let f: f64 = n.as_f64()?;
    if f.fract() == 0.0 && f >= i64::MIN as f64 && f < i64::MAX as f64 {
        Some(f as i64)
    } else {
        None
    }
}

fn require_str(record: &Record, field: &'static str) -> DataResult<String> {
    match record.get(field) {
        None => Err(DataError::validation(field, "is missing")),
        Some(Value::String(s)) => Ok(s.clone()),
        Some(other) => Err(DataError::validation(field, format!("expected a string, got {}", type_name(other)))),
    }
}

fn type_name(value: &Value) -> &'static str {
    match value {
        Value::Null => "null",
        Value::Bool(_) => "a boolean",
        Value::Number(_) => "a number",
        Value::String(_) => "a string",
        Value::Array(_) => "an array",
        Value::Object(_) => "an object",
    }
}
