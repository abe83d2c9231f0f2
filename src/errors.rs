// Error taxonomy for fetching and validating rows

use axum::{
    http::StatusCode,
    response::{IntoResponse, Response},
};
use thiserror::Error;
use tracing::error;

pub type DataResult<T> = Result<T, DataError>;

/// Coarse classification of a [`DataError`], handy for assertions and logs.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ErrorKind {
    Validation,
    Connection,
    Query,
}

#[derive(Error, Debug)]
pub enum DataError {
    /// A record from the store does not match the row schema.
    #[error("invalid record: field `{field}` {reason}")]
    Validation { field: &'static str, reason: String },

    /// The store could not be reached or refused the credentials.
    #[error("connection error: {0}")]
    Connection(String),

    /// The fixed statement failed to execute.
    #[error("query error: {0}")]
    Query(String),
}

impl DataError {
    pub fn validation(field: &'static str, reason: impl Into<String>) -> Self {
        Self::Validation { field, reason: reason.into() }
    }

    pub fn kind(&self) -> ErrorKind {
        match self {
            DataError::Validation { .. } => ErrorKind::Validation,
            DataError::Connection(_) => ErrorKind::Connection,
            DataError::Query(_) => ErrorKind::Query,
        }
    }
}

// * Every failure is an opaque 500; the detail only goes to the log.
// * The error envelope itself is added by `error_response_wrapper`.
impl IntoResponse for DataError {
    fn into_response(self) -> Response {
        error!(kind = ?self.kind(), "Request failed: {}", self);
        StatusCode::INTERNAL_SERVER_ERROR.into_response()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn kind_matches_variant() {
        assert_eq!(DataError::validation("id", "is missing").kind(), ErrorKind::Validation);
        assert_eq!(DataError::Connection("refused".into()).kind(), ErrorKind::Connection);
        assert_eq!(DataError::Query("no such table".into()).kind(), ErrorKind::Query);
    }

    #[test]
    fn validation_message_names_the_field() {
        let err: DataError = DataError::validation("first_name", "is missing");
        assert_eq!(err.to_string(), "invalid record: field `first_name` is missing");
    }

    #[test]
    fn every_error_maps_to_an_empty_500() {
        let response: Response = DataError::Query("Table 'db.data' doesn't exist".into()).into_response();
        assert_eq!(response.status(), StatusCode::INTERNAL_SERVER_ERROR);
    }
}
