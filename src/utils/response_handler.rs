// Uniform JSON envelope for failed responses.
// Successful responses (the `/data` array) pass through untouched.

use axum::{
    body::Body,
    http::{header::CONTENT_TYPE, HeaderValue, Request, Response, StatusCode, response::Parts},
    middleware::Next,
};
use chrono::Utc;
use serde::{Deserialize, Serialize};
use std::convert::Infallible;
use tracing::{error, warn};

/// JSON body returned for every non-2xx response
#[derive(Debug, Serialize, Deserialize)]
pub struct ErrorFormat {
    pub status: String,        // HTTP status text (e.g. "INTERNAL_SERVER_ERROR")
    pub code: u16,             // HTTP status code
    pub messages: Vec<String>, // Informational messages
    pub date: String,          // ISO timestamp
}

impl ErrorFormat {
    pub fn for_status(status: StatusCode) -> Self {
        let reason: &str = status.canonical_reason().unwrap_or("UNKNOWN STATUS");

        Self {
            status: reason.to_uppercase().replace(' ', "_"),
            code: status.as_u16(),
            messages: Vec::new(),
            date: Utc::now().to_rfc3339(),
        }
    }
}

/// Logs the error envelope as indented JSON
fn log_formatted_error(wrapped: &ErrorFormat) {
    match serde_json::to_string_pretty(wrapped) {
        Ok(spaced_json) => warn!("\nError response:\n{}", spaced_json),
        Err(err) => error!("Failed to format response JSON: {:?}", err),
    }
}

/// Builds the final response with JSON content type
fn build_error_response(mut parts: Parts, wrapped: &ErrorFormat) -> Response<Body> {
    let json_body: Vec<u8> = serde_json::to_vec(wrapped).unwrap_or_else(|_| b"{}".to_vec());

    parts.headers.remove(axum::http::header::CONTENT_LENGTH);
    parts.headers.insert(CONTENT_TYPE, HeaderValue::from_static("application/json"));

    Response::from_parts(parts, Body::from(json_body))
}

/// Middleware that rewrites every failed response into an `ErrorFormat` body
pub async fn error_response_wrapper(
    req: Request<Body>,
    next: Next,
) -> Result<Response<Body>, Infallible> {
    let response: Response<Body> = next.run(req).await;

    if response.status().is_success() {
        return Ok(response);
    }

    let (parts, _) = response.into_parts();
    let wrapped: ErrorFormat = ErrorFormat::for_status(parts.status);

    log_formatted_error(&wrapped);

    Ok(build_error_response(parts, &wrapped))
}
