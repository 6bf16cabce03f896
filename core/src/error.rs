//! Error types for the dashboard API client.
//!
//! # Design
//! Every variant carries the operation it came from ("fetch RTPI events",
//! "refresh /api/refresh/rtpi"), so the rendered message always names the
//! resource. `NotFound` and `RefreshInProgress` get their own variants because
//! callers react to them differently from a generic failure; any other
//! non-2xx lands in `Status` with the raw code and body.

use std::time::Duration;

/// Errors returned by `DashboardClient` parse methods and `Dashboard` calls.
#[derive(Debug, thiserror::Error)]
pub enum ApiError {
    /// The server returned 404.
    #[error("failed to {operation}: not found")]
    NotFound { operation: String },

    /// The backend refused a refresh because the same scraper is running.
    #[error("failed to {operation}: a refresh is already running")]
    RefreshInProgress { operation: String },

    /// Any other non-2xx status.
    #[error("failed to {operation}: HTTP {status}: {body}")]
    Status {
        operation: String,
        status: u16,
        body: String,
    },

    /// The request never produced a response.
    #[error("failed to {operation}: {source}")]
    Transport {
        operation: String,
        #[source]
        source: TransportError,
    },

    /// A 2xx body that is not JSON. `content_type` is what the server
    /// claimed it sent, when the transport reported it.
    #[error("failed to {operation}: malformed JSON: {message}")]
    Decode {
        operation: String,
        content_type: Option<String>,
        message: String,
    },

    /// Valid JSON that does not match the declared response shape.
    #[error("failed to {operation}: unexpected response shape: {message}")]
    Shape { operation: String, message: String },

    #[error("failed to {operation}: timed out after {after:?}")]
    Timeout { operation: String, after: Duration },

    #[error("failed to {operation}: cancelled")]
    Cancelled { operation: String },
}

impl ApiError {
    /// HTTP status behind the failure, if the server answered.
    pub fn status(&self) -> Option<u16> {
        match self {
            ApiError::NotFound { .. } => Some(404),
            ApiError::RefreshInProgress { .. } => Some(409),
            ApiError::Status { status, .. } => Some(*status),
            _ => None,
        }
    }

    pub fn operation(&self) -> &str {
        match self {
            ApiError::NotFound { operation }
            | ApiError::RefreshInProgress { operation }
            | ApiError::Status { operation, .. }
            | ApiError::Transport { operation, .. }
            | ApiError::Decode { operation, .. }
            | ApiError::Shape { operation, .. }
            | ApiError::Timeout { operation, .. }
            | ApiError::Cancelled { operation } => operation,
        }
    }
}

/// Failure to complete an HTTP round trip.
#[derive(Debug, thiserror::Error)]
pub enum TransportError {
    #[error("HTTP request failed: {0}")]
    Reqwest(#[from] reqwest::Error),

    #[error("{0}")]
    Other(String),
}
