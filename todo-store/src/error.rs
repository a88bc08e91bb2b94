//! Error types for the todo store

use thiserror::Error;

/// A failed round trip to the todo backend.
///
/// These never abort a dispatch. The reducer stores them in
/// [`TodoState::error`](crate::TodoState::error) and keeps the current list.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ApiError {
    /// The request could not be sent or the connection failed
    #[error("Request failed: {0}")]
    Request(String),

    /// The server answered with a non-success status
    #[error("Server returned {status} for {url}")]
    Status {
        /// HTTP status code
        status: u16,
        /// Requested URL
        url: String,
    },

    /// The response body was not the expected JSON
    #[error("Response parsing failed: {0}")]
    Decode(String),

    /// The request body could not be serialized
    #[error("Request encoding failed: {0}")]
    Encode(String),
}

impl From<reqwest::Error> for ApiError {
    fn from(err: reqwest::Error) -> Self {
        if err.is_decode() {
            return ApiError::Decode(err.to_string());
        }
        match (err.status(), err.url()) {
            (Some(status), Some(url)) => ApiError::Status {
                status: status.as_u16(),
                url: url.to_string(),
            },
            _ => ApiError::Request(err.to_string()),
        }
    }
}

/// Errors that abort a dispatch
#[derive(Debug, Error)]
pub enum TodoError {
    /// The action's type tag is not one the reducer handles
    #[error("unexpected action type: {0:?}")]
    UnknownActionType(String),
}

/// One wire action that could not be replayed
#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("line {line}: {reason}")]
pub struct ReplayFailure {
    /// 1-based line number in the input
    pub line: usize,
    /// Why the line was rejected
    pub reason: String,
}

/// Errors from replaying a stream of wire actions
#[derive(Debug, Error)]
pub enum ReplayError {
    /// The input could not be read; lines before it were dispatched
    #[error("Failed to read actions: {0}")]
    Io(#[from] std::io::Error),

    /// Every line was processed but some were rejected
    #[error("{} replayed action(s) failed", .failures.len())]
    Failed {
        /// Actions dispatched successfully
        applied: usize,
        /// Rejected lines, in input order
        failures: Vec<ReplayFailure>,
    },
}
