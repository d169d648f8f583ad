//! Client side of the external Quran search/rank server.
//!
//! The server does embedding retrieval and cross-encoder ranking; this module
//! only talks to it. [`client`] performs the health check and search calls,
//! [`types`] holds the wire format, [`transform`] reshapes replies into the
//! UI schema and [`encoders`] knows which cross-encoder pairs with which
//! bi-encoder.

pub mod client;
pub mod encoders;
pub mod transform;
pub mod types;

pub use client::BackendClient;

/// Failure talking to the backend. Each variant maps to its own HTTP status.
#[derive(Debug, thiserror::Error)]
pub enum BackendError {
    /// Health check answered, but not with a 2xx.
    #[error("search backend is not healthy (status {0})")]
    Unhealthy(u16),
    #[error("search backend did not answer in time")]
    Timeout,
    #[error("failed to connect to search backend: {0}")]
    Unreachable(String),
    #[error("search backend returned {status}: {body}")]
    Status { status: u16, body: String },
    #[error("invalid response from search backend: {0}")]
    Decode(String),
    #[error("search backend request failed: {0}")]
    Request(String),
}

impl From<reqwest::Error> for BackendError {
    fn from(e: reqwest::Error) -> Self {
        if e.is_timeout() {
            BackendError::Timeout
        } else if e.is_connect() {
            BackendError::Unreachable(e.to_string())
        } else if e.is_decode() {
            BackendError::Decode(e.to_string())
        } else {
            BackendError::Request(e.to_string())
        }
    }
}

impl BackendError {
    /// Timeouts and connection failures, as opposed to a backend that
    /// answered badly.
    pub fn is_unavailable(&self) -> bool {
        matches!(
            self,
            BackendError::Unhealthy(_) | BackendError::Timeout | BackendError::Unreachable(_)
        )
    }
}
