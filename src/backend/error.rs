//! Typed errors for answer service exchanges
//!
//! Each variant maps to one failure outcome of a chat submission so the
//! controller can pick the user-facing message without string matching.

use thiserror::Error;

/// Answer service failures
///
/// - `Connection` - endpoint unreachable (refused, DNS, TLS handshake)
/// - `Timeout` - no complete response within the configured bound
/// - `HttpStatus` - the service answered with a non-2xx status
/// - `Unknown` - anything else, e.g. a 2xx body that is not the expected JSON
#[derive(Debug, Error)]
pub enum BackendError {
    #[error("Connection failed: {0}")]
    Connection(String),

    #[error("Request timeout: {0}")]
    Timeout(String),

    #[error("{detail}")]
    HttpStatus { status: u16, detail: String },

    #[error("{0}")]
    Unknown(String),
}

impl BackendError {
    /// Classify a reqwest error
    ///
    /// Timeout is checked before connect: a connect attempt that runs past the
    /// deadline reports both and must count as a timeout.
    pub fn from_reqwest(e: reqwest::Error) -> Self {
        if e.is_timeout() {
            BackendError::Timeout(e.to_string())
        } else if e.is_connect() {
            BackendError::Connection(e.to_string())
        } else if let Some(status) = e.status() {
            BackendError::HttpStatus {
                status: status.as_u16(),
                detail: e.to_string(),
            }
        } else {
            BackendError::Unknown(e.to_string())
        }
    }

    pub fn status(&self) -> Option<u16> {
        match self {
            BackendError::HttpStatus { status, .. } => Some(*status),
            _ => None,
        }
    }
}
