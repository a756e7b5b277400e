//! Domain error types
//!
//! Backend failures never surface here: they become assistant turns. These
//! errors cover submissions the controller refuses to start.

use thiserror::Error;

/// Errors returned by `ChatExchange::submit`
#[derive(Debug, Error, PartialEq, Eq)]
pub enum SubmitError {
    /// Blank input is never forwarded to the answer service
    #[error("Message is empty")]
    EmptyInput,

    /// Another submission on the same session has not finished yet
    #[error("A message is already being answered in session {session_id}")]
    InFlight { session_id: String },

    /// The exchange task panicked before producing a reply
    #[error("The exchange in session {session_id} stopped unexpectedly")]
    Aborted { session_id: String },
}

/// Errors from the session registry
#[derive(Debug, Error, PartialEq, Eq)]
pub enum SessionError {
    #[error("Session not found: {0}")]
    NotFound(String),
}
