//! Core traits for the domain layer
//!
//! The exchange controller depends on these interfaces so the HTTP client can
//! be swapped for scripted services in tests.

use super::types::{ChatRequest, ChatResponse};
use crate::backend::BackendError;
use async_trait::async_trait;
use std::time::Duration;

/// The service that turns a chat history into an answer
///
/// Implementations retrieve context and run the answering agent however they
/// like; the controller only consumes the four-field result.
#[async_trait]
pub trait AnswerService: Send + Sync {
    async fn answer(&self, request: &ChatRequest) -> Result<ChatResponse, BackendError>;

    /// Human-readable description of where answers come from, for logs
    fn describe(&self) -> String {
        "answer service".to_string()
    }

    /// Bound the service already applies to each request, if any
    fn request_timeout(&self) -> Option<Duration> {
        None
    }
}
