//! Chat exchange controller
//!
//! Drives one request/response cycle per user submission:
//!
//! ```text
//! Idle -> Sending -> { Succeeded | ConnectionFailure | TimeoutFailure
//!                    | HttpStatusFailure | UnknownFailure } -> Idle
//! ```
//!
//! Every terminal state appends exactly one assistant turn, so after each
//! cycle the session holds as many assistant turns as user turns. Failures are
//! never retried.

use super::errors::SubmitError;
use super::session::Session;
use super::traits::AnswerService;
use super::types::{ChatRequest, ChatResponse, ChatTurn};
use crate::backend::BackendError;
use crate::config::FrontendConfig;
use serde::Serialize;
use std::sync::Arc;
use std::time::Duration;

pub const TOOL_CONNECTION_ERROR: &str = "Connection Error";
pub const TOOL_TIMEOUT_ERROR: &str = "Timeout Error";
pub const TOOL_HTTP_ERROR: &str = "HTTP Error";
pub const TOOL_UNKNOWN_ERROR: &str = "Unknown Error";

/// Terminal state of one submission
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum ExchangeOutcome {
    Succeeded,
    ConnectionFailure,
    TimeoutFailure,
    HttpStatusFailure { status: u16 },
    UnknownFailure,
}

impl ExchangeOutcome {
    pub fn is_success(&self) -> bool {
        matches!(self, ExchangeOutcome::Succeeded)
    }
}

/// What a completed submission hands back to the presentation layer
#[derive(Debug, Clone, Serialize)]
pub struct SubmitReport {
    pub outcome: ExchangeOutcome,
    /// Full turn list after the assistant turn was appended
    pub turns: Vec<ChatTurn>,
}

impl SubmitReport {
    /// The assistant turn produced by this submission
    pub fn reply(&self) -> Option<&ChatTurn> {
        self.turns.last().filter(|t| !t.is_user())
    }
}

#[derive(Clone)]
pub struct ChatExchange {
    service: Arc<dyn AnswerService>,
    request_timeout: Duration,
    backend_start_command: String,
}

/// `30-second` for whole seconds, `1500ms` otherwise
fn timeout_label(timeout: Duration) -> String {
    if timeout.subsec_nanos() == 0 {
        format!("{}-second", timeout.as_secs())
    } else {
        format!("{}ms", timeout.as_millis())
    }
}

impl ChatExchange {
    /// The wait bound comes from the service when it enforces its own,
    /// otherwise from the frontend config.
    pub fn new(service: Arc<dyn AnswerService>, frontend: &FrontendConfig) -> Self {
        let request_timeout = service
            .request_timeout()
            .unwrap_or_else(|| frontend.request_timeout());
        Self {
            service,
            request_timeout,
            backend_start_command: frontend.backend_start_command.clone(),
        }
    }

    pub fn with_timeout(mut self, timeout: Duration) -> Self {
        self.request_timeout = timeout;
        self
    }

    pub fn request_timeout(&self) -> Duration {
        self.request_timeout
    }

    /// Submit one user message and wait for the assistant turn
    ///
    /// Rejects blank input and submissions on a session that is already
    /// sending; in both cases the session is left untouched. Once accepted,
    /// the cycle runs on its own task and always appends the assistant turn,
    /// even if the caller stops waiting.
    pub async fn submit(
        &self,
        session: &Session,
        user_text: &str,
    ) -> Result<SubmitReport, SubmitError> {
        if user_text.trim().is_empty() {
            return Err(SubmitError::EmptyInput);
        }

        let guard = session.begin_send().ok_or_else(|| SubmitError::InFlight {
            session_id: session.id().to_string(),
        })?;

        let exchange = self.clone();
        let owned = session.clone();
        let user_text = user_text.to_string();
        let cycle = tokio::spawn(async move {
            let report = exchange.run_cycle(&owned, user_text).await;
            drop(guard);
            report
        });

        cycle.await.map_err(|e| {
            tracing::error!("Session {}: exchange task failed: {}", session.id(), e);
            SubmitError::Aborted {
                session_id: session.id().to_string(),
            }
        })
    }

    async fn run_cycle(&self, session: &Session, user_text: String) -> SubmitReport {
        session.append(ChatTurn::user(user_text)).await;
        let request = ChatRequest {
            chat_history: session.all().await,
        };

        tracing::debug!(
            "Session {}: sending {} turns to {}",
            session.id(),
            request.chat_history.len(),
            self.service.describe()
        );

        let result = match tokio::time::timeout(self.request_timeout, self.service.answer(&request))
            .await
        {
            Ok(result) => result,
            Err(_) => Err(BackendError::Timeout(format!(
                "no response within {}",
                timeout_label(self.request_timeout)
            ))),
        };

        let (outcome, reply) = self.interpret(result);
        match &outcome {
            ExchangeOutcome::Succeeded => tracing::info!(
                "Session {}: answer received ({} sources)",
                session.id(),
                reply.sources.len()
            ),
            failure => tracing::warn!(
                "Session {}: exchange failed with {:?}: {}",
                session.id(),
                failure,
                reply.rationale.as_deref().unwrap_or_default()
            ),
        }

        session.append(reply).await;
        let turns = session.all().await;

        SubmitReport { outcome, turns }
    }

    /// Map a service result to its outcome and assistant turn
    pub fn interpret(
        &self,
        result: Result<ChatResponse, BackendError>,
    ) -> (ExchangeOutcome, ChatTurn) {
        match result {
            Ok(response) => (ExchangeOutcome::Succeeded, response.into_turn()),
            Err(BackendError::Connection(_)) => (
                ExchangeOutcome::ConnectionFailure,
                ChatTurn::assistant(
                    format!(
                        "❌ **Cannot connect to the backend server.**\n\n\
                         Please make sure the answer service is running in a separate terminal with:\n\
                         ```bash\n{}\n```",
                        self.backend_start_command
                    ),
                    TOOL_CONNECTION_ERROR,
                    "The frontend cannot reach the backend API. This usually happens when the \
                     answer service isn't running.",
                    Vec::new(),
                ),
            ),
            Err(BackendError::Timeout(_)) => (
                ExchangeOutcome::TimeoutFailure,
                ChatTurn::assistant(
                    "❌ **Request timed out.**\n\nThe backend took too long to respond. Please try again.",
                    TOOL_TIMEOUT_ERROR,
                    format!(
                        "The API request exceeded the {} timeout limit.",
                        timeout_label(self.request_timeout)
                    ),
                    Vec::new(),
                ),
            ),
            Err(BackendError::HttpStatus { status, detail }) => (
                ExchangeOutcome::HttpStatusFailure { status },
                ChatTurn::assistant(
                    format!("❌ **HTTP Error:** {}", detail),
                    TOOL_HTTP_ERROR,
                    format!("The API returned an HTTP error: {}", detail),
                    Vec::new(),
                ),
            ),
            Err(BackendError::Unknown(description)) => (
                ExchangeOutcome::UnknownFailure,
                ChatTurn::assistant(
                    format!("❌ **Error:** {}", description),
                    TOOL_UNKNOWN_ERROR,
                    format!("An unexpected error occurred: {}", description),
                    Vec::new(),
                ),
            ),
        }
    }
}
