//! HTTP client for the AstraRAG answer service

pub mod error;
pub mod health;

pub use error::BackendError;
pub use health::{probe, probe_url, HealthStatus};

use crate::chat::traits::AnswerService;
use crate::chat::types::{ChatRequest, ChatResponse};
use crate::config::{ConfigError, FrontendConfig};
use async_trait::async_trait;
use std::time::Duration;
use url::Url;

/// Posts chat histories to the configured chat endpoint
#[derive(Clone)]
pub struct HttpAnswerClient {
    client: reqwest::Client,
    endpoint: Url,
    timeout: Duration,
}

impl HttpAnswerClient {
    pub fn new(endpoint: Url, timeout: Duration) -> Self {
        Self {
            client: reqwest::Client::new(),
            endpoint,
            timeout,
        }
    }

    pub fn from_config(frontend: &FrontendConfig) -> Result<Self, ConfigError> {
        Ok(Self::new(frontend.validate()?, frontend.request_timeout()))
    }

    pub fn endpoint(&self) -> &Url {
        &self.endpoint
    }

    pub fn timeout(&self) -> Duration {
        self.timeout
    }
}

#[async_trait]
impl AnswerService for HttpAnswerClient {
    async fn answer(&self, request: &ChatRequest) -> Result<ChatResponse, BackendError> {
        tracing::debug!(
            "POST {} with {} turns",
            self.endpoint,
            request.chat_history.len()
        );

        let response = self
            .client
            .post(self.endpoint.clone())
            .json(request)
            .timeout(self.timeout)
            .send()
            .await
            .map_err(BackendError::from_reqwest)?;

        let response = response
            .error_for_status()
            .map_err(BackendError::from_reqwest)?;

        response
            .json::<ChatResponse>()
            .await
            .map_err(BackendError::from_reqwest)
    }

    fn describe(&self) -> String {
        self.endpoint.to_string()
    }

    fn request_timeout(&self) -> Option<Duration> {
        Some(self.timeout)
    }
}
