//! HTTP server for the chat web UI
//!
//! Each browser tab creates its own session through `POST /api/sessions`;
//! submissions on that session go through the shared exchange controller.

use super::page::CHAT_HTML;
use crate::backend::{self, HealthStatus, HttpAnswerClient};
use crate::chat::{AnswerService, ChatExchange, SessionError, SessionRegistry, SubmitError};
use crate::config::{Config, ServerConfig};
use anyhow::{Context, Result};
use axum::{
    extract::{Path, State},
    http::StatusCode,
    response::{Html, IntoResponse, Response},
    routing::{get, post},
    Json, Router,
};
use serde::{Deserialize, Serialize};
use std::sync::Arc;
use tokio::net::TcpListener;
use tower_http::cors::{Any, CorsLayer};
use tower_http::trace::TraceLayer;
use url::Url;

/// Shared application state
pub struct AppState {
    exchange: ChatExchange,
    sessions: SessionRegistry,
    endpoint: Url,
    probe_client: reqwest::Client,
    config: Config,
}

impl AppState {
    /// State backed by the configured HTTP answer service
    pub fn from_config(config: Config) -> Result<Self> {
        let client = HttpAnswerClient::from_config(&config.frontend)?;
        Self::with_service(config, Arc::new(client))
    }

    /// State backed by any answer service
    pub fn with_service(config: Config, service: Arc<dyn AnswerService>) -> Result<Self> {
        let endpoint = config.frontend.validate()?;
        Ok(Self {
            exchange: ChatExchange::new(service, &config.frontend),
            sessions: SessionRegistry::new(),
            endpoint,
            probe_client: reqwest::Client::new(),
            config,
        })
    }

    pub fn sessions(&self) -> &SessionRegistry {
        &self.sessions
    }
}

/// Request for a chat submission
#[derive(Debug, Deserialize)]
struct MessageRequest {
    content: String,
}

/// Health check response
#[derive(Debug, Serialize)]
struct HealthResponse {
    status: String,
    version: String,
    active_sessions: usize,
}

/// Backend probe response for the sidebar
#[derive(Debug, Serialize)]
struct BackendHealthResponse {
    endpoint: String,
    summary: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    hint: Option<String>,
    status: HealthStatus,
}

/// Build the router; split out so tests can serve it on an ephemeral port
pub fn build_router(state: Arc<AppState>) -> Router {
    Router::new()
        .route("/", get(index))
        .route("/health", get(health_check))
        .route("/api/backend-health", get(backend_health))
        .route("/api/sessions", post(create_session))
        .route("/api/sessions/:id", get(get_session).delete(end_session))
        .route("/api/sessions/:id/turns", get(get_turns))
        .route("/api/sessions/:id/messages", post(post_message))
        .layer(TraceLayer::new_for_http())
        .layer(
            CorsLayer::new()
                .allow_origin(Any)
                .allow_methods(Any)
                .allow_headers(Any),
        )
        .with_state(state)
}

/// Bind the UI listener; the host may be a name such as `localhost`
pub async fn bind_listener(server: &ServerConfig) -> Result<TcpListener> {
    TcpListener::bind((server.host.as_str(), server.port))
        .await
        .with_context(|| format!("Failed to bind {}:{}", server.host, server.port))
}

/// Run the HTTP server
pub async fn run_http_server(config: Config) -> Result<()> {
    let listener = bind_listener(&config.server).await?;
    let state = Arc::new(AppState::from_config(config)?);
    tracing::info!("Answer service endpoint: {}", state.endpoint);

    let app = build_router(state);
    tracing::info!("Chat UI listening on http://{}", listener.local_addr()?);

    axum::serve(listener, app).await?;

    Ok(())
}

fn error_response(status: StatusCode, message: impl ToString) -> Response {
    (
        status,
        Json(serde_json::json!({ "error": message.to_string() })),
    )
        .into_response()
}

impl IntoResponse for SessionError {
    fn into_response(self) -> Response {
        match self {
            SessionError::NotFound(_) => error_response(StatusCode::NOT_FOUND, self),
        }
    }
}

impl IntoResponse for SubmitError {
    fn into_response(self) -> Response {
        let status = match self {
            SubmitError::EmptyInput => StatusCode::BAD_REQUEST,
            SubmitError::InFlight { .. } => StatusCode::CONFLICT,
            SubmitError::Aborted { .. } => StatusCode::INTERNAL_SERVER_ERROR,
        };
        error_response(status, self)
    }
}

async fn index() -> Html<&'static str> {
    Html(CHAT_HTML)
}

async fn health_check(State(state): State<Arc<AppState>>) -> Json<HealthResponse> {
    Json(HealthResponse {
        status: "ok".to_string(),
        version: crate::version(),
        active_sessions: state.sessions.len(),
    })
}

async fn backend_health(State(state): State<Arc<AppState>>) -> Json<BackendHealthResponse> {
    let status = backend::probe(
        &state.probe_client,
        &state.endpoint,
        state.config.frontend.health_timeout(),
    )
    .await;

    let hint = match status {
        HealthStatus::Unreachable { .. } => Some(format!(
            "Make sure to run: `{}` in a separate terminal",
            state.config.frontend.backend_start_command
        )),
        _ => None,
    };

    Json(BackendHealthResponse {
        endpoint: state.endpoint.to_string(),
        summary: status.summary(&state.endpoint),
        hint,
        status,
    })
}

async fn create_session(State(state): State<Arc<AppState>>) -> impl IntoResponse {
    let session = state.sessions.create();
    (StatusCode::CREATED, Json(session.info().await))
}

async fn get_session(
    State(state): State<Arc<AppState>>,
    Path(id): Path<String>,
) -> Result<impl IntoResponse, SessionError> {
    let session = state.sessions.get(&id)?;
    Ok(Json(session.info().await))
}

async fn end_session(
    State(state): State<Arc<AppState>>,
    Path(id): Path<String>,
) -> Result<StatusCode, SessionError> {
    state.sessions.end(&id)?;
    Ok(StatusCode::NO_CONTENT)
}

async fn get_turns(
    State(state): State<Arc<AppState>>,
    Path(id): Path<String>,
) -> Result<impl IntoResponse, SessionError> {
    let session = state.sessions.get(&id)?;
    Ok(Json(session.all().await))
}

async fn post_message(
    State(state): State<Arc<AppState>>,
    Path(id): Path<String>,
    Json(req): Json<MessageRequest>,
) -> Response {
    let session = match state.sessions.get(&id) {
        Ok(session) => session,
        Err(e) => return e.into_response(),
    };

    match state.exchange.submit(&session, &req.content).await {
        Ok(report) => (StatusCode::OK, Json(report)).into_response(),
        Err(e) => {
            tracing::debug!("Rejected submission on session {}: {}", id, e);
            e.into_response()
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn test_bind_resolves_host_names() {
        let server = ServerConfig {
            host: "localhost".to_string(),
            port: 0,
        };
        let listener = bind_listener(&server).await.unwrap();
        assert!(listener.local_addr().unwrap().ip().is_loopback());
    }

    #[tokio::test]
    async fn test_bind_reports_bad_host() {
        let server = ServerConfig {
            host: "no such host!".to_string(),
            port: 0,
        };
        let err = bind_listener(&server).await.unwrap_err();
        assert!(err.to_string().contains("Failed to bind no such host!:0"));
    }
}
