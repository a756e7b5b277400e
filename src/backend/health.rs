//! Backend reachability probe shown in the UI sidebar
//!
//! The answer service is a FastAPI app, so its `/docs` page is used as a cheap
//! liveness check. The result is informational and never gates a submission.

use serde::Serialize;
use std::time::Duration;
use url::Url;

const CHAT_ROUTE: &str = "/chat/answer";

/// Outcome of one probe
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(tag = "state", rename_all = "snake_case")]
pub enum HealthStatus {
    /// `/docs` answered 200
    Connected,
    /// The host answered with some other status
    Degraded { status: u16 },
    /// The request itself failed
    Unreachable { reason: String },
}

impl HealthStatus {
    pub fn is_connected(&self) -> bool {
        matches!(self, HealthStatus::Connected)
    }

    /// One-line summary for the sidebar or terminal
    pub fn summary(&self, endpoint: &Url) -> String {
        match self {
            HealthStatus::Connected => "Backend connected".to_string(),
            HealthStatus::Degraded { status } => {
                format!("Backend responding but with issues (HTTP {})", status)
            }
            HealthStatus::Unreachable { .. } => {
                format!("Backend not reachable at {}", endpoint)
            }
        }
    }
}

/// Derive the probe URL from the chat endpoint
///
/// `http://host:8000/chat/answer` becomes `http://host:8000/docs`. Endpoints
/// mounted elsewhere keep their path prefix.
pub fn probe_url(endpoint: &Url) -> Url {
    let mut url = endpoint.clone();
    let path = endpoint.path().trim_end_matches('/');
    let base = path.strip_suffix(CHAT_ROUTE).unwrap_or(path);
    url.set_path(&format!("{}/docs", base.trim_end_matches('/')));
    url.set_query(None);
    url.set_fragment(None);
    url
}

/// GET the derived `/docs` URL with a short timeout
pub async fn probe(client: &reqwest::Client, endpoint: &Url, timeout: Duration) -> HealthStatus {
    let url = probe_url(endpoint);
    tracing::debug!("Probing backend at {}", url);

    match client.get(url).timeout(timeout).send().await {
        Ok(response) if response.status() == reqwest::StatusCode::OK => HealthStatus::Connected,
        Ok(response) => HealthStatus::Degraded {
            status: response.status().as_u16(),
        },
        Err(e) => HealthStatus::Unreachable {
            reason: e.to_string(),
        },
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn url(s: &str) -> Url {
        Url::parse(s).unwrap()
    }

    #[test]
    fn test_probe_url_strips_chat_route() {
        assert_eq!(
            probe_url(&url("http://localhost:8000/chat/answer")).as_str(),
            "http://localhost:8000/docs"
        );
        assert_eq!(
            probe_url(&url("http://localhost:8000/chat/answer/")).as_str(),
            "http://localhost:8000/docs"
        );
    }

    #[test]
    fn test_probe_url_keeps_prefix() {
        assert_eq!(
            probe_url(&url("https://rag.example.com/api/chat/answer?x=1")).as_str(),
            "https://rag.example.com/api/docs"
        );
        assert_eq!(
            probe_url(&url("http://h:1/answer")).as_str(),
            "http://h:1/answer/docs"
        );
    }

    #[test]
    fn test_summary_text() {
        let endpoint = url("http://localhost:8000/chat/answer");
        assert_eq!(HealthStatus::Connected.summary(&endpoint), "Backend connected");
        assert!(HealthStatus::Degraded { status: 500 }
            .summary(&endpoint)
            .contains("responding but with issues"));
        let down = HealthStatus::Unreachable {
            reason: "refused".into(),
        };
        assert_eq!(
            down.summary(&endpoint),
            "Backend not reachable at http://localhost:8000/chat/answer"
        );
        assert!(!down.is_connected());
    }

    #[test]
    fn test_serializes_with_state_tag() {
        let json = serde_json::to_value(HealthStatus::Degraded { status: 503 }).unwrap();
        assert_eq!(json, serde_json::json!({"state": "degraded", "status": 503}));
    }
}
