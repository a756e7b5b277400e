//! Configuration management for astrarag

use anyhow::{Context, Result};
use serde::{Deserialize, Serialize};
use std::collections::HashMap;
use std::path::{Path, PathBuf};
use std::time::Duration;
use thiserror::Error;
use url::Url;

/// Environment variable that replaces the configured chat endpoint
pub const CHAT_ENDPOINT_ENV: &str = "CHAT_ENDPOINT_URL";

/// Name of the single agent the answer service runs
pub const QA_AGENT_NAME: &str = "Question Answer Agent";

#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("Invalid chat endpoint URL '{url}': {reason}")]
    InvalidEndpoint { url: String, reason: String },

    #[error("Chat endpoint must use http or https, got '{0}'")]
    UnsupportedScheme(String),

    #[error("'{0}' must be greater than zero")]
    ZeroTimeout(&'static str),
}

/// Main configuration structure
#[derive(Debug, Clone, Serialize, Deserialize, Default)]
#[serde(default)]
pub struct Config {
    pub frontend: FrontendConfig,
    pub server: ServerConfig,
    pub llm: LlmConfig,
}

/// Settings the chat frontend needs to reach the answer service
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct FrontendConfig {
    pub chat_endpoint_url: String,
    /// Upper bound for one chat exchange, in seconds
    pub request_timeout_secs: u64,
    /// Upper bound for the sidebar health probe, in seconds
    pub health_timeout_secs: u64,
    /// Command shown to the user when the backend cannot be reached
    pub backend_start_command: String,
}

impl Default for FrontendConfig {
    fn default() -> Self {
        Self {
            chat_endpoint_url: "http://localhost:8000/chat/answer".to_string(),
            request_timeout_secs: 30,
            health_timeout_secs: 2,
            backend_start_command: "python -m src.backend_src.main --reload".to_string(),
        }
    }
}

impl FrontendConfig {
    pub fn request_timeout(&self) -> Duration {
        Duration::from_secs(self.request_timeout_secs)
    }

    pub fn health_timeout(&self) -> Duration {
        Duration::from_secs(self.health_timeout_secs)
    }

    /// Parse and validate the chat endpoint
    pub fn endpoint(&self) -> Result<Url, ConfigError> {
        let url =
            Url::parse(&self.chat_endpoint_url).map_err(|e| ConfigError::InvalidEndpoint {
                url: self.chat_endpoint_url.clone(),
                reason: e.to_string(),
            })?;
        match url.scheme() {
            "http" | "https" => Ok(url),
            other => Err(ConfigError::UnsupportedScheme(other.to_string())),
        }
    }

    /// Check the timeouts and return the parsed endpoint
    pub fn validate(&self) -> Result<Url, ConfigError> {
        if self.request_timeout_secs == 0 {
            return Err(ConfigError::ZeroTimeout("frontend.request_timeout_secs"));
        }
        if self.health_timeout_secs == 0 {
            return Err(ConfigError::ZeroTimeout("frontend.health_timeout_secs"));
        }
        self.endpoint()
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct ServerConfig {
    pub host: String,
    pub port: u16,
}

impl Default for ServerConfig {
    fn default() -> Self {
        Self {
            host: "127.0.0.1".to_string(),
            port: 8501,
        }
    }
}

/// LLM settings used by the answer service's agents
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct LlmConfig {
    pub default_model: String,
    pub default_temperature: f32,
    /// Per-agent overrides keyed by agent name
    pub agents: HashMap<String, AgentLlmConfig>,
}

impl Default for LlmConfig {
    fn default() -> Self {
        Self {
            default_model: "groq/llama-3.3-70b-versatile".to_string(),
            default_temperature: 0.0,
            agents: HashMap::new(),
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize, Default)]
pub struct AgentLlmConfig {
    pub model: Option<String>,
    pub temperature: Option<f32>,
}

/// Model settings resolved for one agent
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ResolvedLlm {
    pub model: String,
    pub temperature: f32,
}

impl LlmConfig {
    /// Look up an agent's model and temperature, falling back to the defaults
    /// field by field.
    pub fn for_agent(&self, agent_name: &str) -> ResolvedLlm {
        let entry = self.agents.get(agent_name);
        ResolvedLlm {
            model: entry
                .and_then(|a| a.model.clone())
                .unwrap_or_else(|| self.default_model.clone()),
            temperature: entry
                .and_then(|a| a.temperature)
                .unwrap_or(self.default_temperature),
        }
    }
}

impl Config {
    /// Load configuration from default location or create default, then apply
    /// environment overrides
    pub fn load() -> Result<Self> {
        let config_path = Self::config_path()?;
        let mut config = if config_path.exists() {
            Self::load_from(&config_path)?
        } else {
            Config::default()
        };
        config.apply_env_overrides();
        Ok(config)
    }

    /// Load configuration from an explicit TOML file
    pub fn load_from(path: &Path) -> Result<Self> {
        let content = std::fs::read_to_string(path)
            .with_context(|| format!("Failed to read config file {}", path.display()))?;
        let config: Config = toml::from_str(&content)
            .with_context(|| format!("Failed to parse config file {}", path.display()))?;
        Ok(config)
    }

    /// Get the configuration file path
    pub fn config_path() -> Result<PathBuf> {
        if let Some(proj_dirs) = directories::ProjectDirs::from("", "", "astrarag") {
            Ok(proj_dirs.config_dir().join("config.toml"))
        } else {
            Ok(PathBuf::from("config.toml"))
        }
    }

    pub fn apply_env_overrides(&mut self) {
        if let Ok(url) = std::env::var(CHAT_ENDPOINT_ENV) {
            if !url.trim().is_empty() {
                tracing::debug!("Chat endpoint overridden by {}", CHAT_ENDPOINT_ENV);
                self.frontend.chat_endpoint_url = url.trim().to_string();
            }
        }
    }

    pub fn to_toml(&self) -> Result<String> {
        Ok(toml::to_string_pretty(self)?)
    }
}
