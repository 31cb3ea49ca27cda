//! Agent configuration

use std::time::Duration;

use tracing::warn;
use url::Url;

use crate::model::gemini::{default_base_url, DEFAULT_MODEL};

pub const ENV_API_KEY: &str = "GOOGLE_API_KEY";
pub const ENV_MODEL: &str = "GEMINI_MODEL";
pub const ENV_BASE_URL: &str = "GEMINI_BASE_URL";
pub const ENV_HOST: &str = "HOST";
pub const ENV_PORT: &str = "PORT";
pub const ENV_TIMEOUT: &str = "MODEL_TIMEOUT_SECS";

/// Placeholder key used when none is configured; the provider rejects it on first call
pub const MISSING_API_KEY: &str = "no Key";

/// Configuration for the grammar agent process
#[derive(Clone)]
pub struct AgentConfig {
    /// API key for the model provider
    pub api_key: String,

    /// Model name
    pub model: String,

    /// Base URL of the model API
    pub base_url: Url,

    /// Address to listen on
    pub host: String,

    /// Port to listen on
    pub port: u16,

    /// Bound on each model call
    pub model_timeout: Duration,
}

impl AgentConfig {
    /// Create a configuration with default values and the given API key
    pub fn new(api_key: impl Into<String>) -> Self {
        Self {
            api_key: api_key.into(),
            model: DEFAULT_MODEL.to_string(),
            base_url: default_base_url(),
            host: "127.0.0.1".to_string(),
            port: 5000,
            model_timeout: Duration::from_secs(30),
        }
    }

    /// Read configuration from the process environment
    pub fn from_env() -> Self {
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    /// Read configuration through `lookup`, falling back to defaults
    ///
    /// Values that fail to parse are logged and ignored.
    pub fn from_lookup<F>(lookup: F) -> Self
    where
        F: Fn(&str) -> Option<String>,
    {
        let mut config = Self::new(lookup(ENV_API_KEY).unwrap_or_else(|| MISSING_API_KEY.into()));

        if let Some(model) = lookup(ENV_MODEL).filter(|m| !m.is_empty()) {
            config.model = model;
        }
        if let Some(base_url) = parsed(&lookup, ENV_BASE_URL, |v| Url::parse(v).ok()) {
            config.base_url = base_url;
        }
        if let Some(host) = lookup(ENV_HOST).filter(|h| !h.is_empty()) {
            config.host = host;
        }
        if let Some(port) = parsed(&lookup, ENV_PORT, |v| v.parse().ok()) {
            config.port = port;
        }
        if let Some(secs) = parsed(&lookup, ENV_TIMEOUT, |v| v.parse::<u64>().ok()) {
            config.model_timeout = Duration::from_secs(secs);
        }

        config
    }

    /// `host:port` string to bind the listener to
    pub fn bind_addr(&self) -> String {
        format!("{}:{}", self.host, self.port)
    }

    pub fn has_api_key(&self) -> bool {
        !self.api_key.is_empty() && self.api_key != MISSING_API_KEY
    }
}

impl Default for AgentConfig {
    fn default() -> Self {
        Self::new(MISSING_API_KEY)
    }
}

impl std::fmt::Debug for AgentConfig {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("AgentConfig")
            .field("api_key", &"<redacted>")
            .field("model", &self.model)
            .field("base_url", &self.base_url.as_str())
            .field("host", &self.host)
            .field("port", &self.port)
            .field("model_timeout", &self.model_timeout)
            .finish()
    }
}

fn parsed<F, T>(lookup: &F, key: &str, parse: impl Fn(&str) -> Option<T>) -> Option<T>
where
    F: Fn(&str) -> Option<String>,
{
    let raw = lookup(key)?;
    let value = parse(&raw);
    if value.is_none() {
        warn!(key, value = %raw, "ignoring invalid configuration value");
    }
    value
}
