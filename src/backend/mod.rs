pub mod http;
pub mod proxy;

use std::str::FromStr;

use serde::Deserialize;

use crate::config::Config;
use crate::error::ConjureError;

/// Which completion backend serves a prompt, and which raw-text delimiter
/// convention applies when parsing its response.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum BackendMode {
    /// Local line-oriented socket proxy.
    Local,
    /// Remote HTTPS completion API.
    #[default]
    Remote,
}

impl BackendMode {
    /// Line delimiter raw completions use in this mode. The remote API
    /// historically returned newlines as the two-character escape sequence;
    /// the local proxy sends real ones.
    pub fn delimiter(self) -> &'static str {
        match self {
            Self::Local => "\n",
            Self::Remote => "\\n",
        }
    }

    pub fn toggled(self) -> Self {
        match self {
            Self::Local => Self::Remote,
            Self::Remote => Self::Local,
        }
    }

    pub fn name(self) -> &'static str {
        match self {
            Self::Local => "local",
            Self::Remote => "remote",
        }
    }
}

impl FromStr for BackendMode {
    type Err = ConjureError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "local" | "proxy" => Ok(Self::Local),
            "remote" => Ok(Self::Remote),
            other => Err(ConjureError::Config(format!(
                "unknown backend mode: {other} (expected local or remote)"
            ))),
        }
    }
}

/// Request body flavor for the remote backend.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum RemoteApi {
    /// OpenAI-shaped chat completions: `{"model": ..., "messages": [...]}`.
    #[default]
    Chat,
    /// Legacy completions: `{"prompt": ..., "max_tokens": ...}`.
    Completions,
}

impl FromStr for RemoteApi {
    type Err = ConjureError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "chat" => Ok(Self::Chat),
            "completions" => Ok(Self::Completions),
            other => Err(ConjureError::Config(format!(
                "unknown remote API flavor: {other} (expected chat or completions)"
            ))),
        }
    }
}

/// Facade over the two interchangeable completion backends.
pub struct CompletionClient {
    http: http::HttpBackend,
    proxy: proxy::ProxyBackend,
}

impl CompletionClient {
    pub fn new(config: &Config) -> Self {
        Self {
            http: http::HttpBackend::new(config.remote.clone()),
            proxy: proxy::ProxyBackend::new(config.proxy.clone()),
        }
    }

    /// Send a prompt to the backend selected by `mode` and return the raw
    /// completion text.
    pub async fn complete(&self, prompt: &str, mode: BackendMode) -> Result<String, ConjureError> {
        match mode {
            BackendMode::Remote => self.http.complete(prompt).await,
            BackendMode::Local => self.proxy.complete(prompt).await,
        }
    }
}
