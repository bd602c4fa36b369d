use thiserror::Error;

#[derive(Debug, Error)]
pub enum ConjureError {
    #[error("rate limited by completion backend")]
    RateLimited,

    #[error("upstream error: {message}")]
    Upstream {
        message: String,
        status: Option<u16>,
    },

    #[error("auth failed: {0}")]
    AuthFailed(String),

    #[error("schema parse error: {0}")]
    SchemaParse(String),

    #[error("timeout after {0}ms")]
    Timeout(u64),

    #[error("cancelled")]
    Cancelled,

    #[error("request error: {0}")]
    Request(#[from] reqwest::Error),

    #[error("proxy I/O error: {0}")]
    Io(#[from] std::io::Error),

    #[error("prompt must not be empty")]
    EmptyPrompt,

    #[error("config error: {0}")]
    Config(String),
}

impl ConjureError {
    /// Returns true for transient errors that may succeed on retry.
    pub fn is_retryable(&self) -> bool {
        match self {
            Self::RateLimited => true,
            Self::Timeout(_) => true,
            Self::Upstream { status, .. } => {
                // 5xx = server error (retryable), 4xx = client error (not retryable)
                // status: None = ambiguous (not from HTTP) → safe default: NOT retryable
                status.is_some_and(|s| s >= 500)
            }
            Self::Request(_) => true, // connection errors may be transient
            Self::Io(_) => true,
            _ => false,
        }
    }

    /// Produce a sanitized message safe for echoing back into player chat.
    /// Does not leak backend URLs, proxy addresses, or transport detail.
    pub fn user_message(&self) -> String {
        match self {
            Self::RateLimited => "Rate limit, please try again.".to_string(),
            Self::Upstream { .. } => {
                "The completion backend returned an error, please try again.".to_string()
            }
            Self::AuthFailed(_) => "The completion backend rejected the request.".to_string(),
            Self::SchemaParse(_) => {
                "Something went wrong reading the backend response.".to_string()
            }
            Self::Timeout(_) => {
                "The completion backend took too long, please try again.".to_string()
            }
            Self::Cancelled => "Request cancelled.".to_string(),
            Self::Request(_) | Self::Io(_) => {
                "Could not reach the completion backend, please try again.".to_string()
            }
            Self::EmptyPrompt => "Give me something to work with first.".to_string(),
            Self::Config(msg) => format!("config error: {msg}"),
        }
    }
}
