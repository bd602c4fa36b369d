use std::time::Duration;

use reqwest::Client;
use serde::Deserialize;

use crate::backend::RemoteApi;
use crate::config::RemoteConfig;
use crate::error::ConjureError;

pub const MAX_RESPONSE_BYTES: usize = 2 * 1024 * 1024; // 2MB

/// Remote HTTPS completion backend. Speaks either the chat-completions or
/// the legacy prompt body, per config, and parses the response structurally
/// — a missing content field is a typed error, never sentinel text.
pub struct HttpBackend {
    client: Client,
    config: RemoteConfig,
}

#[derive(Deserialize)]
struct ChatCompletion {
    choices: Vec<ChatChoice>,
}

#[derive(Deserialize)]
struct ChatChoice {
    message: ChatMessage,
}

#[derive(Deserialize)]
struct ChatMessage {
    content: Option<String>,
}

#[derive(Deserialize)]
struct TextCompletion {
    choices: Vec<TextChoice>,
}

#[derive(Deserialize)]
struct TextChoice {
    text: Option<String>,
}

impl HttpBackend {
    pub fn new(config: RemoteConfig) -> Self {
        let client = Client::builder()
            .connect_timeout(Duration::from_secs(10))
            .pool_idle_timeout(Duration::from_secs(90))
            .pool_max_idle_per_host(4)
            .build()
            .expect("failed to build HTTP client");

        Self { client, config }
    }

    pub async fn complete(&self, prompt: &str) -> Result<String, ConjureError> {
        // serde builds the body — player text cannot break out of the JSON.
        let body = match self.config.api {
            RemoteApi::Chat => serde_json::json!({
                "model": self.config.model,
                "messages": [{"role": "user", "content": prompt}],
            }),
            RemoteApi::Completions => serde_json::json!({
                "prompt": prompt,
                "max_tokens": self.config.max_tokens,
            }),
        };

        let mut request = self
            .client
            .post(&self.config.url)
            .header("Content-Type", "application/json")
            .timeout(self.config.request_timeout)
            .json(&body);

        if let Some(ref key) = self.config.api_key {
            request = request.header("Authorization", format!("Bearer {key}"));
        }

        let response = request.send().await.map_err(|e| self.map_transport(e))?;
        let status = response.status();

        if status == reqwest::StatusCode::TOO_MANY_REQUESTS {
            return Err(ConjureError::RateLimited);
        }

        if status == reqwest::StatusCode::UNAUTHORIZED
            || status == reqwest::StatusCode::FORBIDDEN
        {
            return Err(ConjureError::AuthFailed(format!("{status}")));
        }

        // Catch-all for any non-success status (4xx, 5xx, 3xx that wasn't followed)
        // Cap error body reads to MAX_RESPONSE_BYTES to prevent memory exhaustion
        if !status.is_success() {
            let error_bytes = response.bytes().await.unwrap_or_default();
            let truncated = &error_bytes[..error_bytes.len().min(MAX_RESPONSE_BYTES)];
            let text = String::from_utf8_lossy(truncated);
            return Err(ConjureError::Upstream {
                message: format!("{status}: {text}"),
                status: Some(status.as_u16()),
            });
        }

        let bytes = response
            .bytes()
            .await
            .map_err(|e| ConjureError::Upstream {
                message: format!("failed to read response body: {e}"),
                status: None,
            })?;

        if bytes.len() > MAX_RESPONSE_BYTES {
            return Err(ConjureError::Upstream {
                message: format!(
                    "response too large: {} bytes (max {})",
                    bytes.len(),
                    MAX_RESPONSE_BYTES
                ),
                status: None,
            });
        }

        let text = match self.config.api {
            RemoteApi::Chat => {
                let completion: ChatCompletion = serde_json::from_slice(&bytes)
                    .map_err(|e| ConjureError::SchemaParse(format!("failed to parse response: {e}")))?;
                completion
                    .choices
                    .into_iter()
                    .next()
                    .and_then(|c| c.message.content)
            }
            RemoteApi::Completions => {
                let completion: TextCompletion = serde_json::from_slice(&bytes)
                    .map_err(|e| ConjureError::SchemaParse(format!("failed to parse response: {e}")))?;
                completion.choices.into_iter().next().and_then(|c| c.text)
            }
        };

        text.filter(|t| !t.is_empty())
            .ok_or_else(|| ConjureError::Upstream {
                message: "empty choices or null content".to_string(),
                status: None,
            })
    }

    fn map_transport(&self, e: reqwest::Error) -> ConjureError {
        if e.is_timeout() {
            ConjureError::Timeout(self.config.request_timeout.as_millis() as u64)
        } else {
            ConjureError::Request(e)
        }
    }
}
