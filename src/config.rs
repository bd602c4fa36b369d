use std::env;
use std::net::SocketAddr;
use std::path::Path;
use std::time::Duration;

use serde::Deserialize;

use crate::backend::{BackendMode, RemoteApi};
use crate::error::ConjureError;

/// Remote endpoint the original deployment pointed at. Any OpenAI-shaped
/// chat-completions endpoint works here.
pub const DEFAULT_REMOTE_URL: &str = "https://chatgpt-api.shn.hk/v1/";
pub const DEFAULT_MODEL: &str = "gpt-3.5-turbo";
pub const DEFAULT_PROXY_ADDR: &str = "127.0.0.1:23484";
/// Book title that marks a signed book as a prompt for us.
pub const DEFAULT_BOOK_TITLE: &str = "gpt";
/// One engine tick at 20 TPS.
pub const DEFAULT_TICK_MS: u64 = 50;
pub const DEFAULT_MAX_TOKENS: u64 = 100;
pub const DEFAULT_REQUEST_TIMEOUT_SECS: u64 = 30;

/// Command roots a completion is allowed to run at console privilege.
/// Completions are untrusted input; anything not listed here is dropped
/// before dispatch.
pub const DEFAULT_ALLOWED_COMMANDS: &[&str] = &[
    "say",
    "tell",
    "tellraw",
    "title",
    "time",
    "weather",
    "gamemode",
    "give",
    "summon",
    "setblock",
    "fill",
    "effect",
    "tp",
    "teleport",
    "particle",
    "playsound",
    "xp",
    "clear",
    "difficulty",
    "gamerule",
    "spawnpoint",
];

#[derive(Clone, Debug)]
pub struct Config {
    pub remote: RemoteConfig,
    pub proxy: ProxyConfig,
    /// Backend selected at startup; toggled at runtime through the bridge.
    pub mode: BackendMode,
    pub book_title: String,
    pub tick_interval: Duration,
    pub allowed_commands: Vec<String>,
}

#[derive(Clone, Debug)]
pub struct RemoteConfig {
    pub url: String,
    pub api: RemoteApi,
    pub model: String,
    pub max_tokens: u64,
    /// Optional bearer token. The reference endpoint is keyless.
    pub api_key: Option<String>,
    pub request_timeout: Duration,
}

#[derive(Clone, Debug)]
pub struct ProxyConfig {
    pub addr: SocketAddr,
    pub read_timeout: Duration,
}

/// On-disk shape of `conjure.toml`. Everything optional — the file itself
/// is optional, and env vars override whatever it sets.
#[derive(Debug, Default, Deserialize)]
#[serde(deny_unknown_fields)]
struct FileConfig {
    remote_url: Option<String>,
    remote_api: Option<RemoteApi>,
    model: Option<String>,
    max_tokens: Option<u64>,
    api_key: Option<String>,
    request_timeout_secs: Option<u64>,
    proxy_addr: Option<String>,
    proxy_read_timeout_secs: Option<u64>,
    mode: Option<BackendMode>,
    book_title: Option<String>,
    tick_ms: Option<u64>,
    allowed_commands: Option<Vec<String>>,
}

impl Config {
    /// Load configuration: `conjure.toml` (or `$CONJURE_CONFIG`) if present,
    /// then env var overrides, then defaults for anything still unset.
    pub fn load() -> Result<Self, ConjureError> {
        let path = env::var("CONJURE_CONFIG").unwrap_or_else(|_| "conjure.toml".to_string());
        let mut file = FileConfig::default();

        if Path::new(&path).exists() {
            let raw = std::fs::read_to_string(&path)
                .map_err(|e| ConjureError::Config(format!("failed to read {path}: {e}")))?;
            file = toml::from_str(&raw)
                .map_err(|e| ConjureError::Config(format!("failed to parse {path}: {e}")))?;
            tracing::info!(path = %path, "loaded config file");
        } else {
            tracing::debug!(path = %path, "no config file, using env and defaults");
        }

        Self::from_file_and_env(file)
    }

    fn from_file_and_env(file: FileConfig) -> Result<Self, ConjureError> {
        let remote_url = env::var("CONJURE_REMOTE_URL")
            .ok()
            .or(file.remote_url)
            .unwrap_or_else(|| DEFAULT_REMOTE_URL.to_string());

        let api = match env::var("CONJURE_REMOTE_API") {
            Ok(raw) => raw.parse()?,
            Err(_) => file.remote_api.unwrap_or_default(),
        };

        let model = env::var("CONJURE_MODEL")
            .ok()
            .or(file.model)
            .unwrap_or_else(|| DEFAULT_MODEL.to_string());

        let api_key = env::var("CONJURE_API_KEY").ok().or(file.api_key);
        if api_key.is_none() {
            tracing::debug!("CONJURE_API_KEY not set — sending unauthenticated requests");
        }

        let max_tokens = parse_env_u64("CONJURE_MAX_TOKENS")?
            .or(file.max_tokens)
            .unwrap_or(DEFAULT_MAX_TOKENS);

        let request_timeout_secs = parse_env_u64("CONJURE_REQUEST_TIMEOUT_SECS")?
            .or(file.request_timeout_secs)
            .unwrap_or(DEFAULT_REQUEST_TIMEOUT_SECS);
        if request_timeout_secs == 0 {
            return Err(ConjureError::Config(
                "request timeout must be non-zero".to_string(),
            ));
        }

        let proxy_addr_raw = env::var("CONJURE_PROXY_ADDR")
            .ok()
            .or(file.proxy_addr)
            .unwrap_or_else(|| DEFAULT_PROXY_ADDR.to_string());
        let proxy_addr: SocketAddr = proxy_addr_raw
            .parse()
            .map_err(|e| ConjureError::Config(format!("bad proxy address {proxy_addr_raw}: {e}")))?;

        let proxy_read_timeout_secs = parse_env_u64("CONJURE_PROXY_READ_TIMEOUT_SECS")?
            .or(file.proxy_read_timeout_secs)
            .unwrap_or(DEFAULT_REQUEST_TIMEOUT_SECS);
        if proxy_read_timeout_secs == 0 {
            return Err(ConjureError::Config(
                "proxy read timeout must be non-zero".to_string(),
            ));
        }

        let mode = match env::var("CONJURE_MODE") {
            Ok(raw) => raw.parse()?,
            Err(_) => file.mode.unwrap_or_default(),
        };

        let book_title = env::var("CONJURE_BOOK_TITLE")
            .ok()
            .or(file.book_title)
            .unwrap_or_else(|| DEFAULT_BOOK_TITLE.to_string());

        let tick_ms = parse_env_u64("CONJURE_TICK_MS")?
            .or(file.tick_ms)
            .unwrap_or(DEFAULT_TICK_MS);
        if tick_ms == 0 {
            return Err(ConjureError::Config(
                "tick interval must be non-zero".to_string(),
            ));
        }

        let allowed_commands = file.allowed_commands.unwrap_or_else(|| {
            DEFAULT_ALLOWED_COMMANDS
                .iter()
                .map(|s| s.to_string())
                .collect()
        });
        if allowed_commands.is_empty() {
            tracing::warn!("allowed_commands is empty — every completion will be dropped");
        }

        Ok(Config {
            remote: RemoteConfig {
                url: remote_url,
                api,
                model,
                max_tokens,
                api_key,
                request_timeout: Duration::from_secs(request_timeout_secs),
            },
            proxy: ProxyConfig {
                addr: proxy_addr,
                read_timeout: Duration::from_secs(proxy_read_timeout_secs),
            },
            mode,
            book_title,
            tick_interval: Duration::from_millis(tick_ms),
            allowed_commands,
        })
    }
}

impl Default for Config {
    fn default() -> Self {
        Config {
            remote: RemoteConfig {
                url: DEFAULT_REMOTE_URL.to_string(),
                api: RemoteApi::default(),
                model: DEFAULT_MODEL.to_string(),
                max_tokens: DEFAULT_MAX_TOKENS,
                api_key: None,
                request_timeout: Duration::from_secs(DEFAULT_REQUEST_TIMEOUT_SECS),
            },
            proxy: ProxyConfig {
                addr: DEFAULT_PROXY_ADDR.parse().expect("default proxy addr is valid"),
                read_timeout: Duration::from_secs(DEFAULT_REQUEST_TIMEOUT_SECS),
            },
            mode: BackendMode::default(),
            book_title: DEFAULT_BOOK_TITLE.to_string(),
            tick_interval: Duration::from_millis(DEFAULT_TICK_MS),
            allowed_commands: DEFAULT_ALLOWED_COMMANDS
                .iter()
                .map(|s| s.to_string())
                .collect(),
        }
    }
}

fn parse_env_u64(var: &str) -> Result<Option<u64>, ConjureError> {
    match env::var(var) {
        Ok(raw) => raw
            .parse()
            .map(Some)
            .map_err(|e| ConjureError::Config(format!("bad {var}={raw}: {e}"))),
        Err(_) => Ok(None),
    }
}
