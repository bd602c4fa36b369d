use tokio::io::{AsyncBufReadExt, AsyncWriteExt, BufReader};
use tokio::net::TcpStream;

use crate::config::ProxyConfig;
use crate::error::ConjureError;

pub const MAX_RESPONSE_BYTES: usize = 2 * 1024 * 1024; // 2MB

/// Local socket proxy backend. Line-oriented plaintext: one connection per
/// request, prompt terminated by a newline, response read line by line until
/// a blank or null line.
pub struct ProxyBackend {
    config: ProxyConfig,
}

impl ProxyBackend {
    pub fn new(config: ProxyConfig) -> Self {
        Self { config }
    }

    pub async fn complete(&self, prompt: &str) -> Result<String, ConjureError> {
        let timeout = self.config.read_timeout;
        tokio::time::timeout(timeout, self.exchange(prompt))
            .await
            .map_err(|_| ConjureError::Timeout(timeout.as_millis() as u64))?
    }

    async fn exchange(&self, prompt: &str) -> Result<String, ConjureError> {
        let mut stream = TcpStream::connect(self.config.addr).await?;
        stream.write_all(prompt.as_bytes()).await?;
        stream.write_all(b"\n").await?;
        stream.flush().await?;

        let mut reader = BufReader::new(stream);
        let mut raw = String::new();
        let mut line = String::new();

        loop {
            line.clear();
            let n = reader.read_line(&mut line).await?;
            if n == 0 {
                break; // EOF
            }

            let body = line.trim_end_matches(['\n', '\r']);
            if body.is_empty() || body.chars().all(|c| c == '\0') {
                break;
            }

            if raw.len() + body.len() > MAX_RESPONSE_BYTES {
                return Err(std::io::Error::new(
                    std::io::ErrorKind::InvalidData,
                    "proxy response too large",
                )
                .into());
            }

            // Each response line lands prefixed with a newline, so the raw
            // completion splits back into the same lines under local mode.
            raw.push('\n');
            raw.push_str(body);
        }

        Ok(raw)
    }
}
