use std::sync::{Arc, Mutex, RwLock};

use tokio_util::sync::CancellationToken;

use crate::backend::{BackendMode, CompletionClient};
use crate::config::Config;
use crate::error::ConjureError;
use crate::host::{BookEdit, ChatSink};
use crate::parse;
use crate::prompt;
use crate::queue::CommandQueue;

/// Orchestrates the prompt cycle: trigger → completion backend → parser →
/// queue swap. Backend calls run on spawned tasks, so the tick-driving
/// thread in a real host never blocks on the network.
#[derive(Clone)]
pub struct Bridge {
    client: Arc<CompletionClient>,
    queue: Arc<CommandQueue>,
    mode: Arc<RwLock<BackendMode>>,
    book_title: String,
    /// Token for the most recent in-flight request; kill cancels it.
    inflight: Arc<Mutex<CancellationToken>>,
}

impl Bridge {
    pub fn new(config: &Config, queue: Arc<CommandQueue>) -> Self {
        Self {
            client: Arc::new(CompletionClient::new(config)),
            queue,
            mode: Arc::new(RwLock::new(config.mode)),
            book_title: config.book_title.clone(),
            inflight: Arc::new(Mutex::new(CancellationToken::new())),
        }
    }

    pub fn mode(&self) -> BackendMode {
        *self.mode.read().expect("mode lock poisoned")
    }

    pub fn set_mode(&self, mode: BackendMode) {
        *self.mode.write().expect("mode lock poisoned") = mode;
    }

    fn toggle_mode(&self) -> BackendMode {
        let mut guard = self.mode.write().expect("mode lock poisoned");
        *guard = guard.toggled();
        *guard
    }

    /// Clear queued commands and cancel any in-flight request.
    pub fn kill(&self) {
        self.queue.cancel();
        self.inflight.lock().expect("inflight lock poisoned").cancel();
        tracing::info!("command queue cleared");
    }

    /// Chat-command trigger. First argument `kill` clears the queue,
    /// `local`/`proxy` toggles the backend mode, anything else is prompt
    /// text. Prompt submission is spawned; this never blocks the caller.
    pub fn handle_chat(&self, args: &[String], sink: Arc<dyn ChatSink>) {
        match args.first().map(String::as_str) {
            None => sink.send("Usage: gpt <kill | local | proxy | prompt text>"),
            Some("kill") => {
                self.kill();
                sink.send("Cleared queued commands.");
            }
            Some("local") | Some("proxy") => {
                let mode = self.toggle_mode();
                tracing::info!(mode = mode.name(), "backend mode toggled");
                sink.send(&format!("Backend mode is now {}.", mode.name()));
            }
            Some(_) => {
                let text = args.join(" ");
                self.spawn_submit(text, sink);
            }
        }
    }

    /// Book trigger: a signed book whose title matches the configured
    /// sentinel submits its first page as the prompt. Other books are
    /// ignored.
    pub fn handle_book(&self, book: &BookEdit, sink: Arc<dyn ChatSink>) {
        if book.title != self.book_title {
            return;
        }

        sink.send("Processing prompt...");
        match book.first_page() {
            Some(page) => self.spawn_submit(page.to_string(), sink),
            None => sink.send(&ConjureError::EmptyPrompt.user_message()),
        }
    }

    fn spawn_submit(&self, user_text: String, sink: Arc<dyn ChatSink>) {
        let bridge = self.clone();
        tokio::spawn(async move {
            bridge.submit(user_text, sink).await;
        });
    }

    /// Run one full prompt cycle. On success the parsed sequence atomically
    /// replaces the queue; on failure the queue is cleared and the player
    /// gets the error's chat text.
    pub async fn submit(&self, user_text: String, sink: Arc<dyn ChatSink>) {
        let full_prompt = match prompt::build_prompt(&user_text) {
            Ok(p) => p,
            Err(e) => {
                sink.send(&e.user_message());
                return;
            }
        };

        // Mode is captured once so the response parses under the delimiter
        // convention of the backend that produced it, even if toggled
        // mid-flight.
        let mode = self.mode();
        let token = self.replace_inflight();

        let result = tokio::select! {
            _ = token.cancelled() => Err(ConjureError::Cancelled),
            r = self.client.complete(&full_prompt, mode) => r,
        };

        match result {
            Ok(raw) => {
                let commands = parse::parse_completion(&raw, mode);
                let listed: Vec<&str> = commands
                    .iter()
                    .filter(|c| !c.is_empty())
                    .map(String::as_str)
                    .collect();
                tracing::info!(
                    mode = mode.name(),
                    total = commands.len(),
                    non_empty = listed.len(),
                    "queueing parsed commands"
                );
                sink.send(&format!("[{}]", listed.join(", ")));
                self.queue.set(commands);
            }
            Err(ConjureError::Cancelled) => {
                tracing::debug!("request cancelled before completion");
            }
            Err(e) => {
                tracing::warn!(mode = mode.name(), error = %e, "completion request failed");
                self.queue.cancel();
                sink.send(&e.user_message());
            }
        }
    }

    /// Swap in a fresh cancellation token, cancelling the previous one so a
    /// superseded request can never deliver a stale sequence.
    fn replace_inflight(&self) -> CancellationToken {
        let mut guard = self.inflight.lock().expect("inflight lock poisoned");
        guard.cancel();
        *guard = CancellationToken::new();
        guard.clone()
    }
}
