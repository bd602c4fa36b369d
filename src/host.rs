//! Host-boundary traits. The game server owns chat delivery and command
//! execution; the bridge only ever talks to these. The console types below
//! are the stand-ins the bundled binary runs against.

/// Delivers a message back to the triggering player.
pub trait ChatSink: Send + Sync {
    fn send(&self, message: &str);
}

/// Runs one sanitized command at console privilege.
pub trait CommandExecutor: Send + Sync {
    fn dispatch(&self, command: &str);
}

/// A signed-book edit as delivered by the host.
#[derive(Clone, Debug)]
pub struct BookEdit {
    pub title: String,
    pub pages: Vec<String>,
}

impl BookEdit {
    pub fn new(title: impl Into<String>, pages: Vec<String>) -> Self {
        Self {
            title: title.into(),
            pages,
        }
    }

    pub fn first_page(&self) -> Option<&str> {
        self.pages.first().map(String::as_str)
    }
}

/// Chat sink that prints to stdout.
pub struct ConsoleSink;

impl ChatSink for ConsoleSink {
    fn send(&self, message: &str) {
        println!("{message}");
    }
}

/// Executor that echoes commands instead of running them in an engine.
pub struct ConsoleExecutor;

impl CommandExecutor for ConsoleExecutor {
    fn dispatch(&self, command: &str) {
        println!("COMMAND: {command}");
    }
}
