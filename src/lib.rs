//! conjure — a bridge that turns free-form player text into tick-paced game
//! commands via a language-model completion backend.
//!
//! Flow: player text → [`bridge::Bridge`] → [`backend::CompletionClient`]
//! → raw completion → [`parse::parse_completion`] → [`queue::CommandQueue`]
//! → [`ticker::Ticker`] → host command executor, one pass per tick.

pub mod backend;
pub mod bridge;
pub mod config;
pub mod error;
pub mod host;
pub mod parse;
pub mod policy;
pub mod prompt;
pub mod queue;
pub mod ticker;
