//! Chat completion client, interactive session and batch latency runner

pub mod batch;
mod client;
mod config;
mod error;
pub mod session;

#[cfg(test)]
pub(crate) mod testing;

pub use batch::{parse_queries, read_queries, BatchReport, BatchRunner, LatencySummary, PromptMode};
pub use client::{ChatClient, ChatReply, GroqClient};
pub use config::{ClientConfig, API_KEY_VAR, DEFAULT_MODEL, GROQ_API_BASE};
pub use error::ApiError;
pub use session::{ChatSession, ChatTurn, Role};
