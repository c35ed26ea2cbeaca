//! Interactive chat session over a fixed grounding context

use crate::client::ChatClient;
use airwise_core::GroundingContext;
use airwise_telemetry::{append_record, TranscriptRecord, TranscriptRole};
use chrono::{DateTime, Local};
use std::path::PathBuf;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Role {
    User,
    Assistant,
}

#[derive(Debug, Clone, PartialEq)]
pub struct ChatTurn {
    pub role: Role,
    pub content: String,
    pub timestamp: DateTime<Local>,
}

/// One conversation. The model only ever sees the system prompt and the
/// latest question; the history is kept for display.
pub struct ChatSession<C> {
    client: C,
    context: GroundingContext,
    history: Vec<ChatTurn>,
    transcript: Option<PathBuf>,
}

impl<C: ChatClient> ChatSession<C> {
    /// Starts with the greeting as the first assistant turn
    pub fn new(client: C, context: GroundingContext) -> Self {
        let greeting = ChatTurn {
            role: Role::Assistant,
            content: context.greeting(),
            timestamp: Local::now(),
        };
        Self {
            client,
            context,
            history: vec![greeting],
            transcript: None,
        }
    }

    /// Append every user and assistant turn to a CSV transcript
    pub fn with_transcript(mut self, path: impl Into<PathBuf>) -> Self {
        self.transcript = Some(path.into());
        self
    }

    pub fn history(&self) -> &[ChatTurn] {
        &self.history
    }

    pub fn context(&self) -> &GroundingContext {
        &self.context
    }

    /// Run one turn. Always yields displayable text; API failures become an
    /// inline error message.
    pub fn submit(&mut self, user_text: &str) -> String {
        self.record(Role::User, user_text.to_string());

        let system_prompt = self.context.system_prompt();
        let reply = match self.client.complete(&system_prompt, user_text) {
            Ok(reply) => reply.content,
            Err(e) => {
                tracing::warn!(error = %e, "chat completion failed");
                format!(
                    "An API error occurred: {}. If this persists, check your API key and rate limits.",
                    e
                )
            }
        };

        self.record(Role::Assistant, reply.clone());
        reply
    }

    fn record(&mut self, role: Role, content: String) {
        if let Some(path) = &self.transcript {
            let log_role = match role {
                Role::User => TranscriptRole::User,
                Role::Assistant => TranscriptRole::Assistant,
            };
            if let Err(e) = append_record(path, &TranscriptRecord::new(log_role, content.as_str())) {
                tracing::warn!("Could not log message to CSV: {}", e);
            }
        }
        self.history.push(ChatTurn {
            role,
            content,
            timestamp: Local::now(),
        });
    }
}
