//! Log record types

use crate::io::CsvRecord;
use chrono::{DateTime, Local};
use serde::{Deserialize, Serialize};

/// Speaker of a transcript row
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum TranscriptRole {
    User,
    Assistant,
    BatchUser,
    BatchAssistant,
}

/// One row of the chat transcript log
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct TranscriptRecord {
    pub timestamp: String,
    pub role: TranscriptRole,
    pub content: String,
}

impl TranscriptRecord {
    pub fn new(role: TranscriptRole, content: impl Into<String>) -> Self {
        Self::at(Local::now(), role, content)
    }

    pub fn at(time: DateTime<Local>, role: TranscriptRole, content: impl Into<String>) -> Self {
        Self {
            timestamp: time.format("%Y-%m-%d %H:%M:%S").to_string(),
            role,
            content: content.into(),
        }
    }
}

impl CsvRecord for TranscriptRecord {
    const HEADER: &'static [&'static str] = &["timestamp", "role", "content"];
}

/// Outcome of one batch query
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum BatchStatus {
    #[serde(rename = "SUCCESS")]
    Success,
    #[serde(rename = "FAILURE")]
    Failure,
}

impl BatchStatus {
    /// Negative latency marks a failed call
    pub fn from_latency(latency_seconds: f64) -> Self {
        if latency_seconds >= 0.0 {
            BatchStatus::Success
        } else {
            BatchStatus::Failure
        }
    }
}

/// One row of the batch results log
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct BatchRecord {
    pub query_id: usize,
    pub query_text: String,
    pub response_text: String,
    pub latency_seconds: f64,
    pub status: BatchStatus,
}

impl CsvRecord for BatchRecord {
    const HEADER: &'static [&'static str] = &[
        "query_id",
        "query_text",
        "response_text",
        "latency_seconds",
        "status",
    ];
}
