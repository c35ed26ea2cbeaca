use std::time::Duration;

/// Chat endpoint failure. Recoverable: callers turn it into visible text.
#[derive(Debug, thiserror::Error)]
pub enum ApiError {
    #[error("request to chat endpoint failed: {0}")]
    Request(#[source] reqwest::Error),

    #[error("chat endpoint did not answer within {0:?}")]
    Timeout(Duration),

    #[error("chat endpoint returned HTTP {status}: {body}")]
    Status { status: u16, body: String },

    #[error("could not decode chat response: {0}")]
    Decode(#[from] serde_json::Error),

    #[error("chat endpoint returned no content")]
    EmptyReply,
}
