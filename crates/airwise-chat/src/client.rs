//! Chat completion client over the Groq OpenAI-compatible API

use crate::config::ClientConfig;
use crate::error::ApiError;
use serde::{Deserialize, Serialize};

/// Assistant text plus the endpoint's own timing when it reports one
#[derive(Debug, Clone, PartialEq)]
pub struct ChatReply {
    pub content: String,
    /// Seconds, from `usage.total_time`
    pub service_time: Option<f64>,
}

/// Stateless request/response to a chat completion endpoint
pub trait ChatClient {
    fn complete(&self, system_prompt: &str, user_query: &str) -> Result<ChatReply, ApiError>;
}

impl<T: ChatClient + ?Sized> ChatClient for &T {
    fn complete(&self, system_prompt: &str, user_query: &str) -> Result<ChatReply, ApiError> {
        (**self).complete(system_prompt, user_query)
    }
}

#[derive(Debug, Serialize)]
pub(crate) struct ChatCompletionRequest<'a> {
    pub model: &'a str,
    pub temperature: f32,
    pub messages: [RequestMessage<'a>; 2],
}

#[derive(Debug, Serialize)]
pub(crate) struct RequestMessage<'a> {
    pub role: &'static str,
    pub content: &'a str,
}

#[derive(Debug, Deserialize)]
struct ChatCompletionResponse {
    #[serde(default)]
    choices: Vec<Choice>,
    usage: Option<Usage>,
}

#[derive(Debug, Deserialize)]
struct Choice {
    message: Option<ResponseMessage>,
}

#[derive(Debug, Deserialize)]
struct ResponseMessage {
    content: Option<String>,
}

#[derive(Debug, Deserialize)]
struct Usage {
    total_time: Option<f64>,
}

pub(crate) fn build_request<'a>(
    config: &'a ClientConfig,
    system_prompt: &'a str,
    user_query: &'a str,
) -> ChatCompletionRequest<'a> {
    ChatCompletionRequest {
        model: &config.model,
        temperature: config.temperature,
        messages: [
            RequestMessage {
                role: "system",
                content: system_prompt,
            },
            RequestMessage {
                role: "user",
                content: user_query,
            },
        ],
    }
}

pub(crate) fn parse_reply(body: &str) -> Result<ChatReply, ApiError> {
    let response: ChatCompletionResponse = serde_json::from_str(body)?;
    let content = response
        .choices
        .into_iter()
        .next()
        .and_then(|choice| choice.message)
        .and_then(|message| message.content)
        .filter(|content| !content.trim().is_empty())
        .ok_or(ApiError::EmptyReply)?;
    let service_time = response
        .usage
        .and_then(|usage| usage.total_time)
        .filter(|t| t.is_finite());

    Ok(ChatReply {
        content,
        service_time,
    })
}

/// Groq chat completions over a single blocking HTTP client
pub struct GroqClient {
    http: reqwest::blocking::Client,
    config: ClientConfig,
}

impl GroqClient {
    pub fn new(config: ClientConfig) -> Result<Self, ApiError> {
        let http = reqwest::blocking::Client::builder()
            .timeout(config.timeout)
            .build()
            .map_err(ApiError::Request)?;
        Ok(Self { http, config })
    }

    pub fn config(&self) -> &ClientConfig {
        &self.config
    }

    fn map_transport(&self, err: reqwest::Error) -> ApiError {
        if err.is_timeout() {
            ApiError::Timeout(self.config.timeout)
        } else {
            ApiError::Request(err)
        }
    }
}

impl ChatClient for GroqClient {
    fn complete(&self, system_prompt: &str, user_query: &str) -> Result<ChatReply, ApiError> {
        let request = build_request(&self.config, system_prompt, user_query);
        tracing::debug!(
            model = %self.config.model,
            prompt_chars = system_prompt.len(),
            "sending chat completion"
        );

        let response = self
            .http
            .post(self.config.completions_url())
            .bearer_auth(&self.config.api_key)
            .json(&request)
            .send()
            .map_err(|e| self.map_transport(e))?;

        let status = response.status();
        let body = response.text().map_err(|e| self.map_transport(e))?;
        if !status.is_success() {
            return Err(ApiError::Status {
                status: status.as_u16(),
                body,
            });
        }
        parse_reply(&body)
    }
}
