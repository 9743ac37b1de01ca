use std::cell::RefCell;
use std::collections::VecDeque;

use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::config::ServiceConfig;

#[derive(Debug, Error)]
pub enum LlmError {
    #[error("Cannot reach generation service at {0}")]
    Connection(String),

    #[error("Generation request timed out after {0}s")]
    Timeout(u64),

    #[error("Generation service returned error (status {status}): {body}")]
    Api { status: u16, body: String },

    #[error("Cannot parse generation response: {0}")]
    ResponseParsing(String),

    #[error("Generation service returned an empty response")]
    EmptyResponse,

    #[error("HTTP client error: {0}")]
    Transport(String),
}

/// Boundary to the external text-generation service.
///
/// One synchronous call per stage; the orchestrator supplies model and
/// temperature so generation (0.6) and analysis (0.0) calls share a client.
pub trait ChatModel {
    fn complete(&self, model: &str, prompt: &str, temperature: f32) -> Result<String, LlmError>;
}

/// Client for an OpenAI-compatible chat-completions endpoint.
pub struct OpenAiClient {
    base_url: String,
    api_key: String,
    client: reqwest::blocking::Client,
    timeout_secs: u64,
}

impl OpenAiClient {
    pub fn new(base_url: &str, api_key: &str, timeout_secs: u64) -> Self {
        let client = reqwest::blocking::Client::builder()
            .timeout(std::time::Duration::from_secs(timeout_secs))
            .build()
            .expect("Failed to create HTTP client");

        Self {
            base_url: base_url.trim_end_matches('/').to_string(),
            api_key: api_key.to_string(),
            client,
            timeout_secs,
        }
    }

    pub fn from_config(config: &ServiceConfig) -> Self {
        Self::new(&config.base_url, &config.api_key, config.timeout_secs)
    }
}

/// Request body for /v1/chat/completions
#[derive(Serialize)]
struct ChatCompletionRequest<'a> {
    model: &'a str,
    messages: [ChatMessage<'a>; 1],
    temperature: f32,
}

#[derive(Serialize)]
struct ChatMessage<'a> {
    role: &'a str,
    content: &'a str,
}

/// Response body from /v1/chat/completions
#[derive(Deserialize)]
struct ChatCompletionResponse {
    choices: Vec<ChatChoice>,
}

#[derive(Deserialize)]
struct ChatChoice {
    message: ChatChoiceMessage,
}

#[derive(Deserialize)]
struct ChatChoiceMessage {
    content: Option<String>,
}

fn first_content(parsed: ChatCompletionResponse) -> Result<String, LlmError> {
    let content = parsed
        .choices
        .into_iter()
        .next()
        .and_then(|choice| choice.message.content)
        .unwrap_or_default();
    if content.trim().is_empty() {
        return Err(LlmError::EmptyResponse);
    }
    Ok(content)
}

impl ChatModel for OpenAiClient {
    fn complete(&self, model: &str, prompt: &str, temperature: f32) -> Result<String, LlmError> {
        let url = format!("{}/v1/chat/completions", self.base_url);
        let body = ChatCompletionRequest {
            model,
            messages: [ChatMessage {
                role: "user",
                content: prompt,
            }],
            temperature,
        };

        let mut request = self.client.post(&url).json(&body);
        if !self.api_key.is_empty() {
            request = request.bearer_auth(&self.api_key);
        }

        let response = request.send().map_err(|e| {
            if e.is_connect() {
                LlmError::Connection(self.base_url.clone())
            } else if e.is_timeout() {
                LlmError::Timeout(self.timeout_secs)
            } else {
                LlmError::Transport(e.to_string())
            }
        })?;

        let status = response.status();
        if !status.is_success() {
            let body = response.text().unwrap_or_default();
            return Err(LlmError::Api {
                status: status.as_u16(),
                body,
            });
        }

        let parsed: ChatCompletionResponse = response
            .json()
            .map_err(|e| LlmError::ResponseParsing(e.to_string()))?;

        first_content(parsed)
    }
}

// ── Mock for testing ──────────────────────────────────────

/// Record of one call made against [`MockChatModel`].
#[derive(Debug, Clone)]
pub struct MockCall {
    pub model: String,
    pub prompt: String,
    pub temperature: f32,
}

/// Scripted chat model for pipeline tests that need a [`ChatModel`]
/// without a running service. Replies are consumed in script order, one
/// per call; an exhausted script answers [`LlmError::EmptyResponse`].
pub struct MockChatModel {
    replies: RefCell<VecDeque<Result<String, LlmError>>>,
    calls: RefCell<Vec<MockCall>>,
}

impl MockChatModel {
    pub fn new() -> Self {
        Self {
            replies: RefCell::new(VecDeque::new()),
            calls: RefCell::new(Vec::new()),
        }
    }

    /// Mock scripted with a single response.
    pub fn replying(response: &str) -> Self {
        let mock = Self::new();
        mock.push_response(response);
        mock
    }

    pub fn push_response(&self, response: &str) {
        self.replies
            .borrow_mut()
            .push_back(Ok(response.to_string()));
    }

    pub fn push_error(&self, error: LlmError) {
        self.replies.borrow_mut().push_back(Err(error));
    }

    pub fn call_count(&self) -> usize {
        self.calls.borrow().len()
    }

    pub fn calls(&self) -> Vec<MockCall> {
        self.calls.borrow().clone()
    }
}

impl Default for MockChatModel {
    fn default() -> Self {
        Self::new()
    }
}

impl ChatModel for MockChatModel {
    fn complete(&self, model: &str, prompt: &str, temperature: f32) -> Result<String, LlmError> {
        self.calls.borrow_mut().push(MockCall {
            model: model.to_string(),
            prompt: prompt.to_string(),
            temperature,
        });
        self.replies
            .borrow_mut()
            .pop_front()
            .unwrap_or(Err(LlmError::EmptyResponse))
    }
}
