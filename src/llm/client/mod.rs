//! LLM client for resume evaluation.
//!
//! Talks to any OpenAI-compatible chat completions API (Groq by default).

mod config;
mod prompts;

use std::time::Duration;

use async_trait::async_trait;
use reqwest::Client;
use serde::{Deserialize, Serialize};
use tracing::{debug, info};

pub use config::LlmConfig;
pub use prompts::{build_prompt, PromptKind, SYSTEM_PROMPT};

/// Compares a resume against a job description.
#[async_trait]
pub trait EvaluationGateway: Send + Sync {
    async fn evaluate(
        &self,
        job_description: &str,
        resume_text: &str,
        kind: PromptKind,
    ) -> Result<String, LlmError>;
}

/// LLM client for resume evaluation.
pub struct LlmClient {
    config: LlmConfig,
    client: Client,
}

#[derive(Debug, Serialize)]
struct ChatRequest {
    model: String,
    messages: Vec<ChatMessage>,
    max_tokens: u32,
    temperature: f32,
}

#[derive(Debug, Serialize)]
struct ChatMessage {
    role: &'static str,
    content: String,
}

#[derive(Debug, Deserialize)]
struct ChatResponse {
    choices: Option<Vec<ChatChoice>>,
    error: Option<ApiError>,
}

#[derive(Debug, Deserialize)]
struct ChatChoice {
    message: ChatResponseMessage,
}

#[derive(Debug, Deserialize)]
struct ChatResponseMessage {
    content: Option<String>,
}

#[derive(Debug, Deserialize)]
struct ApiError {
    message: String,
}

impl LlmClient {
    /// Create a new LLM client with the given configuration.
    pub fn new(config: LlmConfig) -> Result<Self, LlmError> {
        let client = Client::builder()
            .timeout(Duration::from_secs(config.timeout_secs))
            .build()
            .map_err(|e| LlmError::Connection(e.to_string()))?;

        Ok(Self { config, client })
    }

    /// Get the config.
    pub fn config(&self) -> &LlmConfig {
        &self.config
    }

    /// Truncate content to configured maximum (UTF-8 safe).
    fn truncate_content<'a>(&self, text: &'a str) -> &'a str {
        if text.len() <= self.config.max_content_chars {
            return text;
        }
        // Find a valid UTF-8 boundary at or before max_content_chars
        let mut end = self.config.max_content_chars;
        while end > 0 && !text.is_char_boundary(end) {
            end -= 1;
        }
        &text[..end]
    }

    fn build_request(
        &self,
        job_description: &str,
        resume_text: &str,
        kind: PromptKind,
    ) -> ChatRequest {
        let resume = self.truncate_content(resume_text);
        if resume.len() < resume_text.len() {
            debug!(
                "Truncated resume text from {} to {} bytes",
                resume_text.len(),
                resume.len()
            );
        }

        ChatRequest {
            model: self.config.model.clone(),
            messages: vec![
                ChatMessage {
                    role: "system",
                    content: SYSTEM_PROMPT.to_string(),
                },
                ChatMessage {
                    role: "user",
                    content: build_prompt(kind, job_description, resume),
                },
            ],
            max_tokens: self.config.max_tokens,
            temperature: self.config.temperature,
        }
    }

    /// Call the chat completions API.
    async fn call_chat(&self, request: &ChatRequest) -> Result<String, LlmError> {
        let api_key = self
            .config
            .api_key
            .as_deref()
            .filter(|k| !k.is_empty())
            .ok_or(LlmError::MissingApiKey)?;

        let resp = self
            .client
            .post(self.config.completions_url())
            .bearer_auth(api_key)
            .json(request)
            .send()
            .await
            .map_err(|e| LlmError::Connection(e.to_string()))?;

        if !resp.status().is_success() {
            let status = resp.status();
            let body = resp.text().await.unwrap_or_default();
            return Err(LlmError::Api(format!("HTTP {}: {}", status, body)));
        }

        let chat_resp: ChatResponse = resp
            .json()
            .await
            .map_err(|e| LlmError::Parse(e.to_string()))?;

        parse_chat_response(chat_resp)
    }
}

/// Pull the first completion out of a response body.
fn parse_chat_response(resp: ChatResponse) -> Result<String, LlmError> {
    if let Some(error) = resp.error {
        return Err(LlmError::Api(error.message));
    }

    let text = resp
        .choices
        .and_then(|c| c.into_iter().next())
        .and_then(|c| c.message.content)
        .unwrap_or_default();

    if text.trim().is_empty() {
        return Err(LlmError::Parse("Empty completion".to_string()));
    }
    Ok(text)
}

#[async_trait]
impl EvaluationGateway for LlmClient {
    async fn evaluate(
        &self,
        job_description: &str,
        resume_text: &str,
        kind: PromptKind,
    ) -> Result<String, LlmError> {
        info!("Requesting {:?} evaluation from {}", kind, self.config.model);
        let request = self.build_request(job_description, resume_text, kind);
        self.call_chat(&request).await
    }
}

/// Errors that can occur during LLM operations.
#[derive(Debug)]
pub enum LlmError {
    /// No API key configured
    MissingApiKey,
    /// Failed to connect to LLM service
    Connection(String),
    /// API returned an error
    Api(String),
    /// Failed to parse response
    Parse(String),
}

impl std::fmt::Display for LlmError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            LlmError::MissingApiKey => {
                write!(f, "No API key configured (set GROQ_API_KEY or LLM_API_KEY)")
            }
            LlmError::Connection(msg) => write!(f, "Connection error: {}", msg),
            LlmError::Api(msg) => write!(f, "API error: {}", msg),
            LlmError::Parse(msg) => write!(f, "Parse error: {}", msg),
        }
    }
}

impl std::error::Error for LlmError {}

#[cfg(test)]
mod tests {
    use super::*;

    fn client(max_content_chars: usize) -> LlmClient {
        let mut config = LlmConfig::default().with_api_key("test-key");
        config.max_content_chars = max_content_chars;
        LlmClient::new(config).unwrap()
    }

    #[test]
    fn test_truncate_content_respects_char_boundaries() {
        let client = client(5);
        assert_eq!(client.truncate_content("abc"), "abc");
        // 'é' is two bytes and straddles the limit.
        assert_eq!(client.truncate_content("abcdé"), "abcd");
    }

    #[test]
    fn test_build_request() {
        let client = client(10_000);
        let request = client.build_request("Rust dev", "John Doe", PromptKind::Review);

        assert_eq!(request.messages.len(), 2);
        assert_eq!(request.messages[0].role, "system");
        assert_eq!(request.messages[0].content, SYSTEM_PROMPT);
        assert!(request.messages[1].content.contains("Rust dev"));
        assert!(request.messages[1].content.contains("John Doe"));

        let json = serde_json::to_value(&request).unwrap();
        assert_eq!(json["max_tokens"], client.config().max_tokens);
    }

    #[test]
    fn test_parse_chat_response() {
        let resp: ChatResponse = serde_json::from_str(
            r#"{"choices":[{"message":{"role":"assistant","content":"1. Percentage Match: 80%"}}]}"#,
        )
        .unwrap();
        assert_eq!(parse_chat_response(resp).unwrap(), "1. Percentage Match: 80%");

        let resp: ChatResponse =
            serde_json::from_str(r#"{"error":{"message":"invalid api key"}}"#).unwrap();
        assert!(matches!(
            parse_chat_response(resp),
            Err(LlmError::Api(m)) if m == "invalid api key"
        ));

        let resp: ChatResponse = serde_json::from_str(r#"{"choices":[]}"#).unwrap();
        assert!(matches!(parse_chat_response(resp), Err(LlmError::Parse(_))));
    }

    #[tokio::test]
    async fn test_missing_api_key() {
        let mut config = LlmConfig::default();
        config.api_key = None;
        let client = LlmClient::new(config).unwrap();

        let err = client
            .evaluate("JD", "resume", PromptKind::PercentageMatch)
            .await
            .unwrap_err();
        assert!(matches!(err, LlmError::MissingApiKey));
    }
}
