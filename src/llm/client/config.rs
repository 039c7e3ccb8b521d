//! LLM client configuration.

use serde::{Deserialize, Serialize};

/// Configuration for the evaluation client.
///
/// Any OpenAI-compatible chat completions API works; Groq is the default.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct LlmConfig {
    /// API base URL (`/v1/chat/completions` is appended)
    #[serde(default = "default_endpoint")]
    pub endpoint: String,
    /// API key, normally supplied through the environment
    #[serde(default, skip_serializing)]
    pub api_key: Option<String>,
    /// Model to use for evaluation
    #[serde(default = "default_model")]
    pub model: String,
    /// Maximum tokens in response
    #[serde(default = "default_max_tokens")]
    pub max_tokens: u32,
    /// Temperature for generation (0.0 - 1.0)
    #[serde(default = "default_temperature")]
    pub temperature: f32,
    /// Maximum characters of resume text to send to the LLM
    #[serde(default = "default_max_content_chars")]
    pub max_content_chars: usize,
    /// Request timeout in seconds
    #[serde(default = "default_timeout_secs")]
    pub timeout_secs: u64,
}

fn default_endpoint() -> String {
    "https://api.groq.com/openai".to_string()
}

fn default_model() -> String {
    "llama-3.3-70b-versatile".to_string()
}

fn default_max_tokens() -> u32 {
    1024
}

fn default_temperature() -> f32 {
    0.1
}

fn default_max_content_chars() -> usize {
    24000
}

fn default_timeout_secs() -> u64 {
    120
}

impl Default for LlmConfig {
    fn default() -> Self {
        Self::base_default().with_env_overrides()
    }
}

impl LlmConfig {
    /// Base default without env overrides.
    fn base_default() -> Self {
        Self {
            endpoint: default_endpoint(),
            api_key: None,
            model: default_model(),
            max_tokens: default_max_tokens(),
            temperature: default_temperature(),
            max_content_chars: default_max_content_chars(),
            timeout_secs: default_timeout_secs(),
        }
    }

    /// Apply environment variable overrides.
    ///
    /// Supported env vars:
    /// - `LLM_API_KEY` or `GROQ_API_KEY`: API key (`LLM_API_KEY` wins)
    /// - `LLM_ENDPOINT`: API base URL
    /// - `LLM_MODEL`: Model name
    /// - `LLM_MAX_TOKENS`: Maximum tokens in response
    /// - `LLM_TEMPERATURE`: Generation temperature (0.0-1.0)
    /// - `LLM_MAX_CONTENT_CHARS`: Max resume chars to send
    pub fn with_env_overrides(mut self) -> Self {
        if let Some(key) = non_empty_env("LLM_API_KEY").or_else(|| non_empty_env("GROQ_API_KEY")) {
            self.api_key = Some(key);
        }
        if let Some(endpoint) = non_empty_env("LLM_ENDPOINT") {
            self.endpoint = endpoint;
        }
        if let Some(model) = non_empty_env("LLM_MODEL") {
            self.model = model;
        }
        if let Some(n) = non_empty_env("LLM_MAX_TOKENS").and_then(|v| v.parse().ok()) {
            self.max_tokens = n;
        }
        if let Some(t) = non_empty_env("LLM_TEMPERATURE").and_then(|v| v.parse().ok()) {
            self.temperature = t;
        }
        if let Some(n) = non_empty_env("LLM_MAX_CONTENT_CHARS").and_then(|v| v.parse().ok()) {
            self.max_content_chars = n;
        }
        self
    }

    pub fn with_api_key(mut self, api_key: impl Into<String>) -> Self {
        self.api_key = Some(api_key.into());
        self
    }

    pub fn with_endpoint(mut self, endpoint: &str) -> Self {
        self.endpoint = endpoint.to_string();
        self
    }

    /// Full chat completions URL.
    pub fn completions_url(&self) -> String {
        format!("{}/v1/chat/completions", self.endpoint.trim_end_matches('/'))
    }

    pub fn has_api_key(&self) -> bool {
        self.api_key.as_deref().is_some_and(|k| !k.is_empty())
    }
}

fn non_empty_env(name: &str) -> Option<String> {
    std::env::var(name).ok().filter(|v| !v.is_empty())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_base_default_matches_evaluation_settings() {
        let config = LlmConfig::base_default();
        assert_eq!(config.model, "llama-3.3-70b-versatile");
        assert_eq!(config.max_tokens, 1024);
        assert!((config.temperature - 0.1).abs() < f32::EPSILON);
        assert!(!config.has_api_key());
    }

    #[test]
    fn test_completions_url() {
        let config = LlmConfig::base_default().with_endpoint("http://localhost:8080/");
        assert_eq!(
            config.completions_url(),
            "http://localhost:8080/v1/chat/completions"
        );
        assert_eq!(
            LlmConfig::base_default().completions_url(),
            "https://api.groq.com/openai/v1/chat/completions"
        );
    }

    #[test]
    fn test_deserialize_partial_toml() {
        let config: LlmConfig = toml::from_str("model = \"llama-3.1-8b-instant\"").unwrap();
        assert_eq!(config.model, "llama-3.1-8b-instant");
        assert_eq!(config.max_tokens, 1024);
        assert!(config.api_key.is_none());
    }
}
