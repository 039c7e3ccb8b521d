//! LLM integration for resume evaluation.
//!
//! The extracted resume text and a job description are sent to a chat
//! completions API together with one of the evaluation prompts.

mod client;

pub use client::{
    build_prompt, EvaluationGateway, LlmClient, LlmConfig, LlmError, PromptKind, SYSTEM_PROMPT,
};
