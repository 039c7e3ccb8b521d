//! Prompts for resume evaluation.

use serde::{Deserialize, Serialize};

/// System message sent with every evaluation request.
pub const SYSTEM_PROMPT: &str =
    "You are an experienced Technical Human Resource Manager and ATS expert.";

/// Strengths and weaknesses review.
pub const REVIEW_PROMPT: &str = r#"You are an experienced Technical Human Resource Manager.
Review the provided resume against the job description.
Highlight strengths and weaknesses of the applicant in relation to the job."#;

/// ATS-style percentage match.
pub const PERCENTAGE_MATCH_PROMPT: &str = r#"You are an ATS (Applicant Tracking System) scanner with deep knowledge of resume screening.
Evaluate the resume against the provided job description.
Return output in this format:
1. Percentage Match
2. Missing Keywords
3. Final Thoughts"#;

/// Which evaluation to ask the model for.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize, clap::ValueEnum)]
#[serde(rename_all = "kebab-case")]
pub enum PromptKind {
    /// Strengths and weaknesses of the applicant.
    #[default]
    Review,
    /// Percentage match, missing keywords, final thoughts.
    #[value(name = "match")]
    #[serde(rename = "match")]
    PercentageMatch,
}

impl PromptKind {
    pub fn instructions(&self) -> &'static str {
        match self {
            PromptKind::Review => REVIEW_PROMPT,
            PromptKind::PercentageMatch => PERCENTAGE_MATCH_PROMPT,
        }
    }

    /// Heading under which the result is presented.
    pub fn title(&self) -> &'static str {
        match self {
            PromptKind::Review => "Evaluation Result",
            PromptKind::PercentageMatch => "Matching Result",
        }
    }
}

/// Assemble the user message from the instructions, job description and resume.
///
/// User-supplied text is inserted verbatim; braces in it are never treated
/// as placeholders.
pub fn build_prompt(kind: PromptKind, job_description: &str, resume: &str) -> String {
    format!(
        "{}\n\nJob Description: {}\n\nResume Text (extracted from PDF):\n{}\n\n\
         Please analyze the resume text against the job description and provide your response.",
        kind.instructions(),
        job_description,
        resume
    )
}
