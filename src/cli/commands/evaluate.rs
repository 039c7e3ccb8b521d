//! Resume evaluation command.

use std::path::Path;

use console::style;

use crate::cli::helpers::{describe_ingestion_error, read_document, run_extraction, spinner};
use crate::config::Config;
use crate::llm::{EvaluationGateway, LlmClient, PromptKind};

/// Extract a resume and ask the LLM to evaluate it against a job description.
pub async fn cmd_evaluate(
    config: &Config,
    file: &Path,
    job_description: &str,
    kind: PromptKind,
) -> anyhow::Result<()> {
    if job_description.trim().is_empty() {
        anyhow::bail!("Job description is empty");
    }
    if !config.llm.has_api_key() {
        anyhow::bail!("No LLM API key configured. Set GROQ_API_KEY (a .env file works too).");
    }

    let bytes = read_document(config, file)?;
    let result = match run_extraction(config, bytes).await? {
        Ok(result) => result,
        Err(e) => {
            eprintln!("{}", describe_ingestion_error(&e));
            anyhow::bail!("Not evaluating: text extraction failed");
        }
    };

    if !result.has_text() {
        anyhow::bail!(
            "No text could be found in {}, nothing to evaluate",
            file.display()
        );
    }
    tracing::info!(
        "Extracted {} chars via {}",
        result.text().len(),
        result.source()
    );

    let client = LlmClient::new(config.llm.clone())?;
    let pb = spinner(format!("Asking {}...", config.llm.model));
    let response = client
        .evaluate(job_description, result.text(), kind)
        .await;
    pb.finish_and_clear();

    let response = response?;
    println!("{}\n", style(kind.title()).bold());
    println!("{}", response.trim());
    Ok(())
}
