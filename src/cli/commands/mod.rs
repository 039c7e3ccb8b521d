//! CLI commands implementation.
//!
//! This module contains the CLI parser and dispatches to command-specific modules.

mod check;
mod evaluate;
mod extract;

use std::path::PathBuf;

use clap::{Parser, Subcommand};

use crate::config::{load_config, LoadOptions};
use crate::llm::PromptKind;

#[derive(Parser)]
#[command(name = "resume-match")]
#[command(about = "Match a resume PDF against a job description")]
#[command(version)]
pub struct Cli {
    /// Config file path (overrides auto-discovery)
    #[arg(short, long, global = true)]
    config: Option<PathBuf>,

    /// Enable verbose logging
    #[arg(short, long, global = true)]
    pub verbose: bool,

    #[command(subcommand)]
    command: Commands,
}

/// Check if verbose mode is enabled (for early logging setup).
pub fn is_verbose() -> bool {
    std::env::args().any(|arg| arg == "-v" || arg == "--verbose")
}

#[derive(Subcommand)]
enum Commands {
    /// Extract text from a resume PDF (text layer, or OCR of page 1 for scans)
    Extract {
        /// PDF file to read
        file: PathBuf,
        /// Output the full result as JSON (preview image base64-encoded)
        #[arg(long)]
        json: bool,
        /// Write the page 1 preview image here when OCR was used
        #[arg(long)]
        preview: Option<PathBuf>,
    },

    /// Evaluate a resume against a job description with an LLM
    Evaluate {
        /// Resume PDF
        file: PathBuf,
        /// File containing the job description
        #[arg(short, long, conflicts_with = "job_text", required_unless_present = "job_text")]
        job: Option<PathBuf>,
        /// Job description given inline
        #[arg(long)]
        job_text: Option<String>,
        /// Kind of evaluation to request
        #[arg(short, long, value_enum, default_value = "review")]
        prompt: PromptKind,
    },

    /// Check if required PDF/OCR tools and the LLM API key are available
    Check,
}

/// Run the CLI.
pub async fn run() -> anyhow::Result<()> {
    let cli = Cli::parse();

    let options = LoadOptions {
        config_path: cli.config,
    };
    let config = load_config(&options).await?;

    match cli.command {
        Commands::Extract {
            file,
            json,
            preview,
        } => extract::cmd_extract(&config, &file, json, preview.as_deref()).await,
        Commands::Evaluate {
            file,
            job,
            job_text,
            prompt,
        } => {
            let job_description = match (job, job_text) {
                (Some(path), _) => std::fs::read_to_string(&path).map_err(|e| {
                    anyhow::anyhow!("Failed to read job description {}: {}", path.display(), e)
                })?,
                (None, Some(text)) => text,
                (None, None) => {
                    anyhow::bail!("A job description is required (--job or --job-text)")
                }
            };
            evaluate::cmd_evaluate(&config, &file, &job_description, prompt).await
        }
        Commands::Check => check::cmd_check(&config).await,
    }
}
