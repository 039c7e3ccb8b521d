//! Shared helper functions for CLI commands.

use std::path::Path;
use std::sync::Arc;
use std::time::Duration;

use anyhow::Context;
use console::style;
use indicatif::{ProgressBar, ProgressStyle};

use crate::config::Config;
use crate::ingest::{ExtractionResult, IngestionError, IngestionErrorKind};

/// Create a spinner with a message.
pub fn spinner(message: impl Into<String>) -> ProgressBar {
    let pb = ProgressBar::new_spinner();
    pb.set_style(
        ProgressStyle::default_spinner()
            .template("{spinner:.green} {msg}")
            .unwrap_or_else(|_| ProgressStyle::default_spinner()),
    );
    pb.set_message(message.into());
    pb.enable_steady_tick(Duration::from_millis(100));
    pb
}

/// Read a document from disk, enforcing the configured size limit.
pub fn read_document(config: &Config, path: &Path) -> anyhow::Result<Vec<u8>> {
    let metadata =
        std::fs::metadata(path).with_context(|| format!("File not found: {}", path.display()))?;
    if !config.accepts_document_size(metadata.len()) {
        anyhow::bail!(
            "{} is {} bytes, larger than the configured limit of {} bytes",
            path.display(),
            metadata.len(),
            config.max_document_bytes
        );
    }
    std::fs::read(path).with_context(|| format!("Failed to read {}", path.display()))
}

/// Run the extraction pipeline off the async runtime, bounded by the configured timeout.
///
/// The inner result distinguishes soft (no text) from hard failures; the
/// outer error covers the timeout and a panicked worker.
pub async fn run_extraction(
    config: &Config,
    bytes: Vec<u8>,
) -> anyhow::Result<Result<ExtractionResult, IngestionError>> {
    let ingestor = Arc::new(config.build_ingestor());
    let pb = spinner("Extracting text...");

    let task = tokio::task::spawn_blocking(move || ingestor.extract_or_empty(&bytes));
    let joined = match config.extract_timeout() {
        Some(limit) => match tokio::time::timeout(limit, task).await {
            Ok(joined) => joined,
            Err(_) => {
                pb.finish_and_clear();
                anyhow::bail!("Extraction timed out after {}s", limit.as_secs());
            }
        },
        None => task.await,
    };
    pb.finish_and_clear();

    joined.context("Extraction worker panicked")
}

/// Explain a hard ingestion failure with a hint on how to fix it.
pub fn describe_ingestion_error(err: &IngestionError) -> String {
    let hint = match err.kind() {
        IngestionErrorKind::Unreadable => "The document could not be read.",
        IngestionErrorKind::RendererUnavailable => {
            "Install poppler-utils or set poppler_dir; run `resume-match check`."
        }
        IngestionErrorKind::OcrUnavailable => {
            "Text extraction is unavailable: install tesseract-ocr or set tesseract_cmd; run `resume-match check`."
        }
        IngestionErrorKind::Io => "Check file permissions and free space in the temp directory.",
    };
    format!("{} {}\n  {}", style("✗").red(), err, style(hint).dim())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::ingest::ExtractionSource;

    #[tokio::test]
    async fn test_zero_timeout_runs_extraction_to_completion() {
        let config = Config {
            extract_timeout_secs: 0,
            ..Config::default()
        };

        // Rejected before any external tool runs, so this works without poppler.
        let result = run_extraction(&config, b"plain text, not a pdf".to_vec())
            .await
            .unwrap()
            .unwrap();
        assert_eq!(result.source(), ExtractionSource::None);
    }

    #[test]
    fn test_read_document_enforces_size_limit() {
        let dir = tempfile::TempDir::new().unwrap();
        let path = dir.path().join("resume.pdf");
        std::fs::write(&path, b"%PDF-1.4\n").unwrap();

        let config = Config {
            max_document_bytes: 4,
            ..Config::default()
        };
        assert!(read_document(&config, &path).is_err());

        let config = Config {
            max_document_bytes: 0,
            ..Config::default()
        };
        assert_eq!(read_document(&config, &path).unwrap(), b"%PDF-1.4\n");
    }
}
