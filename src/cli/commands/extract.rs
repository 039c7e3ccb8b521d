//! Text extraction command.

use std::path::Path;

use console::style;

use crate::cli::helpers::{describe_ingestion_error, read_document, run_extraction};
use crate::config::Config;
use crate::ingest::ExtractionSource;

/// Extract text from a PDF and print it.
pub async fn cmd_extract(
    config: &Config,
    file: &Path,
    json: bool,
    preview: Option<&Path>,
) -> anyhow::Result<()> {
    let bytes = read_document(config, file)?;

    let result = match run_extraction(config, bytes).await? {
        Ok(result) => result,
        Err(e) => {
            eprintln!("{}", describe_ingestion_error(&e));
            return Err(e.into());
        }
    };

    if let Some(preview_path) = preview {
        match result.preview_image() {
            Some(jpeg) => {
                std::fs::write(preview_path, jpeg)?;
                eprintln!(
                    "{} Preview written to {}",
                    style("✓").green(),
                    preview_path.display()
                );
            }
            None => eprintln!(
                "{} No preview image (only produced when OCR is used)",
                style("!").yellow()
            ),
        }
    }

    if json {
        println!("{}", serde_json::to_string_pretty(&result)?);
        return Ok(());
    }

    match result.source() {
        ExtractionSource::TextLayer => {
            eprintln!("{} Extracted text layer", style("✓").green());
        }
        ExtractionSource::Ocr => {
            eprintln!(
                "{} No direct text found, used OCR on page 1",
                style("✓").green()
            );
        }
        ExtractionSource::None => {
            eprintln!(
                "{} No text could be found in {}",
                style("!").yellow(),
                file.display()
            );
        }
    }
    print!("{}", result.text());
    Ok(())
}
