//! Tool availability check.

use console::style;

use crate::config::Config;
use crate::ocr::{check_tools, OcrBackend, TesseractBackend};

/// Report which external tools and credentials are available.
pub async fn cmd_check(config: &Config) -> anyhow::Result<()> {
    println!("\n{}", style("Tool Status").bold());
    println!("{}", "-".repeat(50));

    let mut all_found = true;

    println!("\n{}", style("PATH lookup:").cyan());
    for (tool, available) in check_tools() {
        let status = if available {
            style("✓ found").green()
        } else {
            style("✗ not found").red()
        };
        println!("  {:<15} {}", tool, status);
    }

    println!("\n{}", style("Configured pipeline:").cyan());
    let renderer = crate::ingest::PopplerRenderer::new();
    let renderer = match config.poppler_path() {
        Some(dir) => renderer.with_tool_dir(dir),
        None => renderer,
    };
    if renderer.is_available() {
        println!("  {:<15} {}", "poppler", style("✓ available").green());
    } else {
        all_found = false;
        println!("  {:<15} {}", "poppler", style("✗ not available").red());
    }

    let tesseract = TesseractBackend::with_config(config.ocr_config());
    if tesseract.is_available() {
        println!(
            "  {:<15} {} (lang: {})",
            tesseract.backend_type().as_str(),
            style("✓ available").green(),
            config.ocr_language
        );
    } else {
        all_found = false;
        println!(
            "  {:<15} {}\n    {}",
            tesseract.backend_type().as_str(),
            style("✗ not available").red(),
            tesseract.availability_hint()
        );
    }

    if config.llm.has_api_key() {
        println!(
            "  {:<15} {} ({})",
            "llm",
            style("✓ api key set").green(),
            config.llm.model
        );
    } else {
        all_found = false;
        println!("  {:<15} {}", "llm", style("✗ GROQ_API_KEY not set").red());
    }

    println!();
    if all_found {
        println!("{} Ready to extract and evaluate resumes", style("✓").green());
    } else {
        println!(
            "{} Some components are missing; scanned resumes or evaluation may not work",
            style("!").yellow()
        );
    }
    Ok(())
}
