//! Shared helpers for the external command-line tools (Poppler, Tesseract).

use std::path::{Path, PathBuf};
use std::process::{Command, Output};

pub const PDFINFO_NOT_FOUND: &str = "pdfinfo not found (install poppler-utils)";
pub const PDFTOTEXT_NOT_FOUND: &str = "pdftotext not found (install poppler-utils)";
pub const PDFTOPPM_NOT_FOUND: &str = "pdftoppm not found (install poppler-utils)";
pub const TESSERACT_NOT_FOUND: &str = "tesseract not found (install tesseract-ocr)";

/// Tools the default pipeline shells out to.
pub const REQUIRED_TOOLS: [&str; 4] = ["pdfinfo", "pdftotext", "pdftoppm", "tesseract"];

/// Check if a binary is available in PATH.
pub fn check_binary(name: &str) -> bool {
    which::which(name).is_ok()
}

/// Resolve a tool name against an optional install directory.
///
/// Falls back to the bare name (PATH lookup at spawn time) when the directory
/// does not contain the tool.
pub fn resolve_tool(dir: Option<&Path>, name: &str) -> PathBuf {
    if let Some(dir) = dir {
        for candidate in [name.to_string(), format!("{}.exe", name)] {
            let path = dir.join(candidate);
            if path.is_file() {
                return path;
            }
        }
    }
    PathBuf::from(name)
}

/// Failure to spawn or complete an external tool.
#[derive(Debug)]
pub enum ToolFailure {
    /// The executable could not be found.
    NotFound,
    /// The tool ran and exited unsuccessfully; carries stderr.
    Failed(String),
    /// Any other spawn error.
    Io(std::io::Error),
}

/// Run a command to completion, classifying the failure modes.
pub fn run_tool(command: &mut Command) -> Result<Output, ToolFailure> {
    match command.output() {
        Ok(output) if output.status.success() => Ok(output),
        Ok(output) => Err(ToolFailure::Failed(
            String::from_utf8_lossy(&output.stderr).trim().to_string(),
        )),
        Err(e) if e.kind() == std::io::ErrorKind::NotFound => Err(ToolFailure::NotFound),
        Err(e) => Err(ToolFailure::Io(e)),
    }
}

/// Check if required tools are available.
pub fn check_tools() -> Vec<(String, bool)> {
    REQUIRED_TOOLS
        .iter()
        .map(|tool| (tool.to_string(), check_binary(tool)))
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    #[test]
    fn test_check_tools() {
        let tools = check_tools();
        assert_eq!(tools.len(), REQUIRED_TOOLS.len());
        for (tool, available) in tools {
            println!("{}: {}", tool, if available { "found" } else { "missing" });
        }
    }

    #[test]
    fn test_resolve_tool_without_dir_uses_bare_name() {
        assert_eq!(resolve_tool(None, "pdftoppm"), PathBuf::from("pdftoppm"));
    }

    #[test]
    fn test_resolve_tool_prefers_configured_dir() {
        let temp = TempDir::new().unwrap();
        let tool = temp.path().join("pdftotext");
        std::fs::write(&tool, b"").unwrap();

        assert_eq!(resolve_tool(Some(temp.path()), "pdftotext"), tool);
        assert_eq!(
            resolve_tool(Some(temp.path()), "pdfinfo"),
            PathBuf::from("pdfinfo")
        );
    }

    #[test]
    fn test_run_tool_missing_binary() {
        let result = run_tool(&mut Command::new("definitely-not-a-real-tool-4f1c"));
        assert!(matches!(result, Err(ToolFailure::NotFound)));
    }
}
