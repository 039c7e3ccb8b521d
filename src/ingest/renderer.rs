//! PDF decoding and rasterization.
//!
//! [`PdfRenderer`] is the capability the pipeline needs from a PDF library.
//! [`PopplerRenderer`] provides it through `pdfinfo`, `pdftotext` and
//! `pdftoppm` from poppler-utils.

use std::path::{Path, PathBuf};
use std::process::Command;

use tracing::debug;

use super::error::{DecodeError, RasterError};
use crate::ocr::tool_utils::{
    check_binary, resolve_tool, run_tool, ToolFailure, PDFINFO_NOT_FOUND, PDFTOPPM_NOT_FOUND,
    PDFTOTEXT_NOT_FOUND,
};

/// Page separator emitted by `pdftotext`.
const FORM_FEED: char = '\u{000C}';

/// Decode a PDF and rasterize its pages.
pub trait PdfRenderer: Send + Sync {
    /// Number of pages in the document.
    fn page_count(&self, pdf_path: &Path) -> Result<u32, DecodeError>;

    /// Text layer of every page, in page order. Pages without text yield "".
    fn page_texts(&self, pdf_path: &Path) -> Result<Vec<String>, DecodeError>;

    /// Render one page (1-based) to a PNG inside `output_dir`, returning its path.
    fn rasterize_page(
        &self,
        pdf_path: &Path,
        page: u32,
        dpi: u32,
        output_dir: &Path,
    ) -> Result<PathBuf, RasterError>;
}

/// Poppler command-line renderer.
#[derive(Debug, Clone, Default)]
pub struct PopplerRenderer {
    /// Directory holding the poppler binaries, when they are not on PATH.
    tool_dir: Option<PathBuf>,
}

impl PopplerRenderer {
    pub fn new() -> Self {
        Self::default()
    }

    /// Use poppler binaries from a specific directory.
    pub fn with_tool_dir(mut self, dir: impl Into<PathBuf>) -> Self {
        self.tool_dir = Some(dir.into());
        self
    }

    fn tool(&self, name: &str) -> PathBuf {
        resolve_tool(self.tool_dir.as_deref(), name)
    }

    /// Whether every poppler tool the pipeline needs can be found.
    pub fn is_available(&self) -> bool {
        ["pdfinfo", "pdftotext", "pdftoppm"].iter().all(|name| {
            let tool = self.tool(name);
            tool.is_file() || check_binary(name)
        })
    }
}

fn decode_failure(failure: ToolFailure, not_found: &str) -> DecodeError {
    match failure {
        ToolFailure::NotFound => DecodeError::ToolNotFound(not_found.to_string()),
        ToolFailure::Failed(stderr) => DecodeError::Unparseable(stderr),
        ToolFailure::Io(e) => DecodeError::Io(e),
    }
}

impl PdfRenderer for PopplerRenderer {
    fn page_count(&self, pdf_path: &Path) -> Result<u32, DecodeError> {
        let output = run_tool(Command::new(self.tool("pdfinfo")).arg(pdf_path))
            .map_err(|f| decode_failure(f, PDFINFO_NOT_FOUND))?;

        let stdout = String::from_utf8_lossy(&output.stdout);
        parse_page_count(&stdout).ok_or_else(|| {
            DecodeError::Unparseable("pdfinfo reported no page count".to_string())
        })
    }

    fn page_texts(&self, pdf_path: &Path) -> Result<Vec<String>, DecodeError> {
        let output = run_tool(
            Command::new(self.tool("pdftotext"))
                .args(["-layout", "-enc", "UTF-8"])
                .arg(pdf_path)
                .arg("-"), // Output to stdout
        )
        .map_err(|f| decode_failure(f, PDFTOTEXT_NOT_FOUND))?;

        Ok(split_pages(&String::from_utf8_lossy(&output.stdout)))
    }

    fn rasterize_page(
        &self,
        pdf_path: &Path,
        page: u32,
        dpi: u32,
        output_dir: &Path,
    ) -> Result<PathBuf, RasterError> {
        let page_str = page.to_string();
        let dpi_str = dpi.to_string();
        let output_prefix = output_dir.join("page");

        debug!("Rasterizing page {} at {} DPI", page, dpi);
        let result = run_tool(
            Command::new(self.tool("pdftoppm"))
                .args(["-png", "-r", &dpi_str, "-f", &page_str, "-l", &page_str])
                .arg(pdf_path)
                .arg(&output_prefix),
        );

        match result {
            Ok(_) => find_page_image(output_dir, page).ok_or(RasterError::NoImage(page)),
            Err(ToolFailure::NotFound) => {
                Err(RasterError::ToolNotFound(PDFTOPPM_NOT_FOUND.to_string()))
            }
            Err(ToolFailure::Failed(reason)) => Err(RasterError::RenderFailed { page, reason }),
            Err(ToolFailure::Io(e)) => Err(RasterError::Io(e)),
        }
    }
}

/// Read the `Pages:` line from `pdfinfo` output.
fn parse_page_count(pdfinfo_output: &str) -> Option<u32> {
    pdfinfo_output
        .lines()
        .find(|line| line.starts_with("Pages:"))
        .and_then(|line| line.split_whitespace().nth(1))
        .and_then(|s| s.parse().ok())
}

/// Split `pdftotext` output into pages.
///
/// Every page is terminated by a form feed, so the segment after the last one
/// is not a page.
fn split_pages(output: &str) -> Vec<String> {
    let mut pages: Vec<String> = output.split(FORM_FEED).map(str::to_string).collect();
    if pages.len() > 1 && pages.last().is_some_and(|p| p.is_empty()) {
        pages.pop();
    }
    pages
}

/// Find the image file for a specific page number.
///
/// pdftoppm names files like page-01.png, page-02.png, etc.
/// The padding width varies based on total page count.
fn find_page_image(temp_path: &Path, page_num: u32) -> Option<PathBuf> {
    for digits in [1, 2, 3, 4] {
        let filename = format!("page-{:0width$}.png", page_num, width = digits);
        let path = temp_path.join(&filename);
        if path.exists() {
            return Some(path);
        }
    }
    None
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    #[test]
    fn test_parse_page_count() {
        let output = "Producer:       LibreOffice\nPages:          3\nEncrypted:      no\n";
        assert_eq!(parse_page_count(output), Some(3));
        assert_eq!(parse_page_count("Pages:          0\n"), Some(0));
        assert_eq!(parse_page_count("Title: resume\n"), None);
    }

    #[test]
    fn test_split_pages_drops_trailing_segment() {
        let pages = split_pages("John Doe\n\u{000C}Experience\n\u{000C}");
        assert_eq!(pages, vec!["John Doe\n", "Experience\n"]);
    }

    #[test]
    fn test_split_pages_keeps_empty_pages() {
        let pages = split_pages("\u{000C}\u{000C}");
        assert_eq!(pages, vec!["", ""]);
        assert_eq!(split_pages(""), vec![""]);
    }

    #[test]
    fn test_find_page_image_not_found() {
        let temp = TempDir::new().unwrap();
        assert!(find_page_image(temp.path(), 1).is_none());
    }

    #[test]
    fn test_find_page_image_with_2_digit_padding() {
        let temp = TempDir::new().unwrap();
        let path = temp.path().join("page-01.png");
        std::fs::write(&path, b"fake png").unwrap();

        assert_eq!(find_page_image(temp.path(), 1), Some(path));
    }

    #[test]
    fn test_find_page_image_without_padding() {
        let temp = TempDir::new().unwrap();
        let path = temp.path().join("page-1.png");
        std::fs::write(&path, b"fake png").unwrap();

        assert_eq!(find_page_image(temp.path(), 1), Some(path));
    }

    #[test]
    fn test_empty_tool_dir_falls_back_to_path_lookup() {
        let temp = TempDir::new().unwrap();
        let renderer = PopplerRenderer::new().with_tool_dir(temp.path());
        assert_eq!(renderer.tool("pdfinfo"), PathBuf::from("pdfinfo"));
    }
}
