//! Direct extraction from the PDF text layer.

use std::path::Path;
use std::sync::Arc;

use tracing::debug;

use super::error::DecodeError;
use super::renderer::PdfRenderer;

/// Count the characters that carry content.
pub fn content_chars(text: &str) -> usize {
    text.chars().filter(|c| !c.is_whitespace()).count()
}

/// Concatenates the embedded text of every page.
pub struct TextLayerExtractor {
    renderer: Arc<dyn PdfRenderer>,
}

impl TextLayerExtractor {
    pub fn new(renderer: Arc<dyn PdfRenderer>) -> Self {
        Self { renderer }
    }

    /// Extract the text layer of every page, in page order.
    ///
    /// Scanned pages contribute the empty string; only an unparseable or
    /// page-less container is an error.
    pub fn extract_all(&self, pdf_path: &Path) -> Result<String, DecodeError> {
        let page_count = self.renderer.page_count(pdf_path)?;
        if page_count == 0 {
            return Err(DecodeError::NoPages);
        }

        let pages = self.renderer.page_texts(pdf_path)?;
        for (i, page) in pages.iter().enumerate() {
            debug!("Page {}: {} text chars", i + 1, content_chars(page));
        }

        Ok(pages.concat())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_content_chars_ignores_whitespace() {
        assert_eq!(content_chars(" \n\t\u{000C}"), 0);
        assert_eq!(content_chars("John Doe\n"), 7);
    }
}
