//! Hybrid text extraction: text layer first, OCR of page 1 as a fallback.

use std::path::{Path, PathBuf};
use std::sync::Arc;

use tracing::{debug, info, info_span, warn};
use uuid::Uuid;

use super::error::{DecodeError, IngestionError};
use super::raster::{RasterOcrError, RasterOcrExtractor};
use super::renderer::{PdfRenderer, PopplerRenderer};
use super::result::ExtractionResult;
use super::staging::Staging;
use super::text_layer::{content_chars, TextLayerExtractor};
use crate::ocr::{OcrBackend, OcrConfig, TesseractBackend};

/// PDF readers accept a header anywhere in the first kilobyte.
const PDF_HEADER_WINDOW: usize = 1024;

/// Check that `bytes` look like a PDF before handing them to any tool.
pub fn detect_pdf(bytes: &[u8]) -> Result<(), DecodeError> {
    if bytes.is_empty() {
        return Err(DecodeError::Empty);
    }

    match infer::get(bytes) {
        Some(kind) if kind.mime_type() == "application/pdf" => Ok(()),
        detected => {
            let window = &bytes[..bytes.len().min(PDF_HEADER_WINDOW)];
            if window.windows(5).any(|w| w == b"%PDF-") {
                return Ok(());
            }
            let mime = detected.map_or("unknown", |k| k.mime_type());
            Err(DecodeError::NotPdf(mime.to_string()))
        }
    }
}

/// Turns PDF bytes into an [`ExtractionResult`], choosing the cheapest
/// strategy that yields text.
///
/// Each call stages the document in its own temporary directory, so one
/// ingestor can serve concurrent calls.
pub struct DocumentIngestor {
    text_layer: TextLayerExtractor,
    raster_ocr: RasterOcrExtractor,
    staging_root: Option<PathBuf>,
}

impl DocumentIngestor {
    /// Create an ingestor from an injected renderer and OCR engine.
    pub fn new(renderer: Arc<dyn PdfRenderer>, ocr: Arc<dyn OcrBackend>) -> Self {
        Self {
            text_layer: TextLayerExtractor::new(renderer.clone()),
            raster_ocr: RasterOcrExtractor::new(renderer, ocr),
            staging_root: None,
        }
    }

    /// Poppler for decoding and Tesseract for OCR.
    pub fn with_system_tools(poppler_dir: Option<PathBuf>, ocr_config: OcrConfig) -> Self {
        let renderer = match poppler_dir {
            Some(dir) => PopplerRenderer::new().with_tool_dir(dir),
            None => PopplerRenderer::new(),
        };
        Self::new(
            Arc::new(renderer),
            Arc::new(TesseractBackend::with_config(ocr_config)),
        )
    }

    /// Create staging directories under `root` instead of the system temp dir.
    pub fn with_staging_root(mut self, root: impl Into<PathBuf>) -> Self {
        self.staging_root = Some(root.into());
        self
    }

    /// Extract text from a PDF document.
    pub fn extract(&self, pdf_bytes: &[u8]) -> Result<ExtractionResult, IngestionError> {
        let call_id = Uuid::new_v4();
        let span = info_span!("extract", %call_id, bytes = pdf_bytes.len());
        let _enter = span.enter();

        detect_pdf(pdf_bytes)?;

        let staging = Staging::create(self.staging_root.as_deref(), pdf_bytes)?;
        let result = self.extract_staged(&staging);
        staging.release();

        if let Err(ref e) = result {
            warn!("Extraction failed: {}", e);
        }
        result
    }

    /// Like [`extract`](Self::extract), but an unreadable document yields an
    /// empty result instead of an error.
    ///
    /// Missing tooling and OCR engine failures are still returned as errors.
    pub fn extract_or_empty(&self, pdf_bytes: &[u8]) -> Result<ExtractionResult, IngestionError> {
        match self.extract(pdf_bytes) {
            Err(e) if e.is_soft() => {
                debug!("Treating unreadable document as empty: {}", e);
                Ok(ExtractionResult::none())
            }
            other => other,
        }
    }

    /// Read a file and extract text from it.
    pub fn extract_path(&self, path: &Path) -> Result<ExtractionResult, IngestionError> {
        let bytes = std::fs::read(path)?;
        self.extract(&bytes)
    }

    fn extract_staged(&self, staging: &Staging) -> Result<ExtractionResult, IngestionError> {
        let text = self.text_layer.extract_all(staging.pdf_path())?;

        let chars = content_chars(&text);
        if chars > 0 {
            info!("Using text layer ({} chars)", chars);
            return Ok(ExtractionResult::text_layer(text));
        }

        info!("No text layer found, running OCR on page 1");
        let page = self
            .raster_ocr
            .extract_first_page(staging.pdf_path(), staging.work_dir())
            .map_err(|e| match e {
                RasterOcrError::Raster(e) => IngestionError::from(e),
                RasterOcrError::Ocr(e) => IngestionError::from(e),
            })?;

        info!(
            "OCR via {} produced {} chars",
            page.backend,
            content_chars(&page.text)
        );
        Ok(ExtractionResult::ocr(page.text, page.preview_jpeg))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_detect_pdf_accepts_header() {
        assert!(detect_pdf(b"%PDF-1.7\n%\xE2\xE3\xCF\xD3\n").is_ok());
    }

    #[test]
    fn test_detect_pdf_accepts_leading_junk() {
        let mut bytes = b"\r\n\r\n".to_vec();
        bytes.extend_from_slice(b"%PDF-1.4\n");
        assert!(detect_pdf(&bytes).is_ok());
    }

    #[test]
    fn test_detect_pdf_rejects_other_formats() {
        assert!(matches!(detect_pdf(b""), Err(DecodeError::Empty)));
        assert!(matches!(
            detect_pdf(b"\x89PNG\r\n\x1a\n\0\0\0\rIHDR"),
            Err(DecodeError::NotPdf(mime)) if mime == "image/png"
        ));
        assert!(matches!(
            detect_pdf(b"Dear hiring manager"),
            Err(DecodeError::NotPdf(mime)) if mime == "unknown"
        ));
    }
}
