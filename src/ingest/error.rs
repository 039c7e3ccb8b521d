//! Error taxonomy for the ingestion pipeline.

use thiserror::Error;

use crate::ocr::OcrError;

/// The PDF container could not be decoded.
#[derive(Debug, Error)]
pub enum DecodeError {
    #[error("Document is empty")]
    Empty,

    #[error("Not a PDF document (detected {0})")]
    NotPdf(String),

    #[error("PDF could not be parsed: {0}")]
    Unparseable(String),

    #[error("PDF has no pages")]
    NoPages,

    #[error("PDF decoder not available: {0}")]
    ToolNotFound(String),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
}

/// A specific page could not be rendered to an image.
#[derive(Debug, Error)]
pub enum RasterError {
    #[error("Failed to render page {page}: {reason}")]
    RenderFailed { page: u32, reason: String },

    #[error("No image generated for page {0}")]
    NoImage(u32),

    #[error("Rendered page could not be decoded: {0}")]
    Decode(#[source] image::ImageError),

    #[error("Preview could not be encoded: {0}")]
    Encode(#[source] image::ImageError),

    #[error("PDF renderer not available: {0}")]
    ToolNotFound(String),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
}

/// Why a document was judged unreadable.
#[derive(Debug, Error)]
pub enum UnreadableCause {
    #[error(transparent)]
    Decode(DecodeError),

    #[error(transparent)]
    Raster(RasterError),
}

/// Coarse classification of an [`IngestionError`], for callers deciding how to recover.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum IngestionErrorKind {
    /// The document itself is the problem. Treat as "no text available".
    Unreadable,
    /// The PDF tooling is missing. A deployment problem.
    RendererUnavailable,
    /// The OCR engine is missing or failed. Text extraction is degraded.
    OcrUnavailable,
    /// Reading the input or staging it failed.
    Io,
}

/// Umbrella error returned by [`DocumentIngestor::extract`](super::DocumentIngestor::extract).
#[derive(Debug, Error)]
pub enum IngestionError {
    #[error("Document unreadable: {0}")]
    Unreadable(#[source] UnreadableCause),

    #[error("PDF tooling unavailable: {0}")]
    RendererUnavailable(String),

    #[error("Text extraction unavailable: {0}")]
    OcrEngine(#[source] OcrError),

    #[error("IO error during ingestion: {0}")]
    Io(#[from] std::io::Error),
}

impl IngestionError {
    pub fn kind(&self) -> IngestionErrorKind {
        match self {
            IngestionError::Unreadable(_) => IngestionErrorKind::Unreadable,
            IngestionError::RendererUnavailable(_) => IngestionErrorKind::RendererUnavailable,
            IngestionError::OcrEngine(_) => IngestionErrorKind::OcrUnavailable,
            IngestionError::Io(_) => IngestionErrorKind::Io,
        }
    }

    /// Soft failures can be shown as "no text found"; everything else is actionable.
    pub fn is_soft(&self) -> bool {
        self.kind() == IngestionErrorKind::Unreadable
    }
}

impl From<DecodeError> for IngestionError {
    fn from(err: DecodeError) -> Self {
        match err {
            DecodeError::ToolNotFound(hint) => IngestionError::RendererUnavailable(hint),
            DecodeError::Io(e) => IngestionError::Io(e),
            other => IngestionError::Unreadable(UnreadableCause::Decode(other)),
        }
    }
}

impl From<RasterError> for IngestionError {
    fn from(err: RasterError) -> Self {
        match err {
            RasterError::ToolNotFound(hint) => IngestionError::RendererUnavailable(hint),
            RasterError::Io(e) => IngestionError::Io(e),
            other => IngestionError::Unreadable(UnreadableCause::Raster(other)),
        }
    }
}

impl From<OcrError> for IngestionError {
    fn from(err: OcrError) -> Self {
        IngestionError::OcrEngine(err)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_decode_errors_map_to_unreadable() {
        let err: IngestionError = DecodeError::NotPdf("image/png".into()).into();
        assert_eq!(err.kind(), IngestionErrorKind::Unreadable);
        assert!(err.is_soft());

        let err: IngestionError = DecodeError::NoPages.into();
        assert_eq!(err.kind(), IngestionErrorKind::Unreadable);
    }

    #[test]
    fn test_missing_tools_are_not_soft() {
        let err: IngestionError = DecodeError::ToolNotFound("pdftotext".into()).into();
        assert_eq!(err.kind(), IngestionErrorKind::RendererUnavailable);
        assert!(!err.is_soft());

        let err: IngestionError = RasterError::ToolNotFound("pdftoppm".into()).into();
        assert_eq!(err.kind(), IngestionErrorKind::RendererUnavailable);
    }

    #[test]
    fn test_raster_failure_is_unreadable() {
        let err: IngestionError = RasterError::NoImage(1).into();
        assert_eq!(err.kind(), IngestionErrorKind::Unreadable);
        assert!(err.to_string().contains("page 1"));
    }

    #[test]
    fn test_ocr_errors_are_degraded_mode() {
        let err: IngestionError = OcrError::BackendNotAvailable("tesseract".into()).into();
        assert_eq!(err.kind(), IngestionErrorKind::OcrUnavailable);
        assert!(!err.is_soft());
    }
}
