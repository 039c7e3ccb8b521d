//! Document ingestion: PDF bytes in, normalized text out.
//!
//! The pipeline tries the embedded text layer first and only falls back to
//! rasterizing and OCR'ing page 1 when that layer is empty:
//!
//! ```text
//! bytes -> detect_pdf -> Staging -> TextLayerExtractor --(non-empty)--> TextLayer
//!                                          |
//!                                       (empty)
//!                                          v
//!                                  RasterOcrExtractor ----------------> Ocr + preview
//! ```
//!
//! Decoding and OCR are injected through [`PdfRenderer`] and
//! [`OcrBackend`](crate::ocr::OcrBackend).

mod error;
mod extractor;
mod raster;
mod renderer;
mod result;
mod staging;
mod text_layer;

pub use error::{DecodeError, IngestionError, IngestionErrorKind, RasterError, UnreadableCause};
pub use extractor::{detect_pdf, DocumentIngestor};
pub use raster::{
    encode_preview, OcrPage, RasterOcrError, RasterOcrExtractor, OCR_PAGE, PREVIEW_JPEG_QUALITY,
    RASTER_DPI,
};
pub use renderer::{PdfRenderer, PopplerRenderer};
pub use result::{ExtractionResult, ExtractionSource};
pub use staging::Staging;
pub use text_layer::{content_chars, TextLayerExtractor};
