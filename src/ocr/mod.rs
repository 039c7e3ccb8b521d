//! OCR engines.
//!
//! Tesseract (via its command-line binary) is the default engine. Anything
//! implementing [`OcrBackend`] can be injected into the ingestion pipeline
//! instead.

mod backend;
mod tesseract;
pub(crate) mod tool_utils;

pub use backend::{OcrBackend, OcrBackendType, OcrConfig, OcrError, OcrResult};
pub use tesseract::TesseractBackend;
pub use tool_utils::{check_binary, check_tools};
