//! resume-match - resume text extraction and job matching.
//!
//! Reads a resume PDF through its text layer, falling back to OCR of the
//! first page for scanned documents, and evaluates the text against a job
//! description with an LLM.

pub mod cli;
pub mod config;
pub mod ingest;
pub mod llm;
pub mod ocr;

pub use config::Config;
pub use ingest::{DocumentIngestor, ExtractionResult, ExtractionSource, IngestionError};
