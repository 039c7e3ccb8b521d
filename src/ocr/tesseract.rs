//! Tesseract OCR backend implementation.
//!
//! Uses Tesseract OCR via command-line for text extraction.

use std::path::{Path, PathBuf};
use std::process::Command;
use std::time::Instant;

use tracing::debug;

use super::backend::{OcrBackend, OcrBackendType, OcrConfig, OcrError, OcrResult};
use super::tool_utils::{run_tool, ToolFailure, TESSERACT_NOT_FOUND};

/// Tesseract OCR backend.
pub struct TesseractBackend {
    config: OcrConfig,
}

impl TesseractBackend {
    /// Create a new Tesseract backend with default configuration.
    pub fn new() -> Self {
        Self {
            config: OcrConfig::default(),
        }
    }

    /// Create a new Tesseract backend with custom configuration.
    pub fn with_config(config: OcrConfig) -> Self {
        Self { config }
    }

    /// The executable to spawn: configured path, PATH lookup, or the bare name.
    fn binary(&self) -> PathBuf {
        self.config
            .binary_path
            .clone()
            .or_else(|| which::which("tesseract").ok())
            .unwrap_or_else(|| PathBuf::from("tesseract"))
    }

    /// Run Tesseract on an image file.
    fn run_tesseract(&self, image_path: &Path) -> Result<String, OcrError> {
        let binary = self.binary();
        debug!("Running {} on {}", binary.display(), image_path.display());

        let output = run_tool(
            Command::new(&binary)
                .arg(image_path)
                .arg("stdout")
                .args(["-l", &self.config.language]),
        );

        match output {
            Ok(output) => Ok(String::from_utf8_lossy(&output.stdout).to_string()),
            Err(ToolFailure::NotFound) => {
                Err(OcrError::BackendNotAvailable(TESSERACT_NOT_FOUND.to_string()))
            }
            Err(ToolFailure::Failed(stderr)) => {
                Err(OcrError::OcrFailed(format!("tesseract failed: {}", stderr)))
            }
            Err(ToolFailure::Io(e)) => Err(OcrError::Io(e)),
        }
    }
}

impl Default for TesseractBackend {
    fn default() -> Self {
        Self::new()
    }
}

impl OcrBackend for TesseractBackend {
    fn backend_type(&self) -> OcrBackendType {
        OcrBackendType::Tesseract
    }

    fn is_available(&self) -> bool {
        match &self.config.binary_path {
            Some(path) => path.is_file(),
            None => which::which("tesseract").is_ok(),
        }
    }

    fn availability_hint(&self) -> String {
        if self.is_available() {
            "Tesseract is available".to_string()
        } else if let Some(path) = &self.config.binary_path {
            format!("Configured tesseract binary not found at {}", path.display())
        } else {
            "Tesseract not installed. Install with: apt install tesseract-ocr".to_string()
        }
    }

    fn ocr_image(&self, image_path: &Path) -> Result<OcrResult, OcrError> {
        let start = Instant::now();
        let text = self.run_tesseract(image_path)?;
        let elapsed = start.elapsed();

        Ok(OcrResult {
            text,
            backend: self.backend_type(),
            processing_time_ms: elapsed.as_millis() as u64,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_missing_configured_binary_is_unavailable() {
        let backend = TesseractBackend::with_config(OcrConfig {
            binary_path: Some(PathBuf::from("/nonexistent/tesseract")),
            ..OcrConfig::default()
        });

        assert_eq!(backend.backend_type(), OcrBackendType::Tesseract);
        assert!(!backend.is_available());
        assert!(backend.availability_hint().contains("/nonexistent/tesseract"));

        let err = backend.ocr_image(Path::new("page-1.png")).unwrap_err();
        assert!(err.is_unavailable());
    }
}
