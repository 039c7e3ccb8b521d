//! OCR fallback for documents without a usable text layer.
//!
//! Only the first page is rasterized and recognized. Scanned multi-page
//! documents therefore yield the text of page 1 alone.

use std::io::Cursor;
use std::path::Path;
use std::sync::Arc;

use image::codecs::jpeg::JpegEncoder;
use image::DynamicImage;
use thiserror::Error;
use tracing::debug;

use super::error::RasterError;
use super::renderer::PdfRenderer;
use crate::ocr::{OcrBackend, OcrBackendType, OcrError};

/// Rasterization resolution used for OCR.
pub const RASTER_DPI: u32 = 300;

/// JPEG quality of the preview image.
pub const PREVIEW_JPEG_QUALITY: u8 = 85;

/// The only page the fallback looks at.
pub const OCR_PAGE: u32 = 1;

/// Text recognized on a rasterized page, plus that raster as a JPEG.
#[derive(Debug, Clone)]
pub struct OcrPage {
    pub text: String,
    pub preview_jpeg: Vec<u8>,
    pub backend: OcrBackendType,
}

#[derive(Debug, Error)]
pub enum RasterOcrError {
    #[error(transparent)]
    Raster(#[from] RasterError),

    #[error(transparent)]
    Ocr(#[from] OcrError),
}

/// Rasterizes the first page and runs the injected OCR engine over it.
pub struct RasterOcrExtractor {
    renderer: Arc<dyn PdfRenderer>,
    ocr: Arc<dyn OcrBackend>,
}

impl RasterOcrExtractor {
    pub fn new(renderer: Arc<dyn PdfRenderer>, ocr: Arc<dyn OcrBackend>) -> Self {
        Self { renderer, ocr }
    }

    /// Rasterize page 1 into `work_dir`, OCR it and encode the preview.
    pub fn extract_first_page(
        &self,
        pdf_path: &Path,
        work_dir: &Path,
    ) -> Result<OcrPage, RasterOcrError> {
        let image_path = self
            .renderer
            .rasterize_page(pdf_path, OCR_PAGE, RASTER_DPI, work_dir)?;
        let preview_jpeg = encode_preview(&image_path)?;

        let result = self.ocr.ocr_image(&image_path)?;
        debug!(
            "{} recognized {} chars in {}ms",
            result.backend,
            result.text.len(),
            result.processing_time_ms
        );

        Ok(OcrPage {
            text: result.text,
            preview_jpeg,
            backend: result.backend,
        })
    }
}

/// Decode a rendered page and re-encode it as JPEG.
pub fn encode_preview(image_path: &Path) -> Result<Vec<u8>, RasterError> {
    let raster = image::open(image_path).map_err(RasterError::Decode)?;
    // JPEG has no alpha channel.
    let rgb = DynamicImage::ImageRgb8(raster.to_rgb8());

    let mut buffer = Cursor::new(Vec::new());
    let encoder = JpegEncoder::new_with_quality(&mut buffer, PREVIEW_JPEG_QUALITY);
    rgb.write_with_encoder(encoder).map_err(RasterError::Encode)?;

    Ok(buffer.into_inner())
}

#[cfg(test)]
mod tests {
    use super::*;
    use image::{ImageFormat, Rgba, RgbaImage};
    use tempfile::TempDir;

    #[test]
    fn test_encode_preview_produces_decodable_jpeg() {
        let temp = TempDir::new().unwrap();
        let path = temp.path().join("page-1.png");
        RgbaImage::from_pixel(8, 6, Rgba([255, 255, 255, 128]))
            .save(&path)
            .unwrap();

        let jpeg = encode_preview(&path).unwrap();
        assert_eq!(image::guess_format(&jpeg).unwrap(), ImageFormat::Jpeg);

        let decoded = image::load_from_memory(&jpeg).unwrap();
        assert_eq!((decoded.width(), decoded.height()), (8, 6));
    }

    #[test]
    fn test_encode_preview_rejects_garbage() {
        let temp = TempDir::new().unwrap();
        let path = temp.path().join("page-1.png");
        std::fs::write(&path, b"not an image").unwrap();

        assert!(matches!(encode_preview(&path), Err(RasterError::Decode(_))));
    }
}
