//! The normalized output of one extraction call.

use base64::Engine;
use serde::{Serialize, Serializer};

/// Strategy that produced the extracted text.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum ExtractionSource {
    /// Embedded text layer of the PDF.
    TextLayer,
    /// OCR of the rasterized first page.
    Ocr,
    /// Nothing could be extracted.
    None,
}

impl ExtractionSource {
    pub fn as_str(&self) -> &'static str {
        match self {
            ExtractionSource::TextLayer => "text_layer",
            ExtractionSource::Ocr => "ocr",
            ExtractionSource::None => "none",
        }
    }
}

impl std::fmt::Display for ExtractionSource {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

/// Extracted text plus provenance.
///
/// Fields are private so that every value satisfies the source/preview
/// pairing: a preview exists exactly when the text came from OCR, and a
/// `None` source carries no text.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ExtractionResult {
    text: String,
    source: ExtractionSource,
    preview_image: Option<Vec<u8>>,
}

impl ExtractionResult {
    /// Text read from the PDF text layer.
    pub fn text_layer(text: String) -> Self {
        Self {
            text,
            source: ExtractionSource::TextLayer,
            preview_image: None,
        }
    }

    /// Text recognized from the JPEG-encoded first page.
    pub fn ocr(text: String, preview_jpeg: Vec<u8>) -> Self {
        Self {
            text,
            source: ExtractionSource::Ocr,
            preview_image: Some(preview_jpeg),
        }
    }

    /// No text could be extracted.
    pub fn none() -> Self {
        Self {
            text: String::new(),
            source: ExtractionSource::None,
            preview_image: None,
        }
    }

    pub fn text(&self) -> &str {
        &self.text
    }

    pub fn source(&self) -> ExtractionSource {
        self.source
    }

    /// JPEG of the first page, only present for OCR results.
    pub fn preview_image(&self) -> Option<&[u8]> {
        self.preview_image.as_deref()
    }

    /// Preview as standard base64, for embedding in HTML or JSON.
    pub fn preview_base64(&self) -> Option<String> {
        self.preview_image
            .as_ref()
            .map(|bytes| base64::engine::general_purpose::STANDARD.encode(bytes))
    }

    /// Whether the text has any non-whitespace content.
    pub fn has_text(&self) -> bool {
        !self.text.trim().is_empty()
    }
}

#[derive(Serialize)]
struct ExtractionResultJson<'a> {
    text: &'a str,
    source: ExtractionSource,
    #[serde(skip_serializing_if = "Option::is_none")]
    preview_image: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    preview_mime: Option<&'static str>,
}

impl Serialize for ExtractionResult {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        ExtractionResultJson {
            text: &self.text,
            source: self.source,
            preview_image: self.preview_base64(),
            preview_mime: self.preview_image.as_ref().map(|_| "image/jpeg"),
        }
        .serialize(serializer)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_text_layer_has_no_preview() {
        let result = ExtractionResult::text_layer("John Doe\n".to_string());
        assert_eq!(result.source(), ExtractionSource::TextLayer);
        assert!(result.preview_image().is_none());
        assert!(result.preview_base64().is_none());
        assert!(result.has_text());
    }

    #[test]
    fn test_none_is_empty() {
        let result = ExtractionResult::none();
        assert_eq!(result.source(), ExtractionSource::None);
        assert_eq!(result.text(), "");
        assert!(result.preview_image().is_none());
        assert!(!result.has_text());
    }

    #[test]
    fn test_ocr_preview_base64() {
        let result = ExtractionResult::ocr("Jane".to_string(), vec![0xFF, 0xD8, 0xFF]);
        assert_eq!(result.preview_base64().as_deref(), Some("/9j/"));
    }

    #[test]
    fn test_serialize_json() {
        let json = serde_json::to_value(ExtractionResult::text_layer("hi".into())).unwrap();
        assert_eq!(json["source"], "text_layer");
        assert_eq!(json["text"], "hi");
        assert!(json.get("preview_image").is_none());

        let json = serde_json::to_value(ExtractionResult::ocr("x".into(), vec![1, 2, 3])).unwrap();
        assert_eq!(json["source"], "ocr");
        assert_eq!(json["preview_image"], "AQID");
        assert_eq!(json["preview_mime"], "image/jpeg");
    }
}
