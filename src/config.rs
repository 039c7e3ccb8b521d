//! Configuration management using the prefer crate for file discovery.

use std::path::{Path, PathBuf};
use std::time::Duration;

use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::ingest::DocumentIngestor;
use crate::llm::LlmConfig;
use crate::ocr::OcrConfig;

/// Name used for config file discovery (`resume-match.toml`, etc.).
pub const CONFIG_NAME: &str = "resume-match";

/// Default upper bound on uploaded document size (20 MiB).
pub const DEFAULT_MAX_DOCUMENT_BYTES: u64 = 20 * 1024 * 1024;

/// Default timeout for one extraction call in seconds.
pub const DEFAULT_EXTRACT_TIMEOUT_SECS: u64 = 120;

#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("Failed to read config file {path}: {source}")]
    Read {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("Failed to parse config file {path}: {message}")]
    Parse { path: PathBuf, message: String },
}

/// Configuration file structure.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Config {
    /// Path to the tesseract binary (looked up in PATH when unset).
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub tesseract_cmd: Option<String>,
    /// Tesseract language code.
    #[serde(default = "default_ocr_language")]
    pub ocr_language: String,
    /// Directory containing pdfinfo/pdftotext/pdftoppm (looked up in PATH when unset).
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub poppler_dir: Option<String>,
    /// Reject documents larger than this many bytes (0 = unlimited).
    #[serde(default = "default_max_document_bytes")]
    pub max_document_bytes: u64,
    /// Abort extraction after this many seconds (0 = no timeout).
    #[serde(default = "default_extract_timeout_secs")]
    pub extract_timeout_secs: u64,
    /// LLM configuration for resume evaluation.
    #[serde(default)]
    pub llm: LlmConfig,
    /// Path to the config file this was loaded from (not serialized).
    #[serde(skip)]
    pub source_path: Option<PathBuf>,
}

fn default_ocr_language() -> String {
    "eng".to_string()
}

fn default_max_document_bytes() -> u64 {
    DEFAULT_MAX_DOCUMENT_BYTES
}

fn default_extract_timeout_secs() -> u64 {
    DEFAULT_EXTRACT_TIMEOUT_SECS
}

impl Default for Config {
    fn default() -> Self {
        Self {
            tesseract_cmd: None,
            ocr_language: default_ocr_language(),
            poppler_dir: None,
            max_document_bytes: default_max_document_bytes(),
            extract_timeout_secs: default_extract_timeout_secs(),
            llm: LlmConfig::default(),
            source_path: None,
        }
    }
}

impl Config {
    /// Load configuration using prefer crate for discovery.
    /// Falls back to defaults (with env overrides) when no file is found or it is invalid.
    pub async fn load() -> Self {
        match prefer::load(CONFIG_NAME).await {
            Ok(pref_config) => {
                if let Some(path) = pref_config.source_path() {
                    match Self::load_from_path(path).await {
                        Ok(config) => config,
                        Err(e) => {
                            tracing::warn!("{}, using defaults", e);
                            Self::default().with_env_overrides()
                        }
                    }
                } else {
                    Self::default().with_env_overrides()
                }
            }
            Err(_) => {
                // No config file found, use defaults with env overrides
                Self::default().with_env_overrides()
            }
        }
    }

    /// Load configuration from a specific file path.
    /// Supports JSON, TOML and YAML based on file extension.
    pub async fn load_from_path(path: &Path) -> Result<Self, ConfigError> {
        let contents = tokio::fs::read_to_string(path)
            .await
            .map_err(|source| ConfigError::Read {
                path: path.to_path_buf(),
                source,
            })?;

        let mut config = Self::parse(path, &contents)?;
        config.source_path = Some(path.to_path_buf());
        config.llm = config.llm.with_env_overrides();
        Ok(config.with_env_overrides())
    }

    fn parse(path: &Path, contents: &str) -> Result<Self, ConfigError> {
        let ext = path.extension().and_then(|e| e.to_str()).unwrap_or("toml");
        let parsed = match ext {
            "json" => serde_json::from_str(contents).map_err(|e| e.to_string()),
            "yaml" | "yml" => serde_yaml::from_str(contents).map_err(|e| e.to_string()),
            _ => toml::from_str(contents).map_err(|e| e.to_string()),
        };
        parsed.map_err(|message| ConfigError::Parse {
            path: path.to_path_buf(),
            message,
        })
    }

    /// Apply environment variable overrides.
    ///
    /// Supported env vars:
    /// - `TESSERACT_CMD`: Path to the tesseract binary
    /// - `OCR_LANGUAGE`: Tesseract language code
    /// - `POPPLER_DIR`: Directory containing the poppler tools
    pub fn with_env_overrides(mut self) -> Self {
        if let Ok(val) = std::env::var("TESSERACT_CMD") {
            if !val.is_empty() {
                self.tesseract_cmd = Some(val);
            }
        }
        if let Ok(val) = std::env::var("OCR_LANGUAGE") {
            if !val.is_empty() {
                self.ocr_language = val;
            }
        }
        if let Ok(val) = std::env::var("POPPLER_DIR") {
            if !val.is_empty() {
                self.poppler_dir = Some(val);
            }
        }
        self
    }

    /// Get the base directory for resolving relative paths.
    pub fn base_dir(&self) -> PathBuf {
        self.source_path
            .as_ref()
            .and_then(|p| p.parent().map(|p| p.to_path_buf()))
            .unwrap_or_else(|| std::env::current_dir().unwrap_or_else(|_| PathBuf::from(".")))
    }

    /// Resolve a path that may be relative to the config file.
    /// - Absolute paths are returned as-is
    /// - Paths starting with ~ are expanded
    /// - Relative paths are resolved relative to the config file directory (or CWD)
    pub fn resolve_path(&self, path_str: &str) -> PathBuf {
        let expanded = shellexpand::tilde(path_str);
        let path = Path::new(expanded.as_ref());

        if path.is_absolute() {
            path.to_path_buf()
        } else {
            self.base_dir().join(path)
        }
    }

    /// OCR engine settings.
    pub fn ocr_config(&self) -> OcrConfig {
        OcrConfig {
            language: self.ocr_language.clone(),
            binary_path: self.tesseract_cmd.as_deref().map(|p| self.resolve_path(p)),
        }
    }

    pub fn poppler_path(&self) -> Option<PathBuf> {
        self.poppler_dir.as_deref().map(|p| self.resolve_path(p))
    }

    /// Extraction deadline, `None` when disabled.
    pub fn extract_timeout(&self) -> Option<Duration> {
        (self.extract_timeout_secs > 0).then(|| Duration::from_secs(self.extract_timeout_secs))
    }

    /// Whether a document of `len` bytes is within the configured limit.
    pub fn accepts_document_size(&self, len: u64) -> bool {
        self.max_document_bytes == 0 || len <= self.max_document_bytes
    }

    /// Build the default Poppler + Tesseract ingestor.
    pub fn build_ingestor(&self) -> DocumentIngestor {
        DocumentIngestor::with_system_tools(self.poppler_path(), self.ocr_config())
    }
}

/// Options for loading configuration.
#[derive(Debug, Clone, Default)]
pub struct LoadOptions {
    /// Explicit config file path (overrides auto-discovery).
    pub config_path: Option<PathBuf>,
}

/// Load configuration with explicit options.
///
/// An explicitly requested file must load; auto-discovery falls back to defaults.
pub async fn load_config(options: &LoadOptions) -> Result<Config, ConfigError> {
    if let Some(ref config_path) = options.config_path {
        tracing::debug!("Loading config from {}", config_path.display());
        return Config::load_from_path(config_path).await;
    }
    Ok(Config::load().await)
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    #[test]
    fn test_parse_toml() {
        let config = Config::parse(
            Path::new("resume-match.toml"),
            r#"
                ocr_language = "deu"
                poppler_dir = "bin/poppler"
                max_document_bytes = 0

                [llm]
                model = "llama-3.1-8b-instant"
            "#,
        )
        .unwrap();

        assert_eq!(config.ocr_language, "deu");
        assert_eq!(config.poppler_dir.as_deref(), Some("bin/poppler"));
        assert!(config.accepts_document_size(u64::MAX));
        assert_eq!(config.llm.model, "llama-3.1-8b-instant");
        assert_eq!(config.extract_timeout_secs, DEFAULT_EXTRACT_TIMEOUT_SECS);
    }

    #[test]
    fn test_parse_yaml_and_json() {
        let yaml = Config::parse(Path::new("c.yaml"), "ocr_language: fra\n").unwrap();
        assert_eq!(yaml.ocr_language, "fra");

        let json = Config::parse(Path::new("c.json"), r#"{"extract_timeout_secs": 5}"#).unwrap();
        assert_eq!(json.extract_timeout(), Some(Duration::from_secs(5)));
    }

    #[test]
    fn test_parse_error_names_file() {
        let err = Config::parse(Path::new("broken.toml"), "ocr_language = [").unwrap_err();
        assert!(err.to_string().contains("broken.toml"));
    }

    #[test]
    fn test_zero_timeout_disables_deadline() {
        let config = Config::parse(Path::new("c.toml"), "extract_timeout_secs = 0\n").unwrap();
        assert_eq!(config.extract_timeout(), None);
        assert_eq!(
            Config::default().extract_timeout(),
            Some(Duration::from_secs(DEFAULT_EXTRACT_TIMEOUT_SECS))
        );
    }

    #[test]
    fn test_document_size_limit() {
        let config = Config::default();
        assert!(config.accepts_document_size(DEFAULT_MAX_DOCUMENT_BYTES));
        assert!(!config.accepts_document_size(DEFAULT_MAX_DOCUMENT_BYTES + 1));
    }

    #[tokio::test]
    async fn test_relative_paths_resolve_against_config_dir() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join("resume-match.toml");
        std::fs::write(&path, "poppler_dir = \"poppler/bin\"\n").unwrap();

        let mut config = Config::load_from_path(&path).await.unwrap();
        // Environment may override; pin the value under test.
        config.poppler_dir = Some("poppler/bin".to_string());
        assert_eq!(config.source_path.as_deref(), Some(path.as_path()));
        assert_eq!(
            config.poppler_path(),
            Some(dir.path().join("poppler/bin"))
        );
    }

    #[tokio::test]
    async fn test_explicit_missing_config_is_an_error() {
        let options = LoadOptions {
            config_path: Some(PathBuf::from("/nonexistent/resume-match.toml")),
        };
        assert!(matches!(
            load_config(&options).await,
            Err(ConfigError::Read { .. })
        ));
    }
}
