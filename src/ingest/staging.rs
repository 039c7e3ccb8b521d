//! Call-scoped staging area for documents handed to external tools.

use std::fs;
use std::io;
use std::path::{Path, PathBuf};

use tempfile::{Builder, TempDir};
use tracing::{debug, warn};

const STAGED_DOCUMENT: &str = "document.pdf";

/// A private directory holding one staged document.
///
/// The directory and everything written into it are removed when the
/// `Staging` is released or dropped.
pub struct Staging {
    dir: TempDir,
    pdf_path: PathBuf,
}

impl Staging {
    /// Write `pdf_bytes` into a fresh, uniquely named directory.
    ///
    /// `root` selects the parent directory; the system temp dir is used when
    /// it is `None`.
    pub fn create(root: Option<&Path>, pdf_bytes: &[u8]) -> io::Result<Self> {
        let mut builder = Builder::new();
        builder.prefix("resume-match-");
        let dir = match root {
            Some(root) => builder.tempdir_in(root)?,
            None => builder.tempdir()?,
        };

        let pdf_path = dir.path().join(STAGED_DOCUMENT);
        fs::write(&pdf_path, pdf_bytes)?;
        debug!("Staged {} bytes at {}", pdf_bytes.len(), dir.path().display());

        Ok(Self { dir, pdf_path })
    }

    pub fn pdf_path(&self) -> &Path {
        &self.pdf_path
    }

    /// Scratch directory for intermediate artifacts such as page rasters.
    pub fn work_dir(&self) -> &Path {
        self.dir.path()
    }

    /// Remove the staging directory, logging instead of failing if that is not possible.
    pub fn release(self) {
        let path = self.dir.path().to_path_buf();
        if let Err(e) = self.dir.close() {
            warn!("Failed to remove staging dir {}: {}", path.display(), e);
        }
    }
}
