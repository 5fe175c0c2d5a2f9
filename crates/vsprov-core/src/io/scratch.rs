//! Per-package scratch directories.

use std::path::{Path, PathBuf};

use crate::error::InstallError;

/// A temporary directory that is removed when dropped.
///
/// Unlike a bare `tempfile::TempDir`, a failed removal is logged rather
/// than silently ignored; it never fails the run.
#[derive(Debug)]
pub struct ScratchDir {
    path: PathBuf,
    label: String,
}

impl ScratchDir {
    /// Create a fresh directory under `parent` (or the system temp dir).
    pub fn new(parent: Option<&Path>, label: &str) -> Result<Self, InstallError> {
        let builder = {
            let mut b = tempfile::Builder::new();
            b.prefix("vsprov-");
            b
        };
        let dir = match parent {
            Some(parent) => {
                std::fs::create_dir_all(parent).map_err(InstallError::at(parent))?;
                builder.tempdir_in(parent).map_err(InstallError::at(parent))?
            }
            None => builder.tempdir()?,
        };

        Ok(Self {
            path: dir.keep(),
            label: label.to_string(),
        })
    }

    pub fn path(&self) -> &Path {
        &self.path
    }
}

impl Drop for ScratchDir {
    fn drop(&mut self) {
        if let Err(e) = std::fs::remove_dir_all(&self.path) {
            tracing::warn!(
                "Could not remove temp dir {} for {}: {e}",
                self.path.display(),
                self.label
            );
        }
    }
}
