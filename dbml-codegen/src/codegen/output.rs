//! File output for generated sources

use std::fs;
use std::path::{Path, PathBuf};

use tracing::{debug, info};

use crate::error::{CodegenError, Result};

/// Writes generated files, or only records them in dry-run mode
#[derive(Debug, Default)]
pub struct OutputWriter {
    dry_run: bool,
    written: Vec<PathBuf>,
}

impl OutputWriter {
    pub fn new(dry_run: bool) -> Self {
        Self {
            dry_run,
            written: Vec::new(),
        }
    }

    /// Create an output directory (and parents) up front
    pub fn ensure_dir(&self, dir: &Path) -> Result<()> {
        if self.dry_run {
            return Ok(());
        }
        fs::create_dir_all(dir).map_err(|source| CodegenError::WriteError {
            path: dir.to_path_buf(),
            source,
        })
    }

    /// Write one file in full
    pub fn write(&mut self, path: PathBuf, contents: &str) -> Result<()> {
        if self.dry_run {
            info!("Would write {:?} ({} bytes)", path, contents.len());
        } else {
            debug!("Writing {:?}", path);
            fs::write(&path, contents).map_err(|source| CodegenError::WriteError {
                path: path.clone(),
                source,
            })?;
        }
        self.written.push(path);
        Ok(())
    }

    /// Paths written so far (or that would have been, in dry-run mode)
    pub fn written(&self) -> &[PathBuf] {
        &self.written
    }

    pub fn into_written(self) -> Vec<PathBuf> {
        self.written
    }
}
