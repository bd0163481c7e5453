//! Backing storage
//!
//! Each interceptor mirrors its input verbatim into a fresh temp file. The
//! file is written append-only and never read back by the pipeline.

use std::io::{Seek, Write};
use std::path::Path;

use tempfile::NamedTempFile;

use crate::app::BackingConfig;
use crate::error::Result;

/// Temp file mirroring captured output
#[derive(Debug)]
pub(crate) struct BackingFile {
    file: Option<NamedTempFile>,
    keep: bool,
    errors: usize,
}

impl BackingFile {
    pub(crate) fn create(config: &BackingConfig) -> Result<Self> {
        let file = tempfile::Builder::new()
            .prefix(&config.prefix)
            .tempfile()?;
        tracing::debug!("Backing file created at {}", file.path().display());
        Ok(Self {
            file: Some(file),
            keep: config.keep,
            errors: 0,
        })
    }

    /// Append `text`. Failures are logged and counted, never returned.
    pub(crate) fn append(&mut self, text: &str) {
        let Some(file) = self.file.as_mut() else {
            return;
        };
        if let Err(e) = file.write_all(text.as_bytes()) {
            self.errors += 1;
            tracing::warn!("Failed to mirror fragment to backing file: {}", e);
        }
    }

    /// Drop everything mirrored so far and write from the start again
    pub(crate) fn truncate(&mut self) {
        let Some(file) = self.file.as_mut() else {
            return;
        };
        let file = file.as_file_mut();
        if let Err(e) = file.set_len(0).and_then(|_| file.rewind()) {
            self.errors += 1;
            tracing::warn!("Failed to truncate backing file: {}", e);
        }
    }

    pub(crate) fn flush(&mut self) -> std::io::Result<()> {
        match self.file.as_mut() {
            Some(file) => file.flush(),
            None => Ok(()),
        }
    }

    pub(crate) fn path(&self) -> Option<&Path> {
        self.file.as_ref().map(|file| file.path())
    }

    pub(crate) fn error_count(&self) -> usize {
        self.errors
    }
}

impl Drop for BackingFile {
    fn drop(&mut self) {
        if !self.keep {
            return;
        }
        if let Some(file) = self.file.take() {
            match file.keep() {
                Ok((_, path)) => tracing::info!("Kept backing file {}", path.display()),
                Err(e) => tracing::warn!("Failed to keep backing file: {}", e),
            }
        }
    }
}
