//! Stream interceptor
//!
//! Receives raw fragments from a test runner and, for each one:
//! 1. mirrors it verbatim to the backing file
//! 2. renders it onto the presentation surface (span-parsed when it carries
//!    a reset marker, classified as a whole otherwise)
//! 3. scrolls the surface to its end
//! 4. records it in the append log
//!
//! Writing never fails. Text that matches nothing is rendered in the
//! surface's ambient color.

use std::path::Path;

use crate::app::{Config, Palette};
use crate::core::StyledSpan;
use crate::error::Result;
use crate::parser::{self, RESET};
use crate::surface::PresentationSurface;

use super::backing::BackingFile;
use super::log::AppendLog;
use super::utf8::Utf8Stream;

/// Sink turning captured output into styled text
#[derive(Debug)]
pub struct StreamInterceptor<S: PresentationSurface> {
    surface: S,
    palette: Palette,
    backing: BackingFile,
    log: AppendLog,
    utf8: Utf8Stream,
}

impl<S: PresentationSurface> StreamInterceptor<S> {
    /// Create an interceptor rendering onto `surface`.
    ///
    /// Fails only if the backing file cannot be created.
    pub fn new(surface: S, config: &Config) -> Result<Self> {
        config.validate()?;
        Ok(Self {
            surface,
            palette: config.palette.clone(),
            backing: BackingFile::create(&config.backing)?,
            log: AppendLog::new(),
            utf8: Utf8Stream::new(),
        })
    }

    /// Process one fragment
    pub fn write(&mut self, text: &str) {
        self.backing.append(text);

        if text.contains(RESET) {
            for segment in parser::segments(text) {
                for span in segment.spans() {
                    self.render(&span);
                }
            }
        } else {
            self.render(&StyledSpan::classified(text));
        }

        self.surface.scroll_to_end();
        self.log.push(text);
        tracing::trace!(index = self.log.len() - 1, len = text.len(), "Captured fragment");
    }

    /// Process raw bytes whose boundaries may split a UTF-8 character.
    ///
    /// Complete characters are written as one fragment; a split character is
    /// held back until the rest of it arrives.
    pub fn write_bytes(&mut self, bytes: &[u8]) {
        let text = self.utf8.decode(bytes);
        if !text.is_empty() {
            self.write(&text);
        }
    }

    /// Write out a held partial character as U+FFFD
    pub fn flush_pending(&mut self) {
        if self.utf8.is_pending() {
            let text = self.utf8.finish();
            self.write(&text);
        }
    }

    fn render(&mut self, span: &StyledSpan) {
        if span.is_empty() {
            return;
        }
        if let Some(color) = self.palette.resolve(span.color) {
            self.surface.set_foreground_color(color);
        }
        self.surface.append_plain_text(&span.text);
        self.surface.reset_foreground_color();
    }

    pub fn log(&self) -> &AppendLog {
        &self.log
    }

    /// Start over as if freshly created: empty log, empty backing file and
    /// no held partial character. Returns the number of fragments dropped.
    pub(crate) fn restart(&mut self) -> usize {
        let dropped = self.take_log().len();
        self.backing.truncate();
        self.utf8.reset();
        dropped
    }

    pub(crate) fn take_log(&mut self) -> AppendLog {
        std::mem::take(&mut self.log)
    }

    pub fn surface(&self) -> &S {
        &self.surface
    }

    pub fn surface_mut(&mut self) -> &mut S {
        &mut self.surface
    }

    pub fn palette(&self) -> &Palette {
        &self.palette
    }

    /// Path of the backing file
    pub fn backing_path(&self) -> Option<&Path> {
        self.backing.path()
    }

    /// Number of fragments that could not be mirrored to the backing file
    pub fn backing_errors(&self) -> usize {
        self.backing.error_count()
    }

    /// Flush the backing file
    pub fn flush_backing(&mut self) -> std::io::Result<()> {
        self.backing.flush()
    }
}
