//! Terminal surface
//!
//! Re-renders captured text to a writer using 24-bit foreground colors, so
//! classified output can be shown on any true-color terminal.

use std::io::Write;

use super::PresentationSurface;
use crate::core::Rgb;
use crate::parser::RESET;

/// Surface writing SGR-colored text to `W`
#[derive(Debug)]
pub struct AnsiSurface<W: Write> {
    writer: W,
    /// Foreground restored after every reset, `None` for the terminal default
    ambient: Option<Rgb>,
    colored: bool,
    errors: usize,
}

impl<W: Write> AnsiSurface<W> {
    pub fn new(writer: W) -> Self {
        Self {
            writer,
            ambient: None,
            colored: false,
            errors: 0,
        }
    }

    /// Use `color` instead of the terminal default as the ambient foreground
    pub fn with_ambient(mut self, color: Rgb) -> Self {
        self.ambient = Some(color);
        self
    }

    /// Number of failed writes so far
    pub fn error_count(&self) -> usize {
        self.errors
    }

    pub fn get_ref(&self) -> &W {
        &self.writer
    }

    pub fn into_inner(mut self) -> W {
        self.end_color();
        self.writer
    }

    fn emit(&mut self, bytes: &[u8]) {
        if let Err(e) = self.writer.write_all(bytes) {
            self.errors += 1;
            tracing::warn!("Terminal surface write failed: {}", e);
        }
    }

    fn end_color(&mut self) {
        if self.colored {
            self.emit(RESET.as_bytes());
            self.colored = false;
        }
    }
}

impl<W: Write> PresentationSurface for AnsiSurface<W> {
    fn set_foreground_color(&mut self, color: Rgb) {
        self.emit(color.to_sgr_foreground().as_bytes());
        self.colored = true;
    }

    fn append_plain_text(&mut self, text: &str) {
        self.emit(text.as_bytes());
    }

    fn reset_foreground_color(&mut self) {
        self.end_color();
        if let Some(ambient) = self.ambient {
            self.emit(ambient.to_sgr_foreground().as_bytes());
            self.colored = true;
        }
    }

    fn scroll_to_end(&mut self) {
        if let Err(e) = self.writer.flush() {
            self.errors += 1;
            tracing::warn!("Terminal surface flush failed: {}", e);
        }
    }
}
