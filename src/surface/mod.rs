//! Presentation surfaces
//!
//! The capture pipeline owns no rendering logic. It drives a surface through
//! four calls: set a foreground color, append plain text, reset the color and
//! scroll to the end.

mod ansi;
mod transcript;

pub use ansi::AnsiSurface;
pub use transcript::{TextRun, TranscriptSurface};

use crate::core::Rgb;

/// Something that can show styled text
pub trait PresentationSurface {
    /// Color used for text appended from now on
    fn set_foreground_color(&mut self, color: Rgb);

    /// Append text in the current color
    fn append_plain_text(&mut self, text: &str);

    /// Return to the surface's ambient color
    fn reset_foreground_color(&mut self);

    /// Move the view to the newest text
    fn scroll_to_end(&mut self);
}

impl<T: PresentationSurface + ?Sized> PresentationSurface for &mut T {
    fn set_foreground_color(&mut self, color: Rgb) {
        (**self).set_foreground_color(color);
    }

    fn append_plain_text(&mut self, text: &str) {
        (**self).append_plain_text(text);
    }

    fn reset_foreground_color(&mut self) {
        (**self).reset_foreground_color();
    }

    fn scroll_to_end(&mut self) {
        (**self).scroll_to_end();
    }
}

impl<T: PresentationSurface + ?Sized> PresentationSurface for Box<T> {
    fn set_foreground_color(&mut self, color: Rgb) {
        (**self).set_foreground_color(color);
    }

    fn append_plain_text(&mut self, text: &str) {
        (**self).append_plain_text(text);
    }

    fn reset_foreground_color(&mut self) {
        (**self).reset_foreground_color();
    }

    fn scroll_to_end(&mut self) {
        (**self).scroll_to_end();
    }
}
