//! In-memory surface
//!
//! Records what a widget would have shown: runs of text with the color they
//! were appended in. Adjacent runs of the same color are merged, so the
//! transcript is independent of how the stream was chunked.

use serde::{Deserialize, Serialize};

use super::PresentationSurface;
use crate::core::Rgb;

/// A run of text appended under one color
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TextRun {
    pub text: String,
    /// `None` is the ambient color
    pub color: Option<Rgb>,
}

/// Surface that keeps everything appended to it
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct TranscriptSurface {
    runs: Vec<TextRun>,
    #[serde(skip)]
    current: Option<Rgb>,
    scrolls: usize,
}

impl TranscriptSurface {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn runs(&self) -> &[TextRun] {
        &self.runs
    }

    /// All text, colors dropped
    pub fn text(&self) -> String {
        self.runs.iter().map(|run| run.text.as_str()).collect()
    }

    /// Number of scroll-to-end requests
    pub fn scroll_count(&self) -> usize {
        self.scrolls
    }

    /// Color currently selected for new text
    pub fn current_color(&self) -> Option<Rgb> {
        self.current
    }

    pub fn clear(&mut self) {
        self.runs.clear();
        self.current = None;
        self.scrolls = 0;
    }
}

impl PresentationSurface for TranscriptSurface {
    fn set_foreground_color(&mut self, color: Rgb) {
        self.current = Some(color);
    }

    fn append_plain_text(&mut self, text: &str) {
        if text.is_empty() {
            return;
        }
        match self.runs.last_mut() {
            Some(last) if last.color == self.current => last.text.push_str(text),
            _ => self.runs.push(TextRun {
                text: text.to_string(),
                color: self.current,
            }),
        }
    }

    fn reset_foreground_color(&mut self) {
        self.current = None;
    }

    fn scroll_to_end(&mut self) {
        self.scrolls += 1;
    }
}
