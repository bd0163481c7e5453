//! Escape sequences recognized in the stream
//!
//! Each diff color is emitted as bold followed by a foreground color, so the
//! markers are fixed literals rather than parameterized SGR sequences.

use serde::{Deserialize, Serialize};

use crate::core::SemanticColor;

/// SGR reset, cancels all active styling
pub const RESET: &str = "\x1b[0m";

/// Explicit diff color marker
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ColorCode {
    BrightCyan,
    BrightGreen,
    BrightRed,
}

impl ColorCode {
    /// All known markers
    pub const ALL: [ColorCode; 3] = [
        ColorCode::BrightCyan,
        ColorCode::BrightGreen,
        ColorCode::BrightRed,
    ];

    /// Raw escape sequence for this marker
    pub const fn sequence(&self) -> &'static str {
        match self {
            ColorCode::BrightCyan => "\x1b[1m\x1b[36m",
            ColorCode::BrightGreen => "\x1b[1m\x1b[32m",
            ColorCode::BrightRed => "\x1b[1m\x1b[31m",
        }
    }

    /// Semantic color forced onto the text following this marker
    pub const fn semantic(&self) -> SemanticColor {
        match self {
            ColorCode::BrightCyan => SemanticColor::Diff,
            ColorCode::BrightGreen => SemanticColor::DiffLeft,
            ColorCode::BrightRed => SemanticColor::DiffRight,
        }
    }

    /// Marker at the very start of `text`, if any
    pub fn at_start(text: &str) -> Option<ColorCode> {
        Self::ALL
            .into_iter()
            .find(|code| text.starts_with(code.sequence()))
    }
}

/// Leftmost known marker in `text` and its byte offset.
///
/// Every marker begins with ESC, so only ESC positions are tried.
pub fn find_marker(text: &str) -> Option<(usize, ColorCode)> {
    text.match_indices('\x1b')
        .find_map(|(idx, _)| ColorCode::at_start(&text[idx..]).map(|code| (idx, code)))
}
