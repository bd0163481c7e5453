//! Color representation for rendered spans
//!
//! Two kinds of color reach a surface:
//! - Status colors picked by the classifier
//! - Semantic diff colors forced by an explicit marker in the stream
//!
//! Both resolve to an [`Rgb`] through the configured palette.

use serde::{Deserialize, Serialize};

/// 24-bit display color, serialized as `[r, g, b]`
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Rgb(pub u8, pub u8, pub u8);

impl Rgb {
    /// Create a new RGB color
    pub const fn new(r: u8, g: u8, b: u8) -> Self {
        Rgb(r, g, b)
    }

    pub fn r(&self) -> u8 {
        self.0
    }

    pub fn g(&self) -> u8 {
        self.1
    }

    pub fn b(&self) -> u8 {
        self.2
    }

    /// SGR sequence selecting this color as a 24-bit foreground
    pub fn to_sgr_foreground(&self) -> String {
        format!("\x1b[38;2;{};{};{}m", self.0, self.1, self.2)
    }
}

/// Meaning of an explicit diff marker in the stream
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum SemanticColor {
    /// Context of an assertion diff
    Diff,
    /// Left-hand side of a comparison
    DiffLeft,
    /// Right-hand side of a comparison
    DiffRight,
}
