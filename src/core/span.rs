//! Styled spans
//!
//! A span is a run of text rendered with one color. Its color is either the
//! classifier's verdict on the text or a diff color forced by a marker.

use serde::{Deserialize, Serialize};

use super::color::SemanticColor;
use super::status::{classify, StatusCategory};

/// Color attached to a span before palette resolution
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(tag = "kind", content = "value", rename_all = "snake_case")]
pub enum SpanColor {
    /// Color chosen by classifying the span's own text
    Status(StatusCategory),
    /// Color forced by an explicit marker
    Semantic(SemanticColor),
}

/// The atomic unit appended to a presentation surface
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct StyledSpan {
    pub text: String,
    pub color: SpanColor,
}

impl StyledSpan {
    /// Span whose color comes from classifying `text`
    pub fn classified(text: impl Into<String>) -> Self {
        let text = text.into();
        let color = SpanColor::Status(classify(&text));
        Self { text, color }
    }

    /// Span forced into a semantic diff color
    pub fn semantic(text: impl Into<String>, color: SemanticColor) -> Self {
        Self {
            text: text.into(),
            color: SpanColor::Semantic(color),
        }
    }

    pub fn is_empty(&self) -> bool {
        self.text.is_empty()
    }
}
