//! Span extraction
//!
//! Text containing resets is cut into segments at every reset. Within a
//! segment the first known marker splits it in two: the text before the
//! marker is colored by the classifier, the text after it up to the next
//! reset takes the marker's color and is never re-classified.

use crate::core::StyledSpan;

use super::marker::{find_marker, ColorCode, RESET};

/// Text following a marker, up to the end of its segment
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct MarkedText<'a> {
    pub code: ColorCode,
    pub text: &'a str,
}

/// One reset-delimited piece of a fragment
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Segment<'a> {
    /// Text before the first marker (the whole segment when unmarked)
    pub prefix: &'a str,
    /// Marker and the text it colors
    pub marked: Option<MarkedText<'a>>,
}

impl<'a> Segment<'a> {
    /// Spans in render order: the classified prefix, then the marked text
    pub fn spans(&self) -> impl Iterator<Item = StyledSpan> + 'a {
        let prefix = StyledSpan::classified(self.prefix);
        let marked = self
            .marked
            .map(|marked| StyledSpan::semantic(marked.text, marked.code.semantic()));
        std::iter::once(prefix).chain(marked)
    }
}

/// Split a single reset-free segment at its first marker
pub fn parse_segment(segment: &str) -> Segment<'_> {
    match find_marker(segment) {
        Some((idx, code)) => Segment {
            prefix: &segment[..idx],
            marked: Some(MarkedText {
                code,
                text: &segment[idx + code.sequence().len()..],
            }),
        },
        None => Segment {
            prefix: segment,
            marked: None,
        },
    }
}

/// Lazily parse `text` into non-empty segments
pub fn segments(text: &str) -> impl Iterator<Item = Segment<'_>> {
    text.split(RESET)
        .filter(|part| !part.is_empty())
        .map(parse_segment)
}

/// Parse `text` into its ordered segments
pub fn parse(text: &str) -> Vec<Segment<'_>> {
    segments(text).collect()
}

/// Parse `text` and flatten the segments into styled spans
pub fn parse_spans(text: &str) -> Vec<StyledSpan> {
    segments(text).flat_map(|segment| segment.spans()).collect()
}
