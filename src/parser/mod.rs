//! Diff-marker span parser
//!
//! Splits captured text into styled spans using the small, closed set of
//! escape sequences a test runner emits around assertion diffs. This is not
//! a general ANSI parser: only the reset marker and the bright diff colors
//! are recognized, and every other escape sequence stays in the text as
//! ordinary characters.

mod marker;
mod spans;

pub use marker::{find_marker, ColorCode, RESET};
pub use spans::{parse, parse_segment, parse_spans, segments, MarkedText, Segment};
