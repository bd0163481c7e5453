//! Capture Core Module
//!
//! Presentation-independent pieces of the capture pipeline:
//! - Status categories and the fragment classifier
//! - Semantic diff colors and display RGB values
//! - Styled spans, the unit handed to a presentation surface
//!
//! Everything here is pure: the same fragment always classifies and
//! resolves to the same color.

mod color;
mod span;
mod status;

pub use color::{Rgb, SemanticColor};
pub use span::{SpanColor, StyledSpan};
pub use status::{classify, StatusCategory};
