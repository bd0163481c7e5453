//! Capture Stream Library
//!
//! A streaming sink for test-runner console output. Every fragment written to
//! it is classified by meaning (pass, fail, error, skip, expected failure) and
//! the bright diff colors the runner embeds are turned into styled spans for a
//! presentation surface.
//!
//! - `core`: status categories, semantic colors, styled spans
//! - `parser`: ANSI diff-marker span parser
//! - `capture`: stream interceptor, append log, capture sessions
//! - `surface`: presentation surfaces (in-memory transcript, ANSI terminal)
//! - `app`: configuration

pub mod app;
pub mod capture;
pub mod core;
mod error;
pub mod parser;
pub mod surface;

pub use error::{Error, Result};
