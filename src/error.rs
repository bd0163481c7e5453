//! Error types for capture setup and configuration
//!
//! The write path never fails; only opening a session, loading
//! configuration and the CLI surface these.

use std::io;
use thiserror::Error;

/// Capture error type
#[derive(Error, Debug)]
pub enum Error {
    /// I/O error
    #[error("I/O error: {0}")]
    Io(#[from] io::Error),

    /// Configuration could not be parsed
    #[error("Invalid config: {0}")]
    Config(#[from] serde_json::Error),

    /// Configuration parsed but holds an unusable value
    #[error("Invalid config value: {0}")]
    InvalidConfig(String),
}

/// Result type for capture operations
pub type Result<T> = std::result::Result<T, Error>;
