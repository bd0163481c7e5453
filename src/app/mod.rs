//! Application glue module
//!
//! Configuration for palettes, backing storage and diagnostic dumps.

mod config;

pub use config::{BackingConfig, Config, DumpPolicy, Palette};
