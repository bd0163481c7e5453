//! Configuration for the capture pipeline

use std::fs;
use std::path::Path;

use serde::{Deserialize, Serialize};

use crate::core::{Rgb, SemanticColor, SpanColor, StatusCategory};
use crate::error::{Error, Result};

/// Capture configuration
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct Config {
    /// Display colors
    pub palette: Palette,
    /// Backing temp file settings
    pub backing: BackingConfig,
    /// When the append log is dumped on session exit
    pub dump: DumpPolicy,
}

impl Config {
    /// Parse a JSON config; missing fields take their defaults
    pub fn from_json(json: &str) -> Result<Self> {
        let config: Config = serde_json::from_str(json)?;
        config.validate()?;
        Ok(config)
    }

    /// Load a JSON config file
    pub fn load(path: impl AsRef<Path>) -> Result<Self> {
        let json = fs::read_to_string(path)?;
        Self::from_json(&json)
    }

    pub fn validate(&self) -> Result<()> {
        if self.backing.prefix.contains(['/', '\\']) {
            return Err(Error::InvalidConfig(format!(
                "backing prefix must not contain a path separator: {:?}",
                self.backing.prefix
            )));
        }
        Ok(())
    }
}

/// Color palette configuration
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct Palette {
    /// Passed
    pub success: Rgb,
    /// Failed and Error
    pub fail: Rgb,
    /// Skipped and ExpectedFail
    pub skip: Rgb,
    /// Ambient foreground the surface returns to after each span
    pub normal: Rgb,
    /// Diff context
    pub diff: Rgb,
    /// Left side of a comparison
    pub diff_left: Rgb,
    /// Right side of a comparison
    pub diff_right: Rgb,
}

impl Default for Palette {
    fn default() -> Self {
        let success = Rgb::new(13, 188, 121);
        let fail = Rgb::new(241, 57, 41);
        Self {
            success,
            fail,
            skip: Rgb::new(229, 229, 16),
            normal: Rgb::new(200, 200, 200),
            diff: Rgb::new(41, 184, 219),
            diff_left: success,
            diff_right: fail,
        }
    }
}

impl Palette {
    /// Display color for a status; `None` keeps the ambient color
    pub fn status_color(&self, status: StatusCategory) -> Option<Rgb> {
        match status {
            StatusCategory::Passed => Some(self.success),
            StatusCategory::Failed | StatusCategory::Error => Some(self.fail),
            StatusCategory::Skipped | StatusCategory::ExpectedFail => Some(self.skip),
            StatusCategory::Normal => None,
        }
    }

    /// Display color for a diff marker
    pub fn semantic_color(&self, color: SemanticColor) -> Rgb {
        match color {
            SemanticColor::Diff => self.diff,
            SemanticColor::DiffLeft => self.diff_left,
            SemanticColor::DiffRight => self.diff_right,
        }
    }

    /// Resolve a span color to RGB
    pub fn resolve(&self, color: SpanColor) -> Option<Rgb> {
        match color {
            SpanColor::Status(status) => self.status_color(status),
            SpanColor::Semantic(semantic) => Some(self.semantic_color(semantic)),
        }
    }
}

/// Backing storage configuration
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct BackingConfig {
    /// Temp file name prefix
    pub prefix: String,
    /// Keep the file after the interceptor is dropped
    pub keep: bool,
}

impl Default for BackingConfig {
    fn default() -> Self {
        Self {
            prefix: "pytest_".to_string(),
            keep: false,
        }
    }
}

/// When a session dumps its append log
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum DumpPolicy {
    /// Only when the session exits through a failure
    #[default]
    OnFailure,
    /// On every exit
    Always,
    /// Never
    Never,
}

impl DumpPolicy {
    pub fn should_dump(&self, failed: bool) -> bool {
        match self {
            DumpPolicy::OnFailure => failed,
            DumpPolicy::Always => true,
            DumpPolicy::Never => false,
        }
    }
}
