use crate::error::RenderError;
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

/// Output format selector for the rendering backend
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum OutputFormat {
    Png,
    Svg,
}

impl OutputFormat {
    /// Backend format flag and file extension
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Png => "png",
            Self::Svg => "svg",
        }
    }
}

impl Default for OutputFormat {
    fn default() -> Self {
        Self::Png
    }
}

impl FromStr for OutputFormat {
    type Err = RenderError;

    fn from_str(raw: &str) -> Result<Self, Self::Err> {
        match raw.trim().to_ascii_lowercase().as_str() {
            "png" => Ok(Self::Png),
            "svg" => Ok(Self::Svg),
            other => Err(RenderError::UnsupportedFormat(other.to_string())),
        }
    }
}

impl fmt::Display for OutputFormat {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Layout direction, the only layout knob exposed
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum LayoutDirection {
    /// Top to bottom ("TB")
    TopBottom,

    /// Left to right ("LR")
    LeftRight,
}

impl LayoutDirection {
    pub fn rankdir(&self) -> &'static str {
        match self {
            Self::TopBottom => "TB",
            Self::LeftRight => "LR",
        }
    }
}

impl Default for LayoutDirection {
    fn default() -> Self {
        Self::TopBottom
    }
}

impl FromStr for LayoutDirection {
    type Err = RenderError;

    fn from_str(raw: &str) -> Result<Self, Self::Err> {
        match raw.trim().to_ascii_uppercase().as_str() {
            "TB" => Ok(Self::TopBottom),
            "LR" => Ok(Self::LeftRight),
            other => Err(RenderError::UnsupportedDirection(other.to_string())),
        }
    }
}

/// Rendered diagram plus provenance metadata
#[derive(Debug, Clone)]
pub struct DiagramResult {
    /// Raw backend output
    pub bytes: Vec<u8>,

    pub format: OutputFormat,

    /// Type ids of every identified service, in discovery order
    pub services_identified: Vec<String>,

    pub node_count: usize,
    pub edge_count: usize,
}
